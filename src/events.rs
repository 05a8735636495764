//! Keybindings per focus: Tab cycles focus, Ctrl+C quits, Ctrl+R refreshes.

use crate::actions::Action;
use crate::state::Focus;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use std::time::Duration;

pub const TICK_RATE: Duration = Duration::from_millis(80);

pub fn key_to_action(event: &KeyEvent, focus: Focus) -> Option<Action> {
    // Accept Press and Repeat (hold key); ignore Release so we don't double-handle.
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let (code, mods) = (event.code, event.modifiers);

    if mods.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Tab => return Some(Action::FocusNext),
        KeyCode::BackTab => return Some(Action::FocusPrev),
        KeyCode::Esc => return Some(Action::Escape),
        KeyCode::Enter => return Some(Action::Confirm),
        KeyCode::Up => return Some(Action::Up),
        KeyCode::Down => return Some(Action::Down),
        _ => {}
    }

    match focus {
        Focus::Watchlist => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('k') => Some(Action::Up),
            KeyCode::Char('j') => Some(Action::Down),
            KeyCode::Char(' ') => Some(Action::Confirm),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::Remove),
            KeyCode::Char('/') => Some(Action::FocusFilter),
            KeyCode::Char('a') => Some(Action::FocusAddSearch),
            _ => None,
        },
        Focus::Filter | Focus::AddSearch => match code {
            KeyCode::Insert if focus == Focus::AddSearch => Some(Action::Confirm),
            KeyCode::Backspace => Some(Action::Backspace),
            // Allow Alt for accented chars; Ctrl was handled above.
            KeyCode::Char(c) if !mods.contains(KeyModifiers::SUPER) => Some(Action::Char(c)),
            _ => None,
        },
    }
}

/// Only presses are interesting: they drive row clicks and outside dismissal.
pub fn mouse_to_action(event: &MouseEvent) -> Option<Action> {
    match event.kind {
        MouseEventKind::Down(_) => Some(Action::Pointer(*event)),
        _ => None,
    }
}
