//! Status bar: refresh state on the left, key hints for the focused control
//! on the right.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::{Focus, LoadStatus};
use crate::ui::theme::colors;

fn hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Watchlist => " ↑↓ move  Enter details  d remove  / filter  a add  ^R refresh  q quit ",
        Focus::Filter => " type to filter  Tab next  Esc back ",
        Focus::AddSearch => " ↑↓ choose  Enter add  Esc close  Tab next ",
    }
}

pub fn render(
    f: &mut Frame,
    area: ratatui::prelude::Rect,
    status: &LoadStatus,
    refreshing: bool,
    focus: Focus,
    spinner_char: char,
) {
    let (left, left_color) = match status {
        _ if refreshing => (format!(" {} Refreshing…", spinner_char), colors::MUTED),
        LoadStatus::Failed(message) => (format!(" Unable to load prices: {message}"), colors::NEGATIVE),
        LoadStatus::Ready | LoadStatus::Idle | LoadStatus::Loading => (" Ready".to_string(), colors::MUTED),
    };
    let right = hints(focus);
    let width = area.width as usize;
    let right_len = right.chars().count();
    let left: String = left.chars().take(width.saturating_sub(right_len)).collect();
    let pad = width.saturating_sub(left.chars().count() + right_len);
    let bg = Style::default().bg(colors::ELEVATED);
    let line = Line::from(vec![
        Span::styled(left, bg.fg(left_color)),
        Span::styled(" ".repeat(pad), bg),
        Span::styled(right, bg.fg(colors::MUTED)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
