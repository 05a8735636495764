//! Outside-click dismissal for the add-search dropdown.
//!
//! Pointer events are only delivered while mouse capture is on, and capture is
//! on exactly as long as a [`DismissalGuard`] is alive.

use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEvent, MouseEventKind};
use crossterm::execute;
use ratatui::layout::{Position, Rect};
use tracing::debug;

use crate::selection::SelectionEvent;

/// Subscription to system-wide pointer events.
pub trait MouseCapture {
    fn enable(&mut self) -> io::Result<()>;
    fn disable(&mut self) -> io::Result<()>;
}

impl MouseCapture for Box<dyn MouseCapture> {
    fn enable(&mut self) -> io::Result<()> {
        (**self).enable()
    }

    fn disable(&mut self) -> io::Result<()> {
        (**self).disable()
    }
}

/// Mouse capture on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalMouse;

impl MouseCapture for TerminalMouse {
    fn enable(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnableMouseCapture)?;
        stdout.flush()
    }

    fn disable(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, DisableMouseCapture)?;
        stdout.flush()
    }
}

/// Armed outside-click detector for one interactive region.
pub struct DismissalGuard<C: MouseCapture> {
    capture: C,
    region: Rect,
}

impl<C: MouseCapture> DismissalGuard<C> {
    pub fn arm(mut capture: C, region: Rect) -> io::Result<Self> {
        capture.enable()?;
        debug!(?region, "dismissal guard armed");
        Ok(Self { capture, region })
    }

    /// The region moves with layout changes (resize, result count).
    pub fn set_region(&mut self, region: Rect) {
        self.region = region;
    }

    #[cfg(test)]
    pub fn region(&self) -> Rect {
        self.region
    }

    /// `OutsideInteraction` for a pointer-down outside the region.
    pub fn observe(&self, event: &MouseEvent) -> Option<SelectionEvent> {
        if !matches!(event.kind, MouseEventKind::Down(_)) {
            return None;
        }
        if self.region.contains(Position { x: event.column, y: event.row }) {
            return None;
        }
        Some(SelectionEvent::OutsideInteraction)
    }
}

impl<C: MouseCapture> Drop for DismissalGuard<C> {
    fn drop(&mut self) {
        let _ = self.capture.disable();
        debug!("dismissal guard released");
    }
}

/// True for a primary-button press.
pub fn is_primary_press(event: &MouseEvent) -> bool {
    event.kind == MouseEventKind::Down(MouseButton::Left)
}
