//! Theme: dark dashboard palette and fixed region heights.

use ratatui::style::Color;

pub mod colors {
    use super::*;
    /// Main canvas (watchlist area).
    pub const BG: Color = Color::Rgb(0x11, 0x18, 0x27);
    /// Inputs, status, dropdown.
    pub const ELEVATED: Color = Color::Rgb(0x1f, 0x29, 0x37);
    pub const BORDER: Color = Color::Rgb(0x37, 0x41, 0x51);
    /// Focused input border, highlight marker.
    pub const ACCENT: Color = Color::Rgb(0xf5, 0x9e, 0x0b);
    /// Highlighted dropdown / selected row background.
    pub const SELECTED_BG: Color = Color::Rgb(0x37, 0x41, 0x51);
    pub const TEXT: Color = Color::Rgb(0xf9, 0xfa, 0xfb);
    pub const TEXT_DIM: Color = Color::Rgb(0xd1, 0xd5, 0xdb);
    pub const MUTED: Color = Color::Rgb(0x9c, 0xa3, 0xaf);
    pub const POSITIVE: Color = Color::Rgb(0x34, 0xd3, 0x99);
    pub const NEGATIVE: Color = Color::Rgb(0xf8, 0x71, 0x71);
}

pub mod styles {
    use ratatui::style::{Modifier, Style};

    use super::colors;

    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    pub fn accent_bold() -> Style {
        Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(colors::TEXT_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(colors::MUTED)
    }

    pub fn error() -> Style {
        Style::default().fg(colors::NEGATIVE)
    }

    pub fn elevated_bg() -> Style {
        Style::default().bg(colors::ELEVATED)
    }

    /// Green for gains, red for losses, dim when unknown.
    pub fn change(value: Option<f64>) -> Style {
        match value {
            Some(v) if v > 0.0 => Style::default().fg(colors::POSITIVE),
            Some(v) if v < 0.0 => Style::default().fg(colors::NEGATIVE),
            _ => text_dim(),
        }
    }
}

pub const HEADER_HEIGHT: u16 = 5;
/// Bordered single-line inputs.
pub const INPUT_HEIGHT: u16 = 3;
pub const NOTICE_HEIGHT: u16 = 1;
pub const STATUS_HEIGHT: u16 = 1;
pub const MIN_LIST_LINES: u16 = 3;
/// Dropdown rows visible at once (the list itself is capped at 20).
pub const DROPDOWN_MAX_ROWS: u16 = 12;
/// Inner horizontal margin (chars each side).
pub const MARGIN_X: u16 = 1;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
