//! Bordered single-line text input with placeholder and focus cursor.

use ratatui::{
    layout::Position,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::colors;

pub fn render(
    f: &mut Frame,
    title: &str,
    buffer: &str,
    placeholder: &str,
    focused: bool,
    area: ratatui::prelude::Rect,
) {
    let border_style = if focused {
        Style::default().fg(colors::ACCENT)
    } else {
        Style::default().fg(colors::BORDER)
    };
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(Style::default().bg(colors::ELEVATED));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let line = if buffer.is_empty() {
        Line::from(Span::styled(
            placeholder,
            Style::default().fg(colors::MUTED).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(buffer, Style::default().fg(colors::TEXT)))
    };
    f.render_widget(Paragraph::new(line), inner);

    if focused && inner.width > 0 {
        let cursor_x = inner.x + buffer.chars().count() as u16;
        let x = cursor_x.min(inner.x + inner.width.saturating_sub(1));
        f.set_cursor_position(Position { x, y: inner.y });
    }
}
