//! Add-search dropdown: ranked coins with accent bar on the highlighted row,
//! or a single status line while loading, failed, or empty.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::catalog::{CatalogEntry, CatalogIndex};
use crate::ui::layout;
use crate::ui::theme::colors;

pub fn render(
    f: &mut Frame,
    catalog: &CatalogIndex,
    results: &[&CatalogEntry],
    highlighted: usize,
    area: ratatui::prelude::Rect,
) {
    if area.height < 3 {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::ELEVATED));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let message = if catalog.is_loading() {
        Some(("Loading coins...", colors::TEXT_DIM))
    } else if catalog.error().is_some() {
        Some(("Unable to load coin list", colors::NEGATIVE))
    } else if results.is_empty() {
        Some(("No coins match that search", colors::TEXT_DIM))
    } else {
        None
    };
    if let Some((text, color)) = message {
        f.render_widget(Paragraph::new(Span::styled(text, Style::default().fg(color))), inner);
        return;
    }

    let capacity = layout::dropdown_capacity(area);
    let offset = layout::dropdown_offset(highlighted, capacity);
    let width = inner.width as usize;
    let lines: Vec<Line> = results
        .iter()
        .enumerate()
        .skip(offset)
        .take(capacity)
        .map(|(i, coin)| {
            let selected = i == highlighted;
            let code = coin.code.to_uppercase();
            let name_room = width.saturating_sub(code.chars().count() + 3);
            let name: String = coin.name.chars().take(name_room).collect();
            let pad = name_room.saturating_sub(name.chars().count());
            let row_bg = if selected { colors::SELECTED_BG } else { colors::ELEVATED };
            Line::from(vec![
                Span::styled(if selected { "▎ " } else { "  " }, Style::default().fg(colors::ACCENT).bg(row_bg)),
                Span::styled(
                    name,
                    if selected {
                        Style::default().fg(colors::TEXT).bg(row_bg).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(colors::TEXT_DIM).bg(row_bg)
                    },
                ),
                Span::styled(" ".repeat(pad + 1), Style::default().bg(row_bg)),
                Span::styled(code, Style::default().fg(colors::MUTED).bg(row_bg)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}
