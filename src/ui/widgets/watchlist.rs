//! Watchlist panel: one row per tracked coin, details under the expanded row.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::backend::{CoinDetails, MarketQuote};
use crate::services::{format_grouped, format_percent, format_price, format_updated};
use crate::state::{DetailsState, LoadStatus, WatchlistView};
use crate::ui::theme::{colors, styles};

const PRICE_WIDTH: usize = 16;
const CHANGE_WIDTH: usize = 9;
const UPDATED_WIDTH: usize = 9;
const CODE_WIDTH: usize = 7;
const DETAIL_INDENT: &str = "      ";

fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), s)
}

fn pad_right(s: &str, width: usize) -> String {
    let clipped: String = s.chars().take(width).collect();
    let len = clipped.chars().count();
    format!("{}{}", clipped, " ".repeat(width.saturating_sub(len)))
}

fn row_line(quote: &MarketQuote, vs_currency: &str, width: usize, selected: bool, expanded: bool) -> Line<'static> {
    let fixed = 2 + CODE_WIDTH + PRICE_WIDTH + CHANGE_WIDTH + UPDATED_WIDTH + 3;
    let name_width = width.saturating_sub(fixed).max(4);
    let bg = if selected { colors::SELECTED_BG } else { colors::BG };
    let marker = match (selected, expanded) {
        (_, true) => "▾ ",
        (true, false) => "▎ ",
        (false, false) => "  ",
    };
    let name_style = if selected {
        Style::default().fg(colors::TEXT).bg(bg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::TEXT).bg(bg)
    };
    let change = quote.price_change_percentage_24h;
    Line::from(vec![
        Span::styled(marker, Style::default().fg(colors::ACCENT).bg(bg)),
        Span::styled(pad_right(&quote.name, name_width), name_style),
        Span::styled(pad_right(&quote.symbol.to_uppercase(), CODE_WIDTH), Style::default().fg(colors::MUTED).bg(bg)),
        Span::styled(
            pad_left(&format_price(quote.current_price, vs_currency), PRICE_WIDTH),
            Style::default().fg(colors::TEXT).bg(bg),
        ),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(pad_left(&format_percent(change), CHANGE_WIDTH), styles::change(change).bg(bg)),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            pad_left(&format_updated(quote.last_updated.as_deref()), UPDATED_WIDTH),
            Style::default().fg(colors::MUTED).bg(bg),
        ),
        Span::styled(" ", Style::default().bg(bg)),
    ])
}

fn detail_line(label: &str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::raw(DETAIL_INDENT),
        Span::styled(format!("{label:<14}"), styles::muted()),
        Span::styled(value, value_style),
    ])
}

fn details_lines(state: Option<&DetailsState>, vs_currency: &str) -> Vec<Line<'static>> {
    match state {
        None | Some(DetailsState::Loading) => vec![Line::from(vec![
            Span::raw(DETAIL_INDENT),
            Span::styled("Loading details...", styles::text_dim()),
        ])],
        Some(DetailsState::Failed(_)) => vec![Line::from(vec![
            Span::raw(DETAIL_INDENT),
            Span::styled("Unable to load details.", styles::error()),
        ])],
        Some(DetailsState::Ready(details)) => ready_lines(details, vs_currency),
    }
}

fn ready_lines(d: &CoinDetails, vs_currency: &str) -> Vec<Line<'static>> {
    let text = styles::text_dim();
    let low_high = format!(
        "{} / {}",
        format_price(d.low_24h, vs_currency),
        format_price(d.high_24h, vs_currency)
    );
    let mut lines = vec![
        detail_line("Market cap", format_price(d.market_cap, vs_currency), text),
        detail_line("Volume 24h", format_price(d.total_volume, vs_currency), text),
        detail_line("Low / High", low_high, text),
        detail_line(
            "Change 24h",
            format_percent(d.price_change_percentage_24h),
            styles::change(d.price_change_percentage_24h),
        ),
        detail_line("Supply", format_grouped(d.circulating_supply), text),
    ];
    if let Some(url) = &d.homepage {
        lines.push(detail_line("Homepage", url.clone(), styles::accent_bold()));
    }
    lines
}

fn message(text: &str, style: Style) -> Paragraph<'_> {
    Paragraph::new(Line::from(vec![Span::raw(" "), Span::styled(text, style)]))
}

pub fn render(
    f: &mut Frame,
    view: &WatchlistView,
    tracked: &[String],
    vs_currency: &str,
    focused: bool,
    spinner_char: char,
    area: ratatui::prelude::Rect,
) {
    f.render_widget(Paragraph::new("").style(Style::default().bg(colors::BG)), area);

    if !view.has_loaded_once && !tracked.is_empty() {
        if let LoadStatus::Failed(_) = view.status {
            f.render_widget(message("Unable to load prices. Press Ctrl+R to retry.", styles::error()), area);
            return;
        }
        let line = Line::from(vec![
            Span::styled(format!(" {spinner_char} "), Style::default().fg(colors::ACCENT)),
            Span::styled("Loading prices…", styles::text_dim()),
        ]);
        f.render_widget(Paragraph::new(line), area);
        return;
    }
    if tracked.is_empty() {
        f.render_widget(
            message("Your watchlist is empty. Search for a coin above to add it.", styles::muted()),
            area,
        );
        return;
    }
    let rows = view.visible(tracked);
    if rows.is_empty() {
        f.render_widget(message("No results match your search.", styles::muted()), area);
        return;
    }

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;
    for (i, quote) in rows.iter().enumerate() {
        let selected = focused && i == view.selected;
        let expanded = view.expanded.as_deref() == Some(quote.id.as_str());
        if i == view.selected {
            selected_line = lines.len();
        }
        lines.push(row_line(quote, vs_currency, width, selected, expanded));
        if expanded {
            lines.extend(details_lines(view.details.get(&quote.id), vs_currency));
        }
    }

    // Keep the selected row on screen.
    let height = area.height as usize;
    let scroll = (selected_line + 1).saturating_sub(height);
    let para = Paragraph::new(lines).scroll((scroll as u16, 0));
    f.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_clips_and_aligns() {
        assert_eq!(pad_left("$1.00", 7), "  $1.00");
        assert_eq!(pad_right("Bitcoin", 4), "Bitc");
        assert_eq!(pad_right("BTC", 5), "BTC  ");
    }

    #[test]
    fn missing_details_show_loading() {
        let lines = details_lines(None, "usd");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans.iter().any(|s| s.content == "Loading details..."));
    }

    #[test]
    fn homepage_line_only_when_known() {
        let without = ready_lines(&CoinDetails::default(), "usd");
        let with = ready_lines(
            &CoinDetails { homepage: Some("https://bitcoin.org".into()), ..CoinDetails::default() },
            "usd",
        );
        assert_eq!(with.len(), without.len() + 1);
    }
}
