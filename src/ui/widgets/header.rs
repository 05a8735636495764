//! Header banner: title, version, tagline and data source in a box.

use ratatui::{
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::styles;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const TITLE: &str = "Crypto Watchlist ";
const TAGLINE: &str = "Track prices, trends, and your favorite coins in real time";
const SOURCE_LABEL: &str = "source: ";

/// Truncate to `max_chars` from the end with ellipsis. Single pass over chars.
fn truncate_end(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    let take = max_chars.saturating_sub(1);
    let skip = count.saturating_sub(take);
    format!("…{}", s.chars().skip(skip).collect::<String>())
}

fn boxed(content: Vec<Span<'static>>, inner: usize) -> Line<'static> {
    let used: usize = content.iter().map(|s| s.content.chars().count()).sum();
    let border = styles::border();
    let mut spans = vec![Span::styled("  │ ", border)];
    spans.extend(content);
    spans.push(Span::raw(" ".repeat(inner.saturating_sub(used))));
    spans.push(Span::styled(" │", border));
    Line::from(spans)
}

pub fn render(f: &mut Frame, api_url: &str, area: ratatui::prelude::Rect) {
    // Total width available, minus 2 for leading "  " indent.
    let total = (area.width as usize).saturating_sub(2);
    let dash_count = total.saturating_sub(2);
    // Between "│ " and " │".
    let inner = total.saturating_sub(4);

    let border = styles::border();
    let version = format!("(v{VERSION})");
    let source = truncate_end(api_url, inner.saturating_sub(SOURCE_LABEL.chars().count()));

    let lines = vec![
        Line::from(vec![
            Span::styled("  ", border),
            Span::styled(format!("╭{}╮", "─".repeat(dash_count)), border),
        ]),
        boxed(
            vec![Span::styled(TITLE, styles::accent_bold()), Span::styled(version, styles::text_dim())],
            inner,
        ),
        boxed(vec![Span::styled(truncate_end(TAGLINE, inner), styles::muted())], inner),
        boxed(
            vec![Span::styled(SOURCE_LABEL, styles::text_dim()), Span::styled(source, styles::title())],
            inner,
        ),
        Line::from(vec![
            Span::styled("  ", border),
            Span::styled(format!("╰{}╯", "─".repeat(dash_count)), border),
        ]),
    ];

    let para = Paragraph::new(lines).style(styles::elevated_bg());
    f.render_widget(para, area);
}
