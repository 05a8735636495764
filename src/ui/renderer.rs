//! Full-screen render: header, inputs, notice, watchlist, status, and the
//! add-search dropdown drawn last so it overlays the list.

use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::ranking::{normalize_query, rank};
use crate::state::Focus;
use crate::storage::KvStore;
use crate::ui::layout;
use crate::ui::theme::{styles, SPINNER};
use crate::ui::widgets::{render_dropdown, render_header, render_input, render_status, render_watchlist};

pub fn render<S: KvStore>(f: &mut Frame, app: &App<S>, source: &str, tick: usize) {
    let area = f.area();
    let regions = layout::compute(area);
    let state = &app.state;
    let spinner_char = SPINNER[tick % SPINNER.len()];

    render_header(f, source, regions.header);
    render_input(
        f,
        "Filter watchlist",
        &state.view.filter,
        "Filter by name or code",
        state.focus == Focus::Filter,
        regions.filter,
    );
    render_input(
        f,
        "Add coin",
        &state.search.query,
        "Search coins to add",
        state.focus == Focus::AddSearch,
        regions.add_search,
    );

    if let Some(notice) = &state.notice {
        let line = Span::styled(format!(" {notice}"), styles::error());
        f.render_widget(Paragraph::new(line), regions.notice);
    }

    render_watchlist(
        f,
        &state.view,
        app.watchlist_ids(),
        app.vs_currency(),
        state.focus == Focus::Watchlist,
        spinner_char,
        regions.list,
    );
    render_status(
        f,
        regions.status,
        &state.view.status,
        app.quotes_in_flight() && state.view.has_loaded_once,
        state.focus,
        spinner_char,
    );

    if let Some(highlighted) = state.search.dropdown.highlighted() {
        if !normalize_query(&state.search.query).is_empty() {
            let results = rank(&state.search.query, state.catalog.entries());
            let dropdown = layout::dropdown_rect(&regions, App::<S>::dropdown_lines(state));
            render_dropdown(f, &state.catalog, &results, highlighted, dropdown);
        }
    }
}
