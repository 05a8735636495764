//! Global state container and action dispatch.

use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::actions::Action;
use crate::catalog::CatalogError;
use crate::dismissal::{is_primary_press, DismissalGuard, MouseCapture};
use crate::fetcher::{FetchResult, Fetcher};
use crate::ranking::{normalize_query, rank};
use crate::selection::{reduce, SelectionEvent};
use crate::state::{AppState, DetailsState, Focus, LoadStatus};
use crate::storage::KvStore;
use crate::ui::layout;
use crate::watchlist::{WatchlistError, WatchlistStore};

/// Produces a fresh mouse-capture handle each time the dropdown opens.
pub type CaptureFactory = Box<dyn Fn() -> Box<dyn MouseCapture>>;

pub struct App<S: KvStore> {
    pub state: AppState,
    watchlist: WatchlistStore<S>,
    fetcher: Fetcher,
    capture: CaptureFactory,
    dismissal: Option<DismissalGuard<Box<dyn MouseCapture>>>,
    /// Generation of the newest quote request; older responses are dropped.
    quotes_issued: u64,
    quotes_in_flight: bool,
    viewport: Rect,
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
}

impl<S: KvStore> App<S> {
    pub fn new(watchlist: WatchlistStore<S>, fetcher: Fetcher, capture: CaptureFactory) -> Self {
        Self {
            state: AppState::default(),
            watchlist,
            fetcher,
            capture,
            dismissal: None,
            quotes_issued: 0,
            quotes_in_flight: false,
            viewport: Rect::default(),
            should_quit: false,
            tick: 0,
        }
    }

    pub fn bootstrap(&mut self) {
        self.watchlist.load();
        info!(count = self.watchlist.len(), "watchlist ready");
        self.surface_storage_error();
        self.request_quotes();
    }

    pub fn watchlist_ids(&self) -> &[String] {
        self.watchlist.ids()
    }

    pub fn vs_currency(&self) -> &str {
        self.fetcher.vs_currency()
    }

    pub fn quotes_in_flight(&self) -> bool {
        self.quotes_in_flight
    }

    /// Terminal area of the last drawn frame; keeps hit-testing in sync.
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
        if let Some(guard) = self.dismissal.as_mut() {
            guard.set_region(Self::interactive_region(area, &self.state));
        }
    }

    /// Input plus the dropdown as drawn; just the input while the dropdown
    /// has nothing to show.
    fn interactive_region(area: Rect, state: &AppState) -> Rect {
        let regions = layout::compute(area);
        if normalize_query(&state.search.query).is_empty() {
            return regions.add_search;
        }
        let dropdown = layout::dropdown_rect(&regions, Self::dropdown_lines(state));
        regions.add_search.union(dropdown)
    }

    /// Lines the dropdown needs: one per result, or one for a status message.
    pub fn dropdown_lines(state: &AppState) -> usize {
        rank(&state.search.query, state.catalog.entries()).len().max(1)
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::Char(c) => match self.state.focus {
                Focus::AddSearch => {
                    let mut query = self.state.search.query.clone();
                    query.push(c);
                    self.edit_query(query);
                }
                Focus::Filter => {
                    self.state.view.filter.push(c);
                    self.state.view.selected = 0;
                }
                Focus::Watchlist => {}
            },
            Action::Backspace => match self.state.focus {
                Focus::AddSearch => {
                    let mut query = self.state.search.query.clone();
                    if query.pop().is_some() {
                        self.edit_query(query);
                    }
                }
                Focus::Filter => {
                    self.state.view.filter.pop();
                    self.state.view.selected = 0;
                }
                Focus::Watchlist => {}
            },

            Action::FocusNext => self.set_focus(self.state.focus.next()),
            Action::FocusPrev => self.set_focus(self.state.focus.prev()),
            Action::FocusFilter => self.set_focus(Focus::Filter),
            Action::FocusAddSearch => self.set_focus(Focus::AddSearch),

            Action::Up => match self.state.focus {
                Focus::AddSearch => self.apply_selection(SelectionEvent::ArrowUp),
                _ => self.state.view.selected = self.state.view.selected.saturating_sub(1),
            },
            Action::Down => match self.state.focus {
                Focus::AddSearch => self.apply_selection(SelectionEvent::ArrowDown),
                _ => {
                    let visible = self.state.view.visible(self.watchlist.ids()).len();
                    if self.state.view.selected + 1 < visible {
                        self.state.view.selected += 1;
                    }
                }
            },
            Action::Confirm => match self.state.focus {
                Focus::AddSearch => self.apply_selection(SelectionEvent::Commit),
                Focus::Filter => self.set_focus(Focus::Watchlist),
                Focus::Watchlist => self.toggle_details(),
            },
            Action::Escape => match self.state.focus {
                Focus::AddSearch if self.state.search.dropdown.is_open() => {
                    self.apply_selection(SelectionEvent::Escape)
                }
                Focus::AddSearch | Focus::Filter => self.set_focus(Focus::Watchlist),
                Focus::Watchlist => {
                    self.state.notice = None;
                    self.state.view.expanded = None;
                }
            },

            Action::Remove => {
                if self.state.focus == Focus::Watchlist {
                    self.remove_selected();
                }
            }
            Action::Refresh => self.refresh(),

            Action::Pointer(event) => self.pointer(event),
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        let previous = self.state.focus;
        if previous == focus {
            return;
        }
        self.state.focus = focus;
        if previous == Focus::AddSearch {
            self.apply_selection(SelectionEvent::OutsideInteraction);
        }
        if focus == Focus::AddSearch {
            self.touch_catalog();
            self.apply_selection(SelectionEvent::FocusGained);
        }
    }

    fn edit_query(&mut self, query: String) {
        self.state.notice = None;
        self.touch_catalog();
        self.apply_selection(SelectionEvent::QueryChanged(query));
    }

    /// First interaction with the add-search control fetches the catalog.
    fn touch_catalog(&mut self) {
        if let Some(generation) = self.state.catalog.request() {
            self.fetcher.fetch_catalog(generation);
        }
    }

    /// Run one selection event against freshly ranked results.
    fn apply_selection(&mut self, event: SelectionEvent) {
        let query = match &event {
            SelectionEvent::QueryChanged(query) => query.as_str(),
            _ => self.state.search.query.as_str(),
        };
        let results = rank(query, self.state.catalog.entries());
        let transition = reduce(&self.state.search, event, &results);
        let committed = transition.committed.map(|entry| entry.id.clone());
        let previous = std::mem::replace(&mut self.state.search, transition.state);

        // A rejected pick keeps the query and results so another row can be chosen.
        if let Some(id) = committed {
            if !self.add_to_watchlist(&id) {
                self.state.search = previous;
            }
        }
        self.sync_dismissal();
    }

    /// Hold mouse capture exactly while the dropdown is open.
    fn sync_dismissal(&mut self) {
        let open = self.state.search.dropdown.is_open();
        match (open, self.dismissal.is_some()) {
            (true, false) => {
                let region = Self::interactive_region(self.viewport, &self.state);
                match DismissalGuard::arm((self.capture)(), region) {
                    Ok(guard) => self.dismissal = Some(guard),
                    Err(error) => warn!(%error, "mouse capture unavailable; outside clicks will not dismiss"),
                }
            }
            (true, true) => {
                let region = Self::interactive_region(self.viewport, &self.state);
                if let Some(guard) = self.dismissal.as_mut() {
                    guard.set_region(region);
                }
            }
            (false, true) => self.dismissal = None,
            (false, false) => {}
        }
    }

    #[cfg(test)]
    pub fn has_dismissal_guard(&self) -> bool {
        self.dismissal.is_some()
    }

    fn pointer(&mut self, event: crossterm::event::MouseEvent) {
        let Some(guard) = self.dismissal.as_ref() else {
            return;
        };
        if let Some(outside) = guard.observe(&event) {
            self.apply_selection(outside);
            return;
        }
        if !is_primary_press(&event) {
            return;
        }
        let regions = layout::compute(self.viewport);
        let total = rank(&self.state.search.query, self.state.catalog.entries()).len();
        let dropdown = layout::dropdown_rect(&regions, total.max(1));
        let highlighted = self.state.search.dropdown.highlighted().unwrap_or(0);
        let offset = layout::dropdown_offset(highlighted, layout::dropdown_capacity(dropdown));
        if let Some(index) = layout::dropdown_row_at(dropdown, offset, total, event.column, event.row) {
            self.apply_selection(SelectionEvent::PointerSelect(index));
        } else if regions.add_search.contains(ratatui::layout::Position { x: event.column, y: event.row }) {
            self.set_focus(Focus::AddSearch);
        }
    }

    /// True when the id was added.
    fn add_to_watchlist(&mut self, id: &str) -> bool {
        match self.watchlist.insert(id) {
            Ok(()) => {
                self.state.notice = None;
                self.surface_storage_error();
                self.request_quotes();
                true
            }
            Err(error @ WatchlistError::AlreadyPresent(_)) => {
                debug!(id, "duplicate add rejected");
                self.state.notice = Some(error.to_string());
                false
            }
            Err(WatchlistError::EmptyId) => false,
        }
    }

    fn remove_selected(&mut self) {
        let id = {
            let visible = self.state.view.visible(self.watchlist.ids());
            match visible.get(self.state.view.selected) {
                Some(quote) => quote.id.clone(),
                None => return,
            }
        };
        self.watchlist.remove(&id);
        self.surface_storage_error();
        self.state.view.quotes.retain(|q| q.id != id);
        self.state.view.details.remove(&id);
        if self.state.view.expanded.as_deref() == Some(id.as_str()) {
            self.state.view.expanded = None;
        }
        let visible = self.state.view.visible(self.watchlist.ids()).len();
        self.state.view.clamp_selection(visible);
        self.request_quotes();
    }

    fn toggle_details(&mut self) {
        let id = {
            let visible = self.state.view.visible(self.watchlist.ids());
            match visible.get(self.state.view.selected) {
                Some(quote) => quote.id.clone(),
                None => return,
            }
        };
        if self.state.view.expanded.as_deref() == Some(id.as_str()) {
            self.state.view.expanded = None;
            return;
        }
        if !self.state.view.details.contains_key(&id) {
            self.state.view.details.insert(id.clone(), DetailsState::Loading);
            self.fetcher.fetch_details(id.clone());
        }
        self.state.view.expanded = Some(id);
    }

    fn refresh(&mut self) {
        if self.quotes_in_flight {
            return;
        }
        self.state.view.details.clear();
        if let Some(id) = self.state.view.expanded.clone() {
            self.state.view.details.insert(id.clone(), DetailsState::Loading);
            self.fetcher.fetch_details(id);
        }
        self.request_quotes();
    }

    fn request_quotes(&mut self) {
        self.quotes_issued += 1;
        if self.watchlist.is_empty() {
            // Nothing to price; also invalidates any response still in flight.
            self.quotes_in_flight = false;
            self.state.view.quotes.clear();
            self.state.view.status = LoadStatus::Idle;
            return;
        }
        self.quotes_in_flight = true;
        self.state.view.status = LoadStatus::Loading;
        self.fetcher.fetch_quotes(self.quotes_issued, self.watchlist.ids().to_vec());
    }

    fn surface_storage_error(&mut self) {
        if let Some(error) = self.watchlist.take_storage_error() {
            self.state.notice = Some(format!("Could not save watchlist: {error}"));
        }
    }

    /// Apply everything the background fetcher has finished.
    pub fn poll_results(&mut self) {
        for result in self.fetcher.drain() {
            self.handle_fetch_result(result);
        }
    }

    fn handle_fetch_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Catalog { generation, result } => {
                let outcome = result.map_err(CatalogError::Unavailable);
                if self.state.catalog.complete(generation, outcome) {
                    self.apply_selection(SelectionEvent::ResultsRefreshed);
                }
            }
            FetchResult::Quotes { generation, result } => {
                if generation != self.quotes_issued {
                    debug!(generation, latest = self.quotes_issued, "dropping stale quotes");
                    return;
                }
                self.quotes_in_flight = false;
                match result {
                    Ok(mut quotes) => {
                        let ids = self.watchlist.ids();
                        quotes.retain(|q| ids.contains(&q.id));
                        quotes.sort_by_key(|q| ids.iter().position(|id| *id == q.id));
                        info!(count = quotes.len(), "quotes updated");
                        self.state.view.quotes = quotes;
                        self.state.view.status = LoadStatus::Ready;
                        self.state.view.has_loaded_once = true;
                    }
                    Err(error) => {
                        warn!(%error, "quote fetch failed");
                        self.state.view.status = LoadStatus::Failed(error);
                    }
                }
                let visible = self.state.view.visible(self.watchlist.ids()).len();
                self.state.view.clamp_selection(visible);
            }
            FetchResult::Details { id, result } => {
                // Dropped if a refresh or removal invalidated the request.
                if self.state.view.details.get(&id) != Some(&DetailsState::Loading) {
                    return;
                }
                let details = match result {
                    Ok(details) => DetailsState::Ready(details),
                    Err(error) => {
                        warn!(%id, %error, "details fetch failed");
                        DetailsState::Failed(error)
                    }
                };
                self.state.view.details.insert(id, details);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, CatalogStatus};
    use crate::fetcher::tests::FakeProvider;
    use crate::selection::DropdownState;
    use crate::storage::{KvStore, MemoryStore};
    use crate::watchlist::{DEFAULT_WATCHLIST, WATCHLIST_KEY};
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    struct Counting(Rc<Cell<i32>>);

    impl MouseCapture for Counting {
        fn enable(&mut self) -> std::io::Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }

        fn disable(&mut self) -> std::io::Result<()> {
            self.0.set(self.0.get() - 1);
            Ok(())
        }
    }

    struct Harness {
        app: App<MemoryStore>,
        captures: Rc<Cell<i32>>,
    }

    impl Harness {
        fn new(stored: &[&str], provider: FakeProvider) -> Self {
            let mut store = MemoryStore::new();
            if !stored.is_empty() {
                store.set_raw(WATCHLIST_KEY, &serde_json::to_string(stored).unwrap()).unwrap();
            }
            let captures = Rc::new(Cell::new(0));
            let counter = captures.clone();
            let capture: CaptureFactory =
                Box::new(move || Box::new(Counting(counter.clone())) as Box<dyn MouseCapture>);
            let fetcher = Fetcher::new(Arc::new(provider), "usd".into()).unwrap();
            let mut app = App::new(WatchlistStore::new(store), fetcher, capture);
            app.set_viewport(Rect::new(0, 0, 100, 40));
            app.bootstrap();
            let mut harness = Self { app, captures };
            if !harness.app.watchlist_ids().is_empty() {
                harness.settle(1);
            }
            harness
        }

        /// Wait for exactly `n` background results and apply them.
        fn settle(&mut self, n: usize) {
            for _ in 0..n {
                let result = self.app.fetcher.recv_blocking().expect("fetcher channel open");
                self.app.handle_fetch_result(result);
            }
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.app.dispatch(Action::Char(c));
            }
        }

        /// Focus the add-search box and let the catalog land.
        fn open_search(&mut self) {
            self.app.dispatch(Action::FocusAddSearch);
            self.settle(1);
            assert_eq!(self.app.state.catalog.status(), &CatalogStatus::Ready);
        }
    }

    fn catalog() -> FakeProvider {
        FakeProvider {
            catalog: vec![
                CatalogEntry::new("bitcoin", "Bitcoin", "btc"),
                CatalogEntry::new("bitcoin-cash", "Bitcoin Cash", "bch"),
                CatalogEntry::new("dogecoin", "Dogecoin", "doge"),
            ],
            ..FakeProvider::default()
        }
    }

    fn click(column: u16, row: u16) -> Action {
        Action::Pointer(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn bootstrap_seeds_defaults_and_prices_them() {
        let h = Harness::new(&[], catalog());
        assert_eq!(h.app.watchlist_ids(), DEFAULT_WATCHLIST);
        assert_eq!(h.app.state.view.status, LoadStatus::Ready);
        assert!(h.app.state.view.has_loaded_once);
        let ids: Vec<&str> = h.app.state.view.quotes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, DEFAULT_WATCHLIST);
    }

    #[test]
    fn catalog_is_fetched_only_after_first_interaction() {
        let mut h = Harness::new(&["bitcoin"], catalog());
        assert_eq!(h.app.state.catalog.status(), &CatalogStatus::NotFetched);
        h.open_search();
        h.app.dispatch(Action::FocusNext);
        h.app.dispatch(Action::FocusAddSearch);
        assert!(h.app.fetcher.drain().is_empty());
    }

    #[test]
    fn typing_ranks_and_enter_adds_to_watchlist() {
        let mut h = Harness::new(&["bitcoin"], catalog());
        h.open_search();
        h.type_text("DOGE");
        assert_eq!(h.app.state.search.dropdown, DropdownState::Open { highlighted: 0 });
        assert!(h.app.has_dismissal_guard());
        assert_eq!(h.captures.get(), 1);

        h.app.dispatch(Action::Confirm);
        assert_eq!(h.app.watchlist_ids(), ["bitcoin", "dogecoin"]);
        assert_eq!(h.app.state.search.query, "");
        assert_eq!(h.app.state.search.dropdown, DropdownState::Closed);
        assert!(!h.app.has_dismissal_guard());
        assert_eq!(h.captures.get(), 0);

        h.settle(1);
        let ids: Vec<&str> = h.app.state.view.quotes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["bitcoin", "dogecoin"]);
    }

    #[test]
    fn duplicate_add_shows_notice_and_edit_clears_it() {
        let mut h = Harness::new(&["bitcoin"], catalog());
        h.open_search();
        h.type_text("btc");
        h.app.dispatch(Action::Confirm);
        assert_eq!(h.app.watchlist_ids(), ["bitcoin"]);
        assert_eq!(h.app.state.notice.as_deref(), Some("Already in watchlist"));
        assert_eq!(h.app.state.search.query, "btc");
        assert!(h.app.state.search.dropdown.is_open());
        assert!(h.app.has_dismissal_guard());

        h.type_text("d");
        assert_eq!(h.app.state.notice, None);
    }

    #[test]
    fn duplicate_pick_lets_another_row_be_chosen() {
        let mut h = Harness::new(&["bitcoin"], catalog());
        h.open_search();
        h.type_text("bit");
        h.app.dispatch(Action::Confirm);
        assert_eq!(h.app.state.search.query, "bit");
        assert_eq!(h.app.state.search.dropdown.highlighted(), Some(0));

        h.app.dispatch(Action::Down);
        h.app.dispatch(Action::Confirm);
        assert_eq!(h.app.watchlist_ids(), ["bitcoin", "bitcoin-cash"]);
        assert_eq!(h.app.state.search.query, "");
        assert_eq!(h.app.state.search.dropdown, DropdownState::Closed);
        assert_eq!(h.captures.get(), 0);
    }

    #[test]
    fn click_below_empty_query_dismisses() {
        let mut h = Harness::new(&["dogecoin"], catalog());
        h.open_search();
        h.type_text("b");
        h.app.dispatch(Action::Backspace);
        assert!(h.app.state.search.dropdown.is_open());
        assert!(h.app.has_dismissal_guard());

        // Nothing is drawn under the input while the query is blank.
        let regions = layout::compute(Rect::new(0, 0, 100, 40));
        let dropdown = layout::dropdown_rect(&regions, 1);
        h.app.dispatch(click(dropdown.x + 2, dropdown.y + 1));
        assert_eq!(h.app.state.search.dropdown, DropdownState::Closed);
        assert!(!h.app.has_dismissal_guard());
        assert_eq!(h.captures.get(), 0);
    }

    #[test]
    fn arrows_wrap_through_results() {
        let mut h = Harness::new(&["dogecoin"], catalog());
        h.open_search();
        h.type_text("bit");
        h.app.dispatch(Action::Up);
        assert_eq!(h.app.state.search.dropdown, DropdownState::Open { highlighted: 1 });
        h.app.dispatch(Action::Down);
        assert_eq!(h.app.state.search.dropdown, DropdownState::Open { highlighted: 0 });
        h.app.dispatch(Action::Down);
        h.app.dispatch(Action::Confirm);
        assert_eq!(h.app.watchlist_ids(), ["dogecoin", "bitcoin-cash"]);
    }

    #[test]
    fn escape_closes_then_leaves_search() {
        let mut h = Harness::new(&["bitcoin"], catalog());
        h.open_search();
        h.type_text("bit");
        h.app.dispatch(Action::Escape);
        assert_eq!(h.app.state.search.dropdown, DropdownState::Closed);
        assert_eq!(h.app.state.search.query, "bit");
        assert_eq!(h.app.state.focus, Focus::AddSearch);
        h.app.dispatch(Action::Escape);
        assert_eq!(h.app.state.focus, Focus::Watchlist);

        h.app.dispatch(Action::FocusAddSearch);
        assert!(h.app.state.search.dropdown.is_open());
    }

    #[test]
    fn outside_click_dismisses_and_row_click_commits() {
        let mut h = Harness::new(&["dogecoin"], catalog());
        h.open_search();
        h.type_text("bit");
        h.app.dispatch(click(1, 30));
        assert_eq!(h.app.state.search.dropdown, DropdownState::Closed);
        assert_eq!(h.app.state.search.query, "bit");
        assert_eq!(h.captures.get(), 0);

        h.app.dispatch(Action::Down);
        assert!(h.app.has_dismissal_guard());
        let regions = layout::compute(Rect::new(0, 0, 100, 40));
        let dropdown = layout::dropdown_rect(&regions, 2);
        // Second result row sits two lines below the dropdown's top border.
        h.app.dispatch(click(dropdown.x + 2, dropdown.y + 2));
        assert_eq!(h.app.watchlist_ids(), ["dogecoin", "bitcoin-cash"]);
        assert_eq!(h.captures.get(), 0);
    }

    #[test]
    fn catalog_failure_leaves_empty_results_and_retries() {
        let mut h = Harness::new(&["bitcoin"], FakeProvider { fail_catalog: true, ..FakeProvider::default() });
        h.app.dispatch(Action::FocusAddSearch);
        h.settle(1);
        assert!(h.app.state.catalog.error().is_some());
        h.type_text("btc");
        assert_eq!(App::<MemoryStore>::dropdown_lines(&h.app.state), 1);
        h.app.dispatch(Action::Confirm);
        assert_eq!(h.app.watchlist_ids(), ["bitcoin"]);
        h.settle(1);
        assert!(h.app.state.catalog.error().is_some());
    }

    #[test]
    fn remove_selected_row_and_clear_storage_when_empty() {
        let mut h = Harness::new(&["bitcoin", "ethereum"], catalog());
        h.app.dispatch(Action::Down);
        h.app.dispatch(Action::Remove);
        assert_eq!(h.app.watchlist_ids(), ["bitcoin"]);
        assert_eq!(h.app.state.view.selected, 0);
        h.settle(1);

        h.app.dispatch(Action::Remove);
        assert!(h.app.watchlist_ids().is_empty());
        assert_eq!(h.app.state.view.status, LoadStatus::Idle);
        assert_eq!(h.app.watchlist.store().get_raw(WATCHLIST_KEY).unwrap(), None);
    }

    #[test]
    fn filter_narrows_rows() {
        let mut h = Harness::new(&["bitcoin", "ethereum"], catalog());
        h.app.dispatch(Action::FocusFilter);
        h.type_text("ETH");
        let visible = h.app.state.view.visible(h.app.watchlist_ids());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "ethereum");
        h.app.dispatch(Action::Confirm);
        assert_eq!(h.app.state.focus, Focus::Watchlist);
    }

    #[test]
    fn details_toggle_and_refresh() {
        let mut h = Harness::new(&["bitcoin"], catalog());
        h.app.dispatch(Action::Confirm);
        assert_eq!(h.app.state.view.expanded.as_deref(), Some("bitcoin"));
        assert_eq!(h.app.state.view.details.get("bitcoin"), Some(&DetailsState::Loading));
        h.settle(1);
        assert!(matches!(h.app.state.view.details.get("bitcoin"), Some(DetailsState::Ready(_))));

        h.app.dispatch(Action::Refresh);
        assert!(h.app.quotes_in_flight());
        h.app.dispatch(Action::Refresh);
        h.settle(2);
        assert!(!h.app.quotes_in_flight());
        assert!(matches!(h.app.state.view.details.get("bitcoin"), Some(DetailsState::Ready(_))));

        h.app.dispatch(Action::Confirm);
        assert_eq!(h.app.state.view.expanded, None);
    }

    #[test]
    fn stale_quotes_are_dropped() {
        let mut h = Harness::new(&["bitcoin"], catalog());
        h.app.handle_fetch_result(FetchResult::Quotes { generation: 0, result: Ok(Vec::new()) });
        assert_eq!(h.app.state.view.quotes.len(), 1);
    }
}
