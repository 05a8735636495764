//! App state: focus, add-search, catalog snapshot, watchlist rows.

use std::collections::HashMap;

use crate::backend::{CoinDetails, MarketQuote};
use crate::catalog::CatalogIndex;
use crate::selection::SearchState;
use crate::services::matches_filter;

/// Which control receives typed characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Watchlist,
    Filter,
    AddSearch,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Watchlist => Focus::Filter,
            Focus::Filter => Focus::AddSearch,
            Focus::AddSearch => Focus::Watchlist,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Watchlist => Focus::AddSearch,
            Focus::Filter => Focus::Watchlist,
            Focus::AddSearch => Focus::Filter,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailsState {
    Loading,
    Ready(CoinDetails),
    Failed(String),
}

/// Rows shown in the watchlist panel.
#[derive(Clone, Debug, Default)]
pub struct WatchlistView {
    /// Quotes in watchlist order, as of the last applied response.
    pub quotes: Vec<MarketQuote>,
    pub status: LoadStatus,
    pub has_loaded_once: bool,
    pub filter: String,
    /// Index into the visible (filtered) rows.
    pub selected: usize,
    pub expanded: Option<String>,
    pub details: HashMap<String, DetailsState>,
}

impl WatchlistView {
    /// Quotes for ids still tracked that pass the filter.
    pub fn visible<'a>(&'a self, tracked: &[String]) -> Vec<&'a MarketQuote> {
        self.quotes
            .iter()
            .filter(|q| tracked.contains(&q.id))
            .filter(|q| matches_filter(q, &self.filter))
            .collect()
    }

    pub fn clamp_selection(&mut self, visible_len: usize) {
        if self.selected >= visible_len {
            self.selected = visible_len.saturating_sub(1);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub focus: Focus,
    pub search: SearchState,
    pub catalog: CatalogIndex,
    pub view: WatchlistView,
    /// Transient, dismissible message (duplicate add, save failure).
    pub notice: Option<String>,
}
