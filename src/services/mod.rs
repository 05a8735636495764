//! Services: display formatting and the watchlist row filter.

mod format;

pub use format::{format_grouped, format_percent, format_price, format_updated, matches_filter};
