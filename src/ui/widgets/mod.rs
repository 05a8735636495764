//! TUI widgets: header, text inputs, dropdown, watchlist, status.

mod dropdown;
mod header;
mod input;
mod status;
mod watchlist;

pub use dropdown::render as render_dropdown;
pub use header::render as render_header;
pub use input::render as render_input;
pub use status::render as render_status;
pub use watchlist::render as render_watchlist;
