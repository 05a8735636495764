//! UI layer: layout, theme, renderer, widgets.

pub mod layout;
mod renderer;
mod theme;

pub mod widgets;

pub use renderer::render;
