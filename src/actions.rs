//! User and system actions.

use crossterm::event::MouseEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Char(char),
    Backspace,

    FocusNext,
    FocusPrev,
    FocusFilter,
    FocusAddSearch,

    Up,
    Down,
    Confirm,
    Escape,

    Remove,
    Refresh,

    Pointer(MouseEvent),
}
