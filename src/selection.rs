//! Dropdown selection state machine for the add-search control.
//!
//! The state is a plain value; [`reduce`] maps `(state, event, results)` to the
//! next state plus the entry committed by that event, if any. Results are the
//! ranked list for the state's query and are recomputed by the caller on every
//! event, so the reducer never caches them.

/// Visibility and highlight of the dropdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open { highlighted: usize },
}

impl DropdownState {
    pub fn is_open(&self) -> bool {
        matches!(self, DropdownState::Open { .. })
    }

    pub fn highlighted(&self) -> Option<usize> {
        match self {
            DropdownState::Open { highlighted } => Some(*highlighted),
            DropdownState::Closed => None,
        }
    }
}

/// Query text together with the dropdown it drives.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SearchState {
    pub query: String,
    pub dropdown: DropdownState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The user edited the query; carries the new text.
    QueryChanged(String),
    /// The input gained focus.
    FocusGained,
    /// The result list changed without a query edit (new catalog snapshot).
    ResultsRefreshed,
    ArrowDown,
    ArrowUp,
    Commit,
    Escape,
    OutsideInteraction,
    PointerSelect(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition<T> {
    pub state: SearchState,
    pub committed: Option<T>,
}

impl<T> Transition<T> {
    fn to(state: SearchState) -> Self {
        Self { state, committed: None }
    }
}

/// Keep a previous highlight if it still points into `len` results, else 0.
fn clamp(highlighted: usize, len: usize) -> usize {
    if highlighted < len {
        highlighted
    } else {
        0
    }
}

pub fn reduce<T: Clone>(state: &SearchState, event: SelectionEvent, results: &[T]) -> Transition<T> {
    let len = results.len();
    let mut next = state.clone();
    if let DropdownState::Open { highlighted } = next.dropdown {
        next.dropdown = DropdownState::Open { highlighted: clamp(highlighted, len) };
    }

    match event {
        SelectionEvent::QueryChanged(query) => {
            // Editing keeps the dropdown open even with nothing to show, so it
            // can render its empty or loading message.
            let previous = next.dropdown.highlighted().unwrap_or(0);
            next.query = query;
            next.dropdown = DropdownState::Open { highlighted: clamp(previous, len) };
            Transition::to(next)
        }
        SelectionEvent::FocusGained => {
            if !next.query.trim().is_empty() && !next.dropdown.is_open() {
                next.dropdown = DropdownState::Open { highlighted: 0 };
            }
            Transition::to(next)
        }
        SelectionEvent::ResultsRefreshed => Transition::to(next),
        SelectionEvent::ArrowDown | SelectionEvent::ArrowUp if len == 0 => Transition::to(next),
        SelectionEvent::ArrowDown => {
            next.dropdown = match next.dropdown {
                DropdownState::Closed => DropdownState::Open { highlighted: 0 },
                DropdownState::Open { highlighted } => DropdownState::Open {
                    highlighted: (highlighted + 1) % len,
                },
            };
            Transition::to(next)
        }
        SelectionEvent::ArrowUp => {
            next.dropdown = match next.dropdown {
                DropdownState::Closed => DropdownState::Open { highlighted: 0 },
                DropdownState::Open { highlighted } => DropdownState::Open {
                    highlighted: (highlighted + len - 1) % len,
                },
            };
            Transition::to(next)
        }
        SelectionEvent::Commit => match next.dropdown {
            DropdownState::Open { highlighted } if len > 0 => commit(next, &results[highlighted]),
            _ => Transition::to(next),
        },
        SelectionEvent::PointerSelect(index) => match next.dropdown {
            DropdownState::Open { .. } if index < len => commit(next, &results[index]),
            _ => Transition::to(next),
        },
        SelectionEvent::Escape | SelectionEvent::OutsideInteraction => {
            next.dropdown = DropdownState::Closed;
            Transition::to(next)
        }
    }
}

fn commit<T: Clone>(mut next: SearchState, chosen: &T) -> Transition<T> {
    next.query.clear();
    next.dropdown = DropdownState::Closed;
    Transition { state: next, committed: Some(chosen.clone()) }
}
