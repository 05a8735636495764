//! Single-column layout plus the hit-test rectangles for the add-search
//! dropdown. The app uses the same functions as the renderer so clicks map to
//! exactly what was drawn.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use super::theme::{
    DROPDOWN_MAX_ROWS, HEADER_HEIGHT, INPUT_HEIGHT, MARGIN_X, MIN_LIST_LINES, NOTICE_HEIGHT, STATUS_HEIGHT,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutRegions {
    pub header: Rect,
    pub filter: Rect,
    pub add_search: Rect,
    pub notice: Rect,
    pub list: Rect,
    pub status: Rect,
}

pub fn compute(area: Rect) -> LayoutRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(NOTICE_HEIGHT),
            Constraint::Min(MIN_LIST_LINES),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let inputs_row = Rect {
        x: area.x + MARGIN_X,
        y: chunks[1].y,
        width: area.width.saturating_sub(2 * MARGIN_X),
        height: chunks[1].height,
    };
    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inputs_row);
    let list = Rect {
        x: area.x + MARGIN_X,
        y: chunks[3].y,
        width: area.width.saturating_sub(2 * MARGIN_X),
        height: chunks[3].height,
    };
    LayoutRegions {
        header: chunks[0],
        filter: inputs[0],
        add_search: inputs[1],
        notice: chunks[2],
        list,
        status: chunks[4],
    }
}

/// Bordered dropdown hanging below the add-search input, `lines` tall inside,
/// clipped so it never covers the status bar.
pub fn dropdown_rect(regions: &LayoutRegions, lines: usize) -> Rect {
    let anchor = regions.add_search;
    let top = anchor.y + anchor.height;
    let bottom = regions.status.y;
    let wanted = (lines.max(1) as u16).min(DROPDOWN_MAX_ROWS) + 2;
    Rect {
        x: anchor.x,
        y: top,
        width: anchor.width,
        height: wanted.min(bottom.saturating_sub(top)),
    }
}

/// Number of result rows the dropdown can show at once.
pub fn dropdown_capacity(dropdown: Rect) -> usize {
    dropdown.height.saturating_sub(2) as usize
}

/// First visible row so that `highlighted` stays on screen.
pub fn dropdown_offset(highlighted: usize, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    highlighted.saturating_sub(capacity - 1)
}

/// Result index under a click at `(column, row)`, if it hit a drawn row.
pub fn dropdown_row_at(dropdown: Rect, offset: usize, total: usize, column: u16, row: u16) -> Option<usize> {
    let inner = Rect {
        x: dropdown.x + 1,
        y: dropdown.y + 1,
        width: dropdown.width.saturating_sub(2),
        height: dropdown.height.saturating_sub(2),
    };
    if !inner.contains(Position { x: column, y: row }) {
        return None;
    }
    let index = offset + (row - inner.y) as usize;
    (index < total).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> LayoutRegions {
        compute(Rect::new(0, 0, 100, 40))
    }

    #[test]
    fn inputs_sit_side_by_side_under_header() {
        let r = regions();
        assert_eq!(r.filter.y, HEADER_HEIGHT);
        assert_eq!(r.add_search.y, HEADER_HEIGHT);
        assert_eq!(r.filter.x + r.filter.width, r.add_search.x);
        assert_eq!(r.status.y, 39);
    }

    #[test]
    fn dropdown_hangs_below_add_search() {
        let r = regions();
        let dd = dropdown_rect(&r, 3);
        assert_eq!(dd.x, r.add_search.x);
        assert_eq!(dd.y, r.add_search.y + INPUT_HEIGHT);
        assert_eq!(dd.height, 5);
        assert_eq!(dropdown_capacity(dd), 3);
        assert_eq!(dropdown_rect(&r, 20).height, DROPDOWN_MAX_ROWS + 2);
    }

    #[test]
    fn dropdown_is_clipped_on_small_terminals() {
        let r = compute(Rect::new(0, 0, 60, 14));
        let dd = dropdown_rect(&r, 20);
        assert!(dd.y + dd.height <= r.status.y);
    }

    #[test]
    fn offset_keeps_highlight_visible() {
        assert_eq!(dropdown_offset(0, 12), 0);
        assert_eq!(dropdown_offset(11, 12), 0);
        assert_eq!(dropdown_offset(15, 12), 4);
        assert_eq!(dropdown_offset(3, 0), 0);
    }

    #[test]
    fn clicks_map_to_rows() {
        let dd = Rect::new(50, 8, 40, 5);
        assert_eq!(dropdown_row_at(dd, 0, 3, 60, 9), Some(0));
        assert_eq!(dropdown_row_at(dd, 0, 3, 60, 11), Some(2));
        assert_eq!(dropdown_row_at(dd, 4, 10, 60, 10), Some(5));
        assert_eq!(dropdown_row_at(dd, 0, 2, 60, 11), None);
        assert_eq!(dropdown_row_at(dd, 0, 3, 50, 9), None);
        assert_eq!(dropdown_row_at(dd, 0, 3, 60, 8), None);
    }
}
