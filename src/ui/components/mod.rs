//! Composable UI component renderers.
//!
//! Each component draws one part of the screen and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title and status line
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box
//! - [`grid`]: Country card grid
//! - [`detail`]: Single-country panel with border links
//! - [`empty`]: Loading, no-match, and error messages
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header title]
//! [Header status]
//! [Border]
//! [Search Bar - 3 lines, search mode only]
//! [Body: grid, detail, or empty state]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod grid;
mod header;
mod search;

pub use grid::CARD_HEIGHT;

use crate::ui::helpers::{position_cursor, print_line};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use search::{render_search_bar, SEARCH_BOX_HEIGHT};

/// Row where the header starts (row 1 stays blank).
const HEADER_ROW: usize = 2;

/// Lines used by chrome outside the body: blank, header (2), two borders, footer.
const CHROME_LINES: usize = 6;

/// Lines available to the body for a pane of `rows` lines.
#[must_use]
pub const fn body_height(rows: usize, search_visible: bool) -> usize {
    let chrome = if search_visible {
        CHROME_LINES + SEARCH_BOX_HEIGHT
    } else {
        CHROME_LINES
    };
    rows.saturating_sub(chrome)
}

/// Number of card rows that fit in the body, never less than one.
#[must_use]
pub const fn visible_card_rows(rows: usize, search_visible: bool) -> usize {
    let fit = body_height(rows, search_visible) / CARD_HEIGHT;
    if fit == 0 {
        1
    } else {
        fit
    }
}

/// Renders a horizontal border line at the specified row.
///
/// Returns the next available row position (row + 1).
fn render_border(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", theme.base());
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen for a view model.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    for row in 1..=rows {
        print_line(row, "", 0, theme, cols);
    }

    let mut current_row = render_header(HEADER_ROW, &vm.header, theme, cols);
    current_row = render_border(current_row, theme, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    let footer_row = rows.max(current_row + 2);
    let border_row = footer_row - 1;

    if let Some(empty) = &vm.empty_state {
        let body = body_height(rows, vm.search_bar.is_some());
        render_empty_state(current_row + body / 3, empty, theme, cols);
    } else {
        match &vm.body {
            Body::Grid { rows: card_rows, column_count } => {
                render_grid(current_row, card_rows, *column_count, theme, cols);
            }
            Body::Detail(detail) => {
                render_detail(current_row, border_row, detail, theme, cols);
            }
        }
    }

    render_border(border_row, theme, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_bar_takes_body_lines() {
        assert_eq!(body_height(30, false), 24);
        assert_eq!(body_height(30, true), 21);
        assert_eq!(body_height(4, true), 0);
    }

    #[test]
    fn at_least_one_card_row_is_visible() {
        assert_eq!(visible_card_rows(30, false), 4);
        assert_eq!(visible_card_rows(30, true), 3);
        assert_eq!(visible_card_rows(5, false), 1);
    }
}
