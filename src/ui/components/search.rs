//! Search bar component renderer.

use crate::ui::helpers::{print_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Height of the search box in lines.
pub const SEARCH_BOX_HEIGHT: usize = 3;

/// Renders the bordered search input box at the specified row.
///
/// ```text
/// [margin] ┌──────────────────────┐ [margin]
/// [margin] │ Search for a country │ [margin]
/// [margin] └──────────────────────┘ [margin]
/// ```
///
/// Shows a dimmed placeholder while the query is empty. Returns `row + 3`.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    let top = format!("{margin}{border}┌{}┐", "─".repeat(inner_width));
    print_line(row, &top, SEARCH_BOX_MARGIN + inner_width + 2, theme, cols);

    let (text_color, text) = if search.query.is_empty() {
        (&theme.colors.text_dim, " Search for a country…".to_string())
    } else {
        (&theme.colors.text_normal, format!(" {}", search.query))
    };
    let text = truncate(&text, inner_width);
    let padding = inner_width.saturating_sub(text.chars().count());
    let middle = format!(
        "{margin}{border}│{}{text}{}{border}│",
        Theme::fg(text_color),
        " ".repeat(padding)
    );
    print_line(row + 1, &middle, SEARCH_BOX_MARGIN + inner_width + 2, theme, cols);

    let bottom = format!("{margin}{border}└{}┘", "─".repeat(inner_width));
    print_line(row + 2, &bottom, SEARCH_BOX_MARGIN + inner_width + 2, theme, cols);

    row + SEARCH_BOX_HEIGHT
}
