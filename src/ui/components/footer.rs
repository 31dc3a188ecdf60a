//! Footer component renderer.
//!
//! This module renders the footer help bar with centered keybinding hints.

use crate::ui::helpers::{print_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at the specified row.
///
/// Help text longer than the pane is cut with an ellipsis so narrow panes keep
/// their layout.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = help_text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    let line = format!(
        "{}{}{}",
        Theme::fg(&theme.colors.text_dim),
        " ".repeat(padding),
        help_text
    );
    print_line(row, &line, padding + text_len, theme, cols);
    row + 1
}
