//! Header component renderer.
//!
//! Renders the title line and the status subtitle (sort order, region filter,
//! catalog age) centered across the pane.

use crate::ui::helpers::{print_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the two-line header starting at `row`.
///
/// Returns the next available row position (row + 2).
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    let mut line = String::new();
    line.push_str(Theme::bold());
    line.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        line.push_str(&Theme::bg(bg));
    }
    line.push_str(&" ".repeat(padding));
    line.push_str(&title);
    line.push_str(&" ".repeat(cols.saturating_sub(padding + title_len)));
    line.push_str(Theme::reset());
    print_line(row, &line, cols, theme, cols);

    let subtitle = truncate(&header.subtitle, cols);
    let sub_len = subtitle.chars().count();
    let sub_padding = cols.saturating_sub(sub_len) / 2;
    let line = format!(
        "{}{}{}",
        Theme::fg(&theme.colors.text_dim),
        " ".repeat(sub_padding),
        subtitle
    );
    print_line(row + 1, &line, sub_padding + sub_len, theme, cols);

    row + 2
}
