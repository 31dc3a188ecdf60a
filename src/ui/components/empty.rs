//! Empty state component renderer.
//!
//! Shown in place of the card grid while the catalog loads, when a filter
//! matches nothing, or when a fetch failed.

use crate::ui::helpers::{print_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyKind, EmptyState};

/// Renders a centered two-line message starting at `row`.
///
/// The message uses `error_fg` for failures and `empty_state_fg` otherwise.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let color = match empty.kind {
        EmptyKind::Error => &theme.colors.error_fg,
        EmptyKind::Loading | EmptyKind::NoMatches => &theme.colors.empty_state_fg,
    };

    let message = truncate(&empty.message, cols);
    let msg_len = message.chars().count();
    let msg_padding = cols.saturating_sub(msg_len) / 2;
    let line = format!(
        "{}{}{}{message}",
        Theme::bold(),
        Theme::fg(color),
        " ".repeat(msg_padding)
    );
    print_line(row, &line, msg_padding + msg_len, theme, cols);

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = subtitle.chars().count();
    let sub_padding = cols.saturating_sub(sub_len) / 2;
    let line = format!(
        "{}{}{subtitle}",
        Theme::fg(&theme.colors.text_dim),
        " ".repeat(sub_padding)
    );
    print_line(row + 1, &line, sub_padding + sub_len, theme, cols);
}
