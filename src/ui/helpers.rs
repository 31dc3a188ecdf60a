//! Shared rendering utilities and helpers.
//!
//! Cursor positioning, width-aware truncation, and search-match highlighting.
//! Functions that produce styled text return `String` so components can pad
//! and compose them before printing.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Truncates `text` to at most `width` characters, ending with `…` when cut.
///
/// ```
/// use countrydex::ui::helpers::truncate;
///
/// assert_eq!(truncate("Saint Vincent and the Grenadines", 12), "Saint Vince…");
/// assert_eq!(truncate("Peru", 12), "Peru");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Character ranges of `text` that contain `term`, case-insensitively.
///
/// Matching mirrors the list filter (lower-cased substring). Returns no ranges
/// when lower-casing changes the character count, since indices would no
/// longer line up with the displayed text.
#[must_use]
pub fn match_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    if term.is_empty() {
        return vec![];
    }
    let lowered = text.to_lowercase();
    let needle = term.to_lowercase();
    if lowered.chars().count() != text.chars().count() {
        return vec![];
    }

    let needle_chars = needle.chars().count();
    let mut ranges = Vec::new();
    let mut search_from = 0;
    while let Some(found) = lowered[search_from..].find(&needle) {
        let byte_start = search_from + found;
        let start = lowered[..byte_start].chars().count();
        ranges.push((start, start + needle_chars));
        search_from = byte_start + needle.len();
        if needle.is_empty() || search_from >= lowered.len() {
            break;
        }
    }
    ranges
}

/// Renders text with highlighted character ranges for search matches.
///
/// Highlighted sections use match highlight colors unless the item is
/// selected, in which case selection colors take precedence. After each
/// highlight the `restore` style is re-applied.
#[must_use]
pub fn highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) -> String {
    if ranges.is_empty() || is_selected {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            out.extend(&chars[current_pos..start]);
        }

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start.max(current_pos)..end.max(start)]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end.max(current_pos);
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
    out
}

/// Prints `content` padded with the theme background to the full pane width.
///
/// `visible_len` is the number of printable characters in `content`.
pub fn print_line(row: usize, content: &str, visible_len: usize, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", theme.base());
    print!("{content}");
    print!("{}", theme.base());
    print!("{}", " ".repeat(cols.saturating_sub(visible_len)));
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_every_case_insensitive_occurrence() {
        assert_eq!(match_ranges("Bahamas", "a"), vec![(1, 2), (3, 4), (5, 6)]);
        assert_eq!(match_ranges("Chile", "CH"), vec![(0, 2)]);
        assert!(match_ranges("Chile", "zz").is_empty());
        assert!(match_ranges("Chile", "").is_empty());
    }

    #[test]
    fn ranges_are_character_indices() {
        assert_eq!(match_ranges("Côte d'Ivoire", "d'i"), vec![(5, 8)]);
    }

    #[test]
    fn highlight_wraps_matches_only() {
        let theme = Theme::default();
        let out = highlighted_text("Chile", &[(0, 2)], &theme, false, "");
        assert!(out.starts_with(&Theme::fg(&theme.colors.match_highlight_fg)));
        assert!(out.ends_with("ile"));
        assert_eq!(highlighted_text("Chile", &[(0, 2)], &theme, true, ""), "Chile");
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("Åland Islands", 6), "Åland…");
        assert_eq!(truncate("abc", 0), "");
    }
}
