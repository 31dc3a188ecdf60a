//! Detail panel renderer.
//!
//! Lays out one country as a bold title and a two-column fact list ending in
//! the border-country links. The focused link is drawn with selection colors.

use crate::domain::NOT_AVAILABLE;
use crate::ui::helpers::{print_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BorderItem, DetailView};

/// Left margin of the panel.
const MARGIN: usize = 4;

/// Width reserved for fact labels ("Currency Symbols: ").
const LABEL_WIDTH: usize = 18;

const BORDERS_LABEL: &str = "Borders";

/// Renders the detail panel starting at `row`, stopping before `last_row`.
pub fn render_detail(row: usize, last_row: usize, detail: &DetailView, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(MARGIN * 2);
    let margin = " ".repeat(MARGIN);
    let mut current = row + 1;

    let title = truncate(&detail.name, width);
    let line = format!(
        "{margin}{}{}{title}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg)
    );
    print_line(current, &line, MARGIN + title.chars().count(), theme, cols);
    current += 2;

    for (label, value) in &detail.fields {
        if current >= last_row {
            return;
        }
        let value = truncate(value, width.saturating_sub(LABEL_WIDTH));
        let (line, visible) = fact_line(label, &value, theme);
        print_line(current, &line, visible, theme, cols);
        current += 1;
    }

    for (line, visible) in border_lines(&detail.borders, theme, cols) {
        if current >= last_row {
            return;
        }
        print_line(current, &line, visible, theme, cols);
        current += 1;
    }
}

/// A bold `label:` padded to the label column, followed by `value`.
///
/// Returns the styled line and its visible width.
fn fact_line(label: &str, value: &str, theme: &Theme) -> (String, usize) {
    let label = format!("{label}:");
    let line = format!(
        "{}{}{}{label:<label_width$}{}{}{value}",
        " ".repeat(MARGIN),
        Theme::bold(),
        Theme::fg(&theme.colors.text_normal),
        Theme::reset(),
        theme.base(),
        label_width = LABEL_WIDTH,
    );
    let visible = MARGIN + LABEL_WIDTH.max(label.chars().count()) + value.chars().count();
    (line, visible)
}

/// The `Borders:` fact, with one link chip per neighbour, wrapped to `cols`.
///
/// Continuation lines are indented to the value column. A country without
/// neighbours gets `Borders: N/A`.
fn border_lines(borders: &[BorderItem], theme: &Theme, cols: usize) -> Vec<(String, usize)> {
    if borders.is_empty() {
        return vec![fact_line(BORDERS_LABEL, NOT_AVAILABLE, theme)];
    }

    let (first, indent) = fact_line(BORDERS_LABEL, "", theme);

    let mut lines = Vec::new();
    let mut line = first;
    let mut visible = indent;
    for border in borders {
        let chip = format!(" {} ", border.label);
        let chip_len = chip.chars().count() + 1;
        if visible + chip_len > cols && visible > indent {
            lines.push((std::mem::take(&mut line), visible));
            line = format!("{}{}", theme.base(), " ".repeat(indent));
            visible = indent;
        }
        if border.is_selected {
            line.push_str(&Theme::fg(&theme.colors.selection_fg));
            line.push_str(&Theme::bg(&theme.colors.selection_bg));
        } else {
            line.push_str(&Theme::fg(&theme.colors.link_fg));
            line.push_str(Theme::underline());
        }
        line.push_str(&chip);
        line.push_str(Theme::reset());
        line.push_str(&theme.base());
        line.push(' ');
        visible += chip_len;
    }
    lines.push((line, visible));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn border(label: &str, is_selected: bool) -> BorderItem {
        BorderItem {
            code: label.to_uppercase(),
            label: label.to_string(),
            is_selected,
        }
    }

    #[test]
    fn country_without_borders_shows_placeholder() {
        let theme = Theme::default();
        let lines = border_lines(&[], &theme, 80);
        assert_eq!(lines.len(), 1);
        let (line, visible) = &lines[0];
        assert!(line.contains("Borders:"));
        assert!(line.ends_with(NOT_AVAILABLE));
        assert_eq!(*visible, MARGIN + LABEL_WIDTH + NOT_AVAILABLE.len());
    }

    #[test]
    fn border_chips_follow_the_label() {
        let theme = Theme::default();
        let lines = border_lines(&[border("Bolivia", true), border("Chile", false)], &theme, 80);
        assert_eq!(lines.len(), 1);
        let (line, visible) = &lines[0];
        assert!(line.contains("Borders:"));
        assert!(line.contains(" Bolivia ") && line.contains(" Chile "));
        assert!(line.contains(&Theme::bg(&theme.colors.selection_bg)));
        // " Bolivia " + gap, " Chile " + gap
        assert_eq!(*visible, MARGIN + LABEL_WIDTH + 10 + 8);
    }

    #[test]
    fn border_chips_wrap_to_the_pane_width() {
        let theme = Theme::default();
        let borders: Vec<BorderItem> = ["Argentina", "Bolivia", "Brazil", "Chile", "Peru"]
            .iter()
            .map(|name| border(name, false))
            .collect();
        let lines = border_lines(&borders, &theme, 50);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|(_, visible)| *visible <= 50));
        assert!(!lines[1].0.contains("Borders:"));
    }
}
