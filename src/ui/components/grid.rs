//! Card grid renderer.
//!
//! Each country is drawn as a framed card; cards in one presentation row share
//! the pane width evenly.
//!
//! ```text
//! ╭──────────────────────╮╭──────────────────────╮
//! │ Chad                 ││ Chile                │
//! │ Population: 16,425,… ││ Population: 19,116,… │
//! │ Region: Africa       ││ Region: Americas     │
//! │ Capital: N'Djamena   ││ Capital: Santiago    │
//! ╰──────────────────────╯╰──────────────────────╯
//! ```

use crate::ui::helpers::{highlighted_text, print_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

/// Lines occupied by one card row, frame included.
pub const CARD_HEIGHT: usize = 6;

/// Renders presentation rows of cards starting at `row`; returns the next free row.
pub fn render_grid(
    row: usize,
    rows: &[Vec<CardItem>],
    column_count: usize,
    theme: &Theme,
    cols: usize,
) -> usize {
    let card_width = cols / column_count.max(1);
    let mut current_row = row;
    for cards in rows {
        render_card_row(current_row, cards, card_width, theme, cols);
        current_row += CARD_HEIGHT;
    }
    current_row
}

fn render_card_row(row: usize, cards: &[CardItem], card_width: usize, theme: &Theme, cols: usize) {
    let inner = card_width.saturating_sub(2);
    let used = card_width * cards.len();

    let frame = |left: char, right: char| {
        let mut line = String::new();
        for card in cards {
            line.push_str(&card_frame_color(card, theme));
            line.push(left);
            line.push_str(&"─".repeat(inner));
            line.push(right);
        }
        line
    };

    print_line(row, &frame('╭', '╮'), used, theme, cols);

    let mut name_line = String::new();
    for card in cards {
        name_line.push_str(&card_frame_color(card, theme));
        name_line.push('│');
        let restore = format!("{}{}", card_text_style(card, theme), Theme::bold());
        name_line.push_str(&restore);
        let name = truncate(&card.name, inner.saturating_sub(2));
        let visible = name.chars().count();
        name_line.push(' ');
        name_line.push_str(&highlighted_text(
            &name,
            &card.highlight_ranges,
            theme,
            card.is_selected,
            &restore,
        ));
        name_line.push_str(&" ".repeat(inner.saturating_sub(visible + 1)));
        name_line.push_str(Theme::reset());
        name_line.push_str(&theme.base());
        name_line.push_str(&card_frame_color(card, theme));
        name_line.push('│');
    }
    print_line(row + 1, &name_line, used, theme, cols);

    let facts: [fn(&CardItem) -> String; 3] = [
        |c| format!("Population: {}", c.population),
        |c| format!("Region: {}", c.region),
        |c| format!("Capital: {}", c.capital),
    ];
    for (offset, fact) in facts.iter().enumerate() {
        let mut line = String::new();
        for card in cards {
            line.push_str(&card_frame_color(card, theme));
            line.push('│');
            line.push_str(&card_text_style(card, theme));
            let text = truncate(&fact(card), inner.saturating_sub(2));
            let visible = text.chars().count();
            line.push(' ');
            line.push_str(&text);
            line.push_str(&" ".repeat(inner.saturating_sub(visible + 1)));
            line.push_str(&theme.base());
            line.push_str(&card_frame_color(card, theme));
            line.push('│');
        }
        print_line(row + 2 + offset, &line, used, theme, cols);
    }

    print_line(row + 5, &frame('╰', '╯'), used, theme, cols);
}

fn card_frame_color(card: &CardItem, theme: &Theme) -> String {
    if card.is_selected {
        Theme::fg(&theme.colors.selection_bg)
    } else {
        Theme::fg(&theme.colors.card_border)
    }
}

fn card_text_style(card: &CardItem, theme: &Theme) -> String {
    if card.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        theme.base()
    }
}
