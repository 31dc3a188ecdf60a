//! Grid layout arithmetic: column counts and row chunking.

use crate::domain::Country;

/// Default card width in terminal cells.
pub const DEFAULT_CARD_WIDTH: usize = 40;

/// One horizontal run of cards. Every row holds exactly `column_count`
/// countries except possibly the last.
pub type PresentationRow<'a> = Vec<&'a Country>;

/// Number of cards per grid row for a viewport.
///
/// `max(1, viewport_width / card_width)`. A zero card width is treated as 1.
///
/// ```
/// use countrydex::listing::column_count;
///
/// assert_eq!(column_count(1200, 400), 3);
/// assert_eq!(column_count(399, 400), 1);
/// assert_eq!(column_count(0, 40), 1);
/// ```
#[must_use]
pub fn column_count(viewport_width: usize, card_width: usize) -> usize {
    (viewport_width / card_width.max(1)).max(1)
}

/// Splits an ordered list into consecutive rows of `column_count` items.
///
/// A `column_count` of 0 is clamped to 1.
#[must_use]
pub fn chunk_rows<'a>(ordered: &[&'a Country], column_count: usize) -> Vec<PresentationRow<'a>> {
    ordered
        .chunks(column_count.max(1))
        .map(<[&Country]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries(n: usize) -> Vec<Country> {
        (0..n)
            .map(|i| Country::new(format!("C{i:02}"), format!("Country {i}")))
            .collect()
    }

    #[test]
    fn last_row_holds_the_remainder() {
        let all = countries(7);
        let refs: Vec<&Country> = all.iter().collect();
        let rows = chunk_rows(&refs, 3);
        let sizes: Vec<usize> = rows.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn fewer_items_than_columns_is_a_single_row() {
        let all = countries(2);
        let refs: Vec<&Country> = all.iter().collect();
        assert_eq!(chunk_rows(&refs, 5).len(), 1);
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(chunk_rows(&[], 4).is_empty());
    }

    #[test]
    fn zero_columns_is_clamped() {
        let all = countries(3);
        let refs: Vec<&Country> = all.iter().collect();
        assert_eq!(chunk_rows(&refs, 0).len(), 3);
    }

    #[test]
    fn column_count_follows_card_width() {
        assert_eq!(column_count(120, DEFAULT_CARD_WIDTH), 3);
        assert_eq!(column_count(79, DEFAULT_CARD_WIDTH), 1);
        assert_eq!(column_count(80, 0), 80);
    }
}
