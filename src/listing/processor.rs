//! The country list pipeline: filter by name, filter by region, sort, chunk.
//!
//! Every step is a total function over borrowed input. Nothing here allocates
//! new countries or mutates the catalog; the output rows are views over the
//! caller's slice, so re-running the pipeline after every keystroke is cheap.

use super::collation::NameCollator;
use super::grid::{chunk_rows, PresentationRow};
use crate::domain::{Country, FilterState, SortOrder};

/// Applies a [`FilterState`] to a country collection.
///
/// Holds the collator so it is built once per session rather than per call.
#[derive(Debug, Default)]
pub struct ListProcessor {
    collator: NameCollator,
}

impl ListProcessor {
    #[must_use]
    pub const fn new(collator: NameCollator) -> Self {
        Self { collator }
    }

    #[must_use]
    pub const fn collator(&self) -> &NameCollator {
        &self.collator
    }

    /// Filters, sorts, and chunks `countries` into presentation rows.
    ///
    /// Unmatched filters produce an empty result. Ties under the active sort key
    /// keep their order from `countries`.
    ///
    /// ```
    /// use countrydex::{Country, FilterState, SortOrder};
    /// use countrydex::listing::ListProcessor;
    ///
    /// let countries = vec![
    ///     Country::new("TCD", "Chad").with_population(17),
    ///     Country::new("CHL", "Chile").with_population(19),
    ///     Country::new("CHN", "China").with_population(1412),
    /// ];
    /// let state = FilterState::default().with_search("ch").with_sort(SortOrder::Population);
    ///
    /// let rows = ListProcessor::default().process(&countries, &state, 2);
    /// let names: Vec<Vec<&str>> = rows
    ///     .iter()
    ///     .map(|row| row.iter().map(|c| c.common_name.as_str()).collect())
    ///     .collect();
    /// assert_eq!(names, vec![vec!["China", "Chile"], vec!["Chad"]]);
    /// ```
    #[must_use]
    pub fn process<'a>(
        &self,
        countries: &'a [Country],
        state: &FilterState,
        column_count: usize,
    ) -> Vec<PresentationRow<'a>> {
        let ordered = self.arrange(countries, state);
        chunk_rows(&ordered, column_count)
    }

    /// Filters and sorts without chunking.
    #[must_use]
    pub fn arrange<'a>(&self, countries: &'a [Country], state: &FilterState) -> Vec<&'a Country> {
        let term = state.search_term.to_lowercase();
        let region = state.region();

        let mut ordered: Vec<&Country> = countries
            .iter()
            .filter(|country| matches_search(country, &term))
            .filter(|country| region.map_or(true, |r| country.region == r))
            .collect();

        self.sort(&mut ordered, state.sort_order);
        ordered
    }

    /// Stable in-place sort by the given order.
    pub fn sort(&self, countries: &mut [&Country], order: SortOrder) {
        match order {
            SortOrder::Alphabetical => {
                countries.sort_by(|a, b| self.collator.compare(&a.common_name, &b.common_name));
            }
            SortOrder::Population => countries.sort_by(|a, b| b.population.cmp(&a.population)),
            SortOrder::Area => countries.sort_by(|a, b| b.area.total_cmp(&a.area)),
            SortOrder::Unsorted => {}
        }
    }

    /// Distinct non-empty regions, in collation order.
    #[must_use]
    pub fn available_regions(&self, countries: &[Country]) -> Vec<String> {
        let mut regions: Vec<String> = Vec::new();
        for country in countries {
            if !country.region.is_empty() && !regions.contains(&country.region) {
                regions.push(country.region.clone());
            }
        }
        regions.sort_by(|a, b| self.collator.compare(a, b));
        regions
    }
}

/// Case-insensitive substring match on the common name.
///
/// `lowered_term` must already be lower-cased; an empty term matches everything.
#[must_use]
pub fn matches_search(country: &Country, lowered_term: &str) -> bool {
    lowered_term.is_empty() || country.common_name.to_lowercase().contains(lowered_term)
}

/// One-shot pipeline using the default collator.
#[must_use]
pub fn process<'a>(
    countries: &'a [Country],
    state: &FilterState,
    column_count: usize,
) -> Vec<PresentationRow<'a>> {
    ListProcessor::default().process(countries, state, column_count)
}
