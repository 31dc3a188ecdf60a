//! User-controlled list filter state.
//!
//! [`FilterState`] is the explicit input to the list pipeline: the search term,
//! the sort order, and the optional region filter. It is owned by the
//! application state and handed to [`crate::listing::ListProcessor`] by
//! reference on every invocation; the pipeline never mutates it.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Ordering applied to the filtered country list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending by common name under locale-aware collation.
    #[default]
    Alphabetical,
    /// Descending by population.
    Population,
    /// Descending by area.
    Area,
    /// Filtered order is passed through unchanged.
    Unsorted,
}

impl SortOrder {
    /// Next order in the `o` key cycle. `Unsorted` re-enters the cycle at the start.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Alphabetical => Self::Population,
            Self::Population => Self::Area,
            Self::Area | Self::Unsorted => Self::Alphabetical,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alphabetical => "alphabetical",
            Self::Population => "population",
            Self::Area => "area",
            Self::Unsorted => "unsorted",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a sort order name.
///
/// Unknown names map to [`SortOrder::Unsorted`] instead of failing.
///
/// ```
/// use countrydex::SortOrder;
///
/// assert_eq!("population".parse::<SortOrder>(), Ok(SortOrder::Population));
/// assert_eq!("by-vibes".parse::<SortOrder>(), Ok(SortOrder::Unsorted));
/// ```
impl FromStr for SortOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "alphabetical" => Self::Alphabetical,
            "population" => Self::Population,
            "area" => Self::Area,
            _ => Self::Unsorted,
        })
    }
}

/// Search, sort, and region selection for the country grid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring matched against the common name.
    pub search_term: String,
    pub sort_order: SortOrder,
    /// Exact region to keep. `None` and `Some("")` both mean "all regions".
    pub selected_region: Option<String>,
}

impl FilterState {
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.selected_region = Some(region.into());
        self
    }

    /// The active region filter, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.selected_region.as_deref().filter(|r| !r.is_empty())
    }

    /// Returns `true` when no filter narrows the list.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.region().is_none()
    }
}
