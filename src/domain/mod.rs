//! Domain layer for the Countrydex plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs, the REST wire format, or rendering concerns.
//!
//! # Organization
//!
//! - [`country`]: Country model and display helpers
//! - [`filter`]: Search/sort/region state fed to the list pipeline
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use countrydex::domain::{Country, FilterState, SortOrder};
//!
//! let state = FilterState::default().with_sort(SortOrder::Area);
//! let country = Country::new("FRA", "France").with_area(551_695.0);
//! assert_eq!(state.sort_order, SortOrder::Area);
//! assert_eq!(country.code, "FRA");
//! ```

pub mod country;
pub mod error;
pub mod filter;

pub use country::{Country, Currency, NativeName, NOT_AVAILABLE};
pub use error::{CountrydexError, Result};
pub use filter::{FilterState, SortOrder};
