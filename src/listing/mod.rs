//! Country list pipeline.
//!
//! Turns the full catalog plus the user's [`FilterState`](crate::domain::FilterState)
//! into the rows of the card grid:
//!
//! ```text
//! &[Country] → filter(name) → filter(region) → sort → chunk(columns) → Vec<PresentationRow>
//! ```
//!
//! # Modules
//!
//! - [`processor`]: Filtering and sorting ([`ListProcessor`])
//! - [`collation`]: Locale-aware name comparison
//! - [`grid`]: Column count and row chunking

pub mod collation;
pub mod grid;
pub mod processor;

pub use collation::{NameCollator, DEFAULT_LOCALE};
pub use grid::{chunk_rows, column_count, PresentationRow, DEFAULT_CARD_WIDTH};
pub use processor::{matches_search, process, ListProcessor};
