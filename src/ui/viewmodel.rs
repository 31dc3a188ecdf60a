//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use countrydex::ui::viewmodel::{Body, CardItem, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Where in the World? (1) ".into(), subtitle: String::new() },
//!     footer: FooterInfo { keybindings: "q: quit".into() },
//!     search_bar: None,
//!     empty_state: None,
//!     body: Body::Grid {
//!         rows: vec![vec![CardItem {
//!             code: "PER".into(),
//!             name: "Peru".into(),
//!             capital: "Lima".into(),
//!             region: "Americas".into(),
//!             population: "32,971,846".into(),
//!             is_selected: true,
//!             highlight_ranges: vec![],
//!         }]],
//!         column_count: 1,
//!     },
//! };
//! assert!(matches!(vm.body, Body::Grid { .. }));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title, active filters).
    pub header: HeaderInfo,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Search bar information (when in search mode).
    pub search_bar: Option<SearchBarInfo>,

    /// Message shown instead of the body (loading, no matches, failure).
    pub empty_state: Option<EmptyState>,

    /// Screen content.
    pub body: Body,
}

/// Main content area.
#[derive(Debug, Clone)]
pub enum Body {
    /// Country card grid: visible rows only.
    Grid {
        rows: Vec<Vec<CardItem>>,
        /// Cards per row; sizes card width.
        column_count: usize,
    },
    /// Single-country detail panel.
    Detail(DetailView),
}

/// Display information for one country card.
#[derive(Debug, Clone)]
pub struct CardItem {
    pub code: String,
    pub name: String,
    pub capital: String,
    pub region: String,
    /// Locale-grouped population.
    pub population: String,
    pub is_selected: bool,
    /// Character ranges of `name` matching the search term (`(start, end)`, exclusive end).
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Detail panel for one country.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub name: String,
    /// Labelled facts in display order ("Capital", "Region", ...).
    pub fields: Vec<(String, String)>,
    pub borders: Vec<BorderItem>,
}

/// One neighbouring country in the detail view.
#[derive(Debug, Clone)]
pub struct BorderItem {
    pub code: String,
    /// Common name if the catalog knows the code, the code otherwise.
    pub label: String,
    pub is_selected: bool,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
    /// Secondary line (sort, region, fetch age).
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Tone of an empty state message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    Loading,
    NoMatches,
    Error,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub kind: EmptyKind,

    /// Primary message (e.g., "No countries match").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
}
