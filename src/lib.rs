//! Countrydex: a Zellij plugin for browsing the countries of the world.
//!
//! Countrydex provides:
//! - A card grid of every country from the REST Countries API
//! - Case-insensitive name search with match highlighting
//! - Sorting by name (locale-aware collation), population, or area
//! - Region filtering
//! - A detail panel per country with navigable border countries
//! - Light and dark themes, plus custom TOML themes
//! - Payload decoding on a Zellij worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point, web requests
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, navigation stack                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Worker Layer  │
//! │ (ui/)         │   │ (catalog/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Requests    │   │ - JSON decode │
//! │ - Theming     │   │ - Decoding    │   │ - IPC bridge  │
//! │ - Components  │   │ - Cache       │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Listing (listing/) and Domain (domain/)            │  ← Pure pipeline and types
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use countrydex::{process, Country, FilterState, SortOrder};
//!
//! let countries = vec![
//!     Country::new("TCD", "Chad").with_population(17),
//!     Country::new("CHL", "Chile").with_population(19),
//!     Country::new("CHN", "China").with_population(1412),
//! ];
//! let state = FilterState::default().with_search("ch").with_sort(SortOrder::Population);
//! let rows = process(&countries, &state, 2);
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0][0].common_name, "China");
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod listing;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use catalog::{CountryCache, FetchRequest};
pub use domain::{Country, CountrydexError, FilterState, Result, SortOrder};
pub use listing::{process, ListProcessor, PresentationRow};
pub use ui::Theme;

use listing::{NameCollator, DEFAULT_CARD_WIDTH, DEFAULT_LOCALE};
use std::collections::BTreeMap;
use ui::PopulationFormatter;

/// Plugin configuration parsed from the Zellij layout or config file.
///
/// ```kdl
/// plugin location="file:countrydex.wasm" {
///     theme "dark"
///     card_width "36"
///     default_sort "population"
///     locale "en"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Built-in theme name: `light` or `dark`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file (`~` maps to the host home directory).
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,

    /// Card width in terminal cells; the column count is `pane width / card_width`.
    pub card_width: usize,

    /// Initial sort order. Unknown names fall back to no sorting.
    pub default_sort: SortOrder,

    /// BCP 47 locale for name collation and number grouping.
    pub locale: String,

    /// REST Countries base URL, without a trailing slash.
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: None,
            theme_file: None,
            trace_level: None,
            card_width: DEFAULT_CARD_WIDTH,
            default_sort: SortOrder::default(),
            locale: DEFAULT_LOCALE.to_string(),
            api_base_url: catalog::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or unparsable values fall back to their defaults; empty strings
    /// count as missing.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use countrydex::{Config, SortOrder};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("card_width".to_string(), "32".to_string());
    /// map.insert("default_sort".to_string(), "area".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.card_width, 32);
    /// assert_eq!(config.default_sort, SortOrder::Area);
    /// assert_eq!(config.locale, "en");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        let card_width = get("card_width")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|w| *w > 0)
            .unwrap_or(defaults.card_width);

        let default_sort = get("default_sort")
            .map_or(defaults.default_sort, |s| {
                s.to_lowercase().parse().unwrap_or(SortOrder::Unsorted)
            });

        Self {
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
            card_width,
            default_sort,
            locale: get("locale").unwrap_or(defaults.locale),
            api_base_url: get("api_base_url")
                .map_or(defaults.api_base_url, |url| url.trim_end_matches('/').to_string()),
        }
    }

    /// Resolves the configured theme, falling back to the light built-in.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from configuration.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        locale = %config.locale,
        card_width = config.card_width,
        default_sort = %config.default_sort,
        "initializing countrydex plugin"
    );

    let processor = ListProcessor::new(NameCollator::new_or_fallback(&config.locale));
    let filter = FilterState::default().with_sort(config.default_sort);

    AppState::new(config.theme())
        .with_processor(processor)
        .with_population_formatter(PopulationFormatter::new_or_fallback(&config.locale))
        .with_filter(filter)
        .with_card_width(config.card_width)
        .with_api_base_url(config.api_base_url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ThemeKind;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("card_width", "0"),
            ("locale", "  "),
            ("default_sort", "by-vibes"),
        ]));
        assert_eq!(config.card_width, DEFAULT_CARD_WIDTH);
        assert_eq!(config.locale, DEFAULT_LOCALE);
        assert_eq!(config.default_sort, SortOrder::Unsorted);
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = Config::from_zellij(&map(&[("api_base_url", "http://localhost:8080/v3.1/")]));
        assert_eq!(config.api_base_url, "http://localhost:8080/v3.1");
    }

    #[test]
    fn initialize_applies_theme_sort_and_width() {
        let config = Config::from_zellij(&map(&[
            ("theme", "dark"),
            ("default_sort", "Population"),
            ("card_width", "30"),
        ]));
        let mut state = initialize(&config);
        assert_eq!(state.theme().kind, ThemeKind::Dark);
        assert_eq!(state.filter.sort_order, SortOrder::Population);
        state.set_viewport(30, 90);
        assert_eq!(state.column_count(), 3);
    }

    #[test]
    fn unreadable_theme_file_uses_default() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".into()),
            theme_name: Some("dark".into()),
            ..Config::default()
        };
        assert_eq!(config.theme().kind, ThemeKind::Light);
    }
}
