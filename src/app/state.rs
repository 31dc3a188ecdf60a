//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for transient UI state. Core
//! data (the country cache) is kept apart from the user's choices (filter,
//! selection, navigation); the filtered and sorted list is never stored but
//! derived through the [`ListProcessor`] whenever it is needed.
//!
//! # Example
//!
//! ```rust
//! use countrydex::app::AppState;
//! use countrydex::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! state.set_viewport(30, 120);
//! assert_eq!(state.column_count(), 3);
//! let viewmodel = state.compute_viewmodel(30, 120);
//! assert!(viewmodel.empty_state.is_some()); // nothing loaded yet
//! ```

use super::modes::{InputMode, Navigation, SearchFocus};
use crate::catalog::{CatalogStatus, CountryCache, DEFAULT_BASE_URL};
use crate::domain::{Country, FilterState, NOT_AVAILABLE};
use crate::listing::{self, ListProcessor, DEFAULT_CARD_WIDTH};
use crate::ui::components::visible_card_rows;
use crate::ui::format::{compact_population, time_ago, PopulationFormatter};
use crate::ui::helpers::match_ranges;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BorderItem, Body, CardItem, DetailView, EmptyKind, EmptyState, FooterInfo, HeaderInfo,
    SearchBarInfo, UIViewModel,
};

/// Title shown in the header on every screen.
const APP_TITLE: &str = "Where in the World?";

/// Whether the host has granted web access.
///
/// Requests are only issued once access is `Granted`; lookups made before then
/// stay queued in the cache and are replayed on grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebAccess {
    /// Permission requested, no answer yet.
    Pending,
    /// The plugin may call `web_request`.
    Granted,
    /// The user refused; the grid shows an error state.
    Denied,
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input, fetch results, and
/// worker responses. View models are computed on demand.
#[derive(Debug)]
pub struct AppState {
    /// Catalog and per-country cache.
    ///
    /// Shared by the grid and the detail view. Filled by decoded worker
    /// responses; never holds a derived (filtered or sorted) list.
    cache: CountryCache,

    /// Search term, sort order, and region filter.
    ///
    /// Edited by search, sort, and region events. Applied on demand through
    /// `processor` whenever the arranged list is needed.
    pub filter: FilterState,

    /// Filter/sort/chunk pipeline with the session's collator.
    ///
    /// Built once from the configured locale so alphabetical order is stable
    /// for the whole session.
    processor: ListProcessor,

    /// Locale-aware population formatter for cards.
    ///
    /// The detail view uses the compact form instead.
    population: PopulationFormatter,

    /// Color scheme for UI rendering.
    ///
    /// Loaded from configuration on startup and swapped by `ToggleTheme`.
    theme: Theme,

    /// Current input handling mode.
    ///
    /// Determines active keybindings and whether the search bar is shown.
    pub input_mode: InputMode,

    /// Open detail panels; empty means the grid is shown.
    ///
    /// Pushed by opening a country or border, popped by `Back`.
    pub navigation: Navigation,

    /// Zero-based index into the arranged country list.
    ///
    /// Clamped after every filter, catalog, or viewport change.
    selected_index: usize,

    /// Pane height in rows, from the last render.
    ///
    /// Zero until the first `Resize` event arrives.
    viewport_rows: usize,

    /// Pane width in columns, from the last render.
    ///
    /// Together with `card_width` this fixes the grid's column count.
    viewport_cols: usize,

    /// Card width in cells used to derive the column count.
    ///
    /// Never zero.
    card_width: usize,

    /// REST Countries base URL, without a trailing slash.
    ///
    /// Shown as the loading subtitle and used by the handler to build request
    /// URLs.
    api_base_url: String,

    /// Web access permission reported by the host.
    ///
    /// Updated by `PermissionsGranted` and `PermissionsDenied` events.
    pub web_access: WebAccess,
}

impl AppState {
    /// Creates an empty state with default settings.
    ///
    /// Nothing is loaded and web access is pending. The list processor and
    /// population formatter use the default locale until replaced by the
    /// `with_*` builders.
    ///
    /// # Parameters
    ///
    /// * `theme` - Color scheme for UI rendering
    ///
    /// # Example
    ///
    /// ```rust
    /// use countrydex::app::{AppState, WebAccess};
    /// use countrydex::ui::Theme;
    ///
    /// let state = AppState::new(Theme::default());
    /// assert_eq!(state.selected_index(), 0);
    /// assert_eq!(state.web_access, WebAccess::Pending);
    /// ```
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            cache: CountryCache::new(),
            filter: FilterState::default(),
            processor: ListProcessor::default(),
            population: PopulationFormatter::default(),
            theme,
            input_mode: InputMode::Normal,
            navigation: Navigation::default(),
            selected_index: 0,
            viewport_rows: 0,
            viewport_cols: 0,
            card_width: DEFAULT_CARD_WIDTH,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            web_access: WebAccess::Pending,
        }
    }

    /// Replaces the list processor, typically with one for the configured locale.
    #[must_use]
    pub fn with_processor(mut self, processor: ListProcessor) -> Self {
        self.processor = processor;
        self
    }

    /// Replaces the card population formatter.
    #[must_use]
    pub fn with_population_formatter(mut self, population: PopulationFormatter) -> Self {
        self.population = population;
        self
    }

    /// Starts the session with a preset filter (sort order, region, or search).
    #[must_use]
    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the card width used for column layout; zero is raised to one.
    #[must_use]
    pub fn with_card_width(mut self, card_width: usize) -> Self {
        self.card_width = card_width.max(1);
        self
    }

    /// Sets the REST Countries base URL, dropping trailing slashes.
    ///
    /// ```rust
    /// use countrydex::app::AppState;
    /// use countrydex::ui::Theme;
    ///
    /// let state = AppState::new(Theme::default()).with_api_base_url("http://localhost:8080/v3.1/");
    /// assert_eq!(state.api_base_url(), "http://localhost:8080/v3.1");
    /// ```
    #[must_use]
    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Active color scheme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Switches between the light and dark built-in themes.
    ///
    /// A custom theme is replaced by the built-in theme of the opposite kind.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = %self.theme.name, "theme toggled");
    }

    /// Read access to the country cache.
    #[must_use]
    pub const fn cache(&self) -> &CountryCache {
        &self.cache
    }

    /// Write access to the country cache, for the event handler.
    ///
    /// Callers that change the catalog should follow up with
    /// [`AppState::clamp_selection`].
    pub fn cache_mut(&mut self) -> &mut CountryCache {
        &mut self.cache
    }

    /// Base URL requests are built from.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Zero-based index of the selected card in the arranged list.
    ///
    /// Always `0` when the list is empty.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Last known pane size as `(rows, cols)`.
    #[must_use]
    pub const fn viewport(&self) -> (usize, usize) {
        (self.viewport_rows, self.viewport_cols)
    }

    /// Records the pane size; returns `true` if it changed.
    ///
    /// A new width can change the column count, so the selection is clamped
    /// again after every change.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) -> bool {
        if (rows, cols) == (self.viewport_rows, self.viewport_cols) {
            return false;
        }
        tracing::debug!(rows, cols, "viewport resized");
        self.viewport_rows = rows;
        self.viewport_cols = cols;
        self.clamp_selection();
        true
    }

    /// Cards per grid row for the current viewport.
    ///
    /// At least one, even before the first render.
    #[must_use]
    pub fn column_count(&self) -> usize {
        listing::column_count(self.viewport_cols, self.card_width)
    }

    /// The catalog filtered and sorted by the current filter state.
    ///
    /// Recomputed on every call. Selection indices refer to this order.
    #[must_use]
    pub fn arranged(&self) -> Vec<&Country> {
        self.processor.arrange(self.cache.countries(), &self.filter)
    }

    /// The country under the grid selection, if any.
    ///
    /// # Returns
    ///
    /// - `Some(&Country)` if the arranged list is non-empty
    /// - `None` while loading or when no country matches the filters
    #[must_use]
    pub fn selected_country(&self) -> Option<&Country> {
        self.arranged().get(self.selected_index).copied()
    }

    /// Keeps the selection inside the arranged list.
    ///
    /// Called after any change that can shrink the list: filters, catalog
    /// loads, and resizes.
    pub fn clamp_selection(&mut self) {
        let len = self.arranged().len();
        self.selected_index = if len == 0 {
            0
        } else {
            self.selected_index.min(len - 1)
        };
    }

    /// Moves one card right, wrapping to the first card after the last.
    ///
    /// No-op if the arranged list is empty.
    pub fn move_selection_right(&mut self) {
        let len = self.arranged().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves one card left, wrapping to the last card before the first.
    ///
    /// No-op if the arranged list is empty.
    pub fn move_selection_left(&mut self) {
        let len = self.arranged().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Moves one row down in the same column, wrapping to the top row.
    ///
    /// From a card with nothing below it (a short last row), wraps to the
    /// same column in the first row.
    ///
    /// ```rust
    /// use countrydex::app::AppState;
    /// use countrydex::ui::Theme;
    ///
    /// let mut state = AppState::new(Theme::default());
    /// state.move_selection_down(); // empty list
    /// assert_eq!(state.selected_index(), 0);
    /// ```
    pub fn move_selection_down(&mut self) {
        let len = self.arranged().len();
        if len == 0 {
            return;
        }
        let columns = self.column_count();
        let next = self.selected_index + columns;
        self.selected_index = if next < len {
            next
        } else {
            self.selected_index % columns
        };
    }

    /// Moves one row up in the same column, wrapping to the bottom row.
    ///
    /// If the last row is too short to have that column, lands on the row
    /// above it instead.
    pub fn move_selection_up(&mut self) {
        let len = self.arranged().len();
        if len == 0 {
            return;
        }
        let columns = self.column_count();
        if self.selected_index >= columns {
            self.selected_index -= columns;
            return;
        }
        let column = self.selected_index % columns;
        let last_row_start = (len - 1) / columns * columns;
        let candidate = last_row_start + column;
        self.selected_index = if candidate < len {
            candidate
        } else {
            candidate.saturating_sub(columns)
        };
    }

    /// Border codes of the country in the open detail panel.
    ///
    /// Empty on the grid, while the country is still loading, and for
    /// countries without land borders.
    #[must_use]
    pub fn current_borders(&self) -> &[String] {
        self.navigation
            .current()
            .and_then(|cursor| self.cache.get(&cursor.code))
            .map(|country| country.borders.as_slice())
            .unwrap_or_default()
    }

    /// Moves the border focus one step, wrapping at both ends.
    ///
    /// # Parameters
    ///
    /// * `forward` - `true` for the next border, `false` for the previous one
    pub fn move_border_focus(&mut self, forward: bool) {
        let len = self.current_borders().len();
        let Some(cursor) = self.navigation.current_mut() else {
            return;
        };
        if len == 0 {
            cursor.border_index = 0;
            return;
        }
        cursor.border_index = if forward {
            (cursor.border_index + 1) % len
        } else if cursor.border_index == 0 {
            len - 1
        } else {
            cursor.border_index - 1
        };
    }

    /// Code of the focused border country in the open detail panel.
    ///
    /// `None` on the grid or when the country has no borders.
    #[must_use]
    pub fn selected_border(&self) -> Option<&str> {
        let cursor = self.navigation.current()?;
        self.current_borders()
            .get(cursor.border_index)
            .map(String::as_str)
    }

    /// Advances the region filter: all regions → first → … → last → all regions.
    ///
    /// Regions come from the loaded catalog in collation order, so nothing
    /// happens before the catalog arrives.
    pub fn cycle_region(&mut self) {
        let regions = self.processor.available_regions(self.cache.countries());
        let next = match self.filter.region() {
            None => regions.first().cloned(),
            Some(current) => regions
                .iter()
                .position(|r| r == current)
                .and_then(|i| regions.get(i + 1))
                .cloned(),
        };
        tracing::debug!(region = ?next, "region filter changed");
        self.filter.selected_region = next;
        self.clamp_selection();
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    ///
    /// With a detail panel open the body is that country's detail, or an
    /// empty state while it loads or after its fetch failed. Otherwise the
    /// body is the card grid windowed around the selected row.
    ///
    /// # Grid Windowing
    ///
    /// 1. **Chunk**: The arranged list is split into rows of `column_count`
    /// 2. **Fit**: As many rows as fit below the header (and search bar) are kept
    /// 3. **Center**: The window is centered on the selected row where possible
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let column_count = listing::column_count(cols, self.card_width);
        let search_bar = self.compute_search_bar();
        let footer = self.compute_footer();

        if let Some(cursor) = self.navigation.current() {
            let (body, empty_state) = match self.cache.get(&cursor.code) {
                Some(country) => (
                    Body::Detail(self.compute_detail(country, cursor.border_index)),
                    None,
                ),
                None => (
                    Body::Grid {
                        rows: vec![],
                        column_count,
                    },
                    Some(self.compute_detail_unavailable(&cursor.code)),
                ),
            };
            return UIViewModel {
                header: self.compute_detail_header(),
                footer,
                search_bar: None,
                empty_state,
                body,
            };
        }

        let presentation = self
            .processor
            .process(self.cache.countries(), &self.filter, column_count);
        let visible_count: usize = presentation.iter().map(Vec::len).sum();

        let empty_state = self.compute_grid_empty_state(visible_count);

        let visible_rows = visible_card_rows(rows, search_bar.is_some());
        let selected_row = self.selected_index / column_count;
        let max_start = presentation.len().saturating_sub(visible_rows);
        let visible_start = selected_row.saturating_sub(visible_rows / 2).min(max_start);
        let visible_end = (visible_start + visible_rows).min(presentation.len());

        let term = self.filter.search_term.as_str();
        let card_rows = presentation[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, row)| {
                let row_index = visible_start + offset;
                row.iter()
                    .enumerate()
                    .map(|(column, country)| {
                        let absolute = row_index * column_count + column;
                        self.compute_card(country, absolute == self.selected_index, term)
                    })
                    .collect()
            })
            .collect();

        UIViewModel {
            header: self.compute_grid_header(visible_count),
            footer,
            search_bar,
            empty_state,
            body: Body::Grid {
                rows: card_rows,
                column_count,
            },
        }
    }

    /// Builds one card, with search matches marked for highlighting.
    fn compute_card(&self, country: &Country, is_selected: bool, term: &str) -> CardItem {
        CardItem {
            code: country.code.clone(),
            name: country.common_name.clone(),
            capital: country.capital_or_placeholder().to_string(),
            region: country.region.clone(),
            population: self.population.format(country.population),
            is_selected,
            highlight_ranges: match_ranges(&country.common_name, term),
        }
    }

    /// Builds the detail view.
    ///
    /// Empty values render as `N/A`. Border codes resolve to common names
    /// when the catalog knows them and fall back to the raw code otherwise.
    fn compute_detail(&self, country: &Country, border_index: usize) -> DetailView {
        let or_na = |value: String| {
            if value.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                value
            }
        };

        let fields = vec![
            ("Capital".to_string(), country.capital_or_placeholder().to_string()),
            ("Region".to_string(), or_na(country.region.clone())),
            ("Population".to_string(), compact_population(country.population)),
            ("Currencies".to_string(), or_na(country.currency_names())),
            ("Currency Symbols".to_string(), or_na(country.currency_symbols())),
            ("Native Name".to_string(), country.native_name().to_string()),
            ("English Name".to_string(), country.common_name.clone()),
            ("Flag URL".to_string(), or_na(country.flag_url.clone())),
        ];

        let borders = country
            .borders
            .iter()
            .enumerate()
            .map(|(i, code)| BorderItem {
                code: code.clone(),
                label: self
                    .cache
                    .display_name(code)
                    .map_or_else(|| code.clone(), str::to_string),
                is_selected: i == border_index,
            })
            .collect();

        DetailView {
            name: country.common_name.clone(),
            fields,
            borders,
        }
    }

    /// Empty state for a detail panel whose country is not cached yet.
    fn compute_detail_unavailable(&self, code: &str) -> EmptyState {
        if let Some(message) = self.cache.country_failure(code) {
            EmptyState {
                kind: EmptyKind::Error,
                message: "Country data unavailable".to_string(),
                subtitle: message.to_string(),
            }
        } else {
            EmptyState {
                kind: EmptyKind::Loading,
                message: format!("Loading {code}…"),
                subtitle: String::new(),
            }
        }
    }

    /// Empty state for the grid, or `None` when there are cards to show.
    ///
    /// Priority: permission denied, then loading or failed catalog, then an
    /// empty filter result.
    fn compute_grid_empty_state(&self, visible_count: usize) -> Option<EmptyState> {
        if self.web_access == WebAccess::Denied {
            return Some(EmptyState {
                kind: EmptyKind::Error,
                message: "Web access denied".to_string(),
                subtitle: "Grant the plugin web access to load countries".to_string(),
            });
        }

        match self.cache.status() {
            CatalogStatus::Idle | CatalogStatus::Loading => Some(EmptyState {
                kind: EmptyKind::Loading,
                message: "Loading countries…".to_string(),
                subtitle: self.api_base_url.clone(),
            }),
            CatalogStatus::Failed(message) => Some(EmptyState {
                kind: EmptyKind::Error,
                message: "Country data unavailable".to_string(),
                subtitle: format!("{message}  (r: retry)"),
            }),
            CatalogStatus::Ready if visible_count == 0 => Some(EmptyState {
                kind: EmptyKind::NoMatches,
                message: "No countries match".to_string(),
                subtitle: self.describe_filters(),
            }),
            CatalogStatus::Ready => None,
        }
    }

    /// Active search and region filters, for the "no matches" subtitle.
    fn describe_filters(&self) -> String {
        let mut parts = Vec::new();
        if !self.filter.search_term.is_empty() {
            parts.push(format!("search \"{}\"", self.filter.search_term));
        }
        if let Some(region) = self.filter.region() {
            parts.push(format!("region {region}"));
        }
        parts.join(" · ")
    }

    /// Grid header: title with the visible count, then sort, region, search,
    /// and catalog age.
    fn compute_grid_header(&self, visible_count: usize) -> HeaderInfo {
        let mut status = vec![
            format!("Sort: {}", self.filter.sort_order.label()),
            format!("Region: {}", self.filter.region().unwrap_or("All")),
        ];
        if !self.filter.search_term.is_empty() && !matches!(self.input_mode, InputMode::Search(_)) {
            status.push(format!("Search: \"{}\"", self.filter.search_term));
        }
        if let Some(fetched_at) = self.cache.fetched_at() {
            status.push(format!(
                "Updated {}",
                time_ago(chrono::Utc::now().timestamp(), fetched_at)
            ));
        }

        HeaderInfo {
            title: format!(" {APP_TITLE} ({visible_count}) "),
            subtitle: status.join("  ·  "),
        }
    }

    /// Detail header: title, plus the panel depth once border navigation
    /// has gone more than one level deep.
    fn compute_detail_header(&self) -> HeaderInfo {
        let trail = if self.navigation.depth() > 1 {
            format!("{} countries deep", self.navigation.depth())
        } else {
            String::new()
        };
        HeaderInfo {
            title: format!(" {APP_TITLE} "),
            subtitle: trail,
        }
    }

    /// Keybinding hints for the current screen and input mode.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.navigation.is_grid() {
            match self.input_mode {
                InputMode::Search(SearchFocus::Typing) => {
                    "ESC: exit search  Enter: results  Ctrl+n/p: move  Type to filter"
                }
                InputMode::Search(SearchFocus::Navigating) => {
                    "ESC: exit search  /: edit query  h/j/k/l: move  Enter: open"
                }
                InputMode::Normal => {
                    "h/j/k/l: move  Enter: open  /: search  o: sort  f/F: region  t: theme  q: quit"
                }
            }
        } else {
            "j/k: border  Enter: open border  Esc: back  t: theme  q: quit"
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Search bar contents; `None` outside search mode.
    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        if matches!(self.input_mode, InputMode::Search(_)) {
            Some(SearchBarInfo {
                query: self.filter.search_term.clone(),
            })
        } else {
            None
        }
    }
}
