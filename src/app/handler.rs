//! Event handling and state transition logic.
//!
//! The handler translates user input, fetch results, and worker responses into
//! state changes and action sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `KeyLeft`, `KeyRight`, `OpenSelected`, `Back`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`, `Char`, `Backspace`, `Escape`
//! - **Filters**: `CycleSort`, `CycleRegion`, `ClearRegion`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `Resize`, `ToggleTheme`, `Retry`
//! - **Data**: `FetchCompleted`, `FetchFailed`, `WorkerResponse`, `WorkerFailed`
//!
//! # Example
//!
//! ```rust
//! use countrydex::app::{handle_event, Action, AppState, Event};
//! use countrydex::catalog::FetchRequest;
//! use countrydex::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(render);
//! assert_eq!(actions, vec![Action::Fetch(FetchRequest::AllCountries)]);
//! # Ok::<(), countrydex::CountrydexError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use super::state::WebAccess;
use crate::app::{Action, AppState};
use crate::catalog::{check_status, CountryLookup, FetchRequest};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Grid: one row down. Detail: next border country.
    KeyDown,
    /// Grid: one row up. Detail: previous border country.
    KeyUp,
    /// Grid: previous card.
    KeyLeft,
    /// Grid: next card.
    KeyRight,
    /// Opens the selected card, or the focused border country in a detail panel.
    OpenSelected,
    /// Closes the top detail panel, or leaves search on the grid.
    Back,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results (from typing mode).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Clears the search query and returns to normal mode.
    Escape,
    /// Advances to the next sort order.
    CycleSort,
    /// Advances to the next region filter.
    CycleRegion,
    /// Removes the region filter.
    ClearRegion,
    /// Switches between light and dark themes.
    ToggleTheme,
    /// Forgets a failed fetch for the current screen and requests it again.
    Retry,
    /// Web access was granted by the host.
    PermissionsGranted,
    /// Web access was denied by the host.
    PermissionsDenied,
    /// A web request finished with an HTTP status.
    FetchCompleted {
        /// The request the host answered, recovered from the request context.
        request: FetchRequest,
        /// HTTP status code.
        status: u16,
        /// Raw response body; decoded on the worker when the status is 2xx.
        body: String,
    },
    /// A web request could not be performed.
    FetchFailed {
        /// The request that failed.
        request: FetchRequest,
        /// Human-readable reason shown in the error state.
        message: String,
    },
    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
    /// A worker exchange broke down: the message could not be sent, or the
    /// reply could not be read. `request` is set when the fetch is known.
    WorkerFailed {
        /// The affected request; `None` fails every request awaiting decoding.
        request: Option<FetchRequest>,
        /// Human-readable reason shown in the error state.
        message: String,
    },
    /// The pane was rendered at a new size.
    Resize {
        /// Pane height in rows.
        rows: usize,
        /// Pane width in columns.
        cols: usize,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI should re-render together with the actions to run
/// in order.
///
/// # Fetch Lifecycle
///
/// 1. **Request**: A cache miss yields [`Action::Fetch`] and marks it in flight
/// 2. **Response**: `FetchCompleted` with a 2xx status is posted to the worker
///    via [`Action::PostToWorker`]; other statuses are recorded as failures
/// 3. **Decode**: `WorkerResponse` stores the result, or records the worker's
///    error against the request
/// 4. **Retry**: `Retry` clears the failure and requests it again
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that validate
/// host input.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind(event)).entered();

    match event {
        Event::KeyDown => {
            if state.navigation.is_grid() {
                state.move_selection_down();
            } else {
                state.move_border_focus(true);
            }
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.navigation.is_grid() {
                state.move_selection_up();
            } else {
                state.move_border_focus(false);
            }
            Ok((true, vec![]))
        }
        Event::KeyLeft => {
            if !state.navigation.is_grid() {
                return Ok((false, vec![]));
            }
            state.move_selection_left();
            Ok((true, vec![]))
        }
        Event::KeyRight => {
            if !state.navigation.is_grid() {
                return Ok((false, vec![]));
            }
            state.move_selection_right();
            Ok((true, vec![]))
        }
        Event::OpenSelected => open_selected(state),
        Event::Back => {
            if state.navigation.pop() {
                tracing::debug!(depth = state.navigation.depth(), "detail closed");
                return Ok((true, vec![]));
            }
            if matches!(state.input_mode, InputMode::Search(_)) {
                exit_search(state);
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            if !state.navigation.is_grid() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.filter.search_term.clear();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.filter.search_term.is_empty() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            tracing::debug!(query = %state.filter.search_term, "exiting search mode");
            let had_query = !state.filter.search_term.is_empty();
            let was_searching = matches!(state.input_mode, InputMode::Search(_));
            exit_search(state);
            Ok((had_query || was_searching, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((false, vec![]));
            }
            state.filter.search_term.push(*c);
            tracing::trace!(query = %state.filter.search_term, char = %c, "search query updated");
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((false, vec![]));
            }
            state.filter.search_term.pop();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::CycleSort => {
            state.filter.sort_order = state.filter.sort_order.next();
            tracing::debug!(sort_order = %state.filter.sort_order, "sort order changed");
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::CycleRegion => {
            state.cycle_region();
            Ok((true, vec![]))
        }
        Event::ClearRegion => {
            if state.filter.selected_region.take().is_none() {
                return Ok((false, vec![]));
            }
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            state.toggle_theme();
            Ok((true, vec![]))
        }
        Event::Retry => {
            if state.web_access != WebAccess::Granted {
                return Ok((false, vec![]));
            }
            let request = state
                .navigation
                .current()
                .map_or(FetchRequest::AllCountries, |cursor| {
                    FetchRequest::CountryByCode(cursor.code.clone())
                });
            state.cache_mut().clear_failure(&request);
            let actions = match &request {
                FetchRequest::AllCountries => state
                    .cache_mut()
                    .request_catalog()
                    .map(Action::Fetch)
                    .into_iter()
                    .collect(),
                FetchRequest::CountryByCode(code) => lookup_actions(state, code),
            };
            Ok((!actions.is_empty(), actions))
        }
        Event::PermissionsGranted => {
            tracing::debug!("web access granted");
            state.web_access = WebAccess::Granted;
            let actions = state
                .cache_mut()
                .request_catalog()
                .map(Action::Fetch)
                .into_iter()
                .collect();
            Ok((true, actions))
        }
        Event::PermissionsDenied => {
            tracing::warn!("web access denied, country data cannot be fetched");
            state.web_access = WebAccess::Denied;
            Ok((true, vec![]))
        }
        Event::FetchCompleted {
            request,
            status,
            body,
        } => {
            if let Err(e) = check_status(request, state.api_base_url(), *status) {
                state.cache_mut().record_failure(request, e.to_string());
                return Ok((true, vec![]));
            }
            tracing::debug!(request = ?request, bytes = body.len(), "fetch completed, decoding on worker");
            state.cache_mut().mark_decoding(request);
            let message = match request {
                FetchRequest::AllCountries => WorkerMessage::decode_catalog(body.clone()),
                FetchRequest::CountryByCode(code) => {
                    WorkerMessage::decode_country(code.clone(), body.clone())
                }
            };
            Ok((false, vec![Action::PostToWorker(message)]))
        }
        Event::FetchFailed { request, message } => {
            state.cache_mut().record_failure(request, message.clone());
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => {
            match response {
                WorkerResponse::CatalogDecoded { countries } => {
                    state.cache_mut().store_catalog(countries.clone());
                    state.clamp_selection();
                }
                WorkerResponse::CountryDecoded { country } => {
                    state.cache_mut().store_country(country.clone());
                }
                WorkerResponse::Error { request, message } => {
                    tracing::error!(request = ?request, "worker error: {}", message);
                    state.cache_mut().record_failure(request, message.clone());
                }
                WorkerResponse::Rejected { message } => {
                    let failed = state.cache_mut().fail_decoding(message);
                    tracing::error!(failed, "worker rejected a message: {}", message);
                }
            }
            Ok((true, vec![]))
        }
        Event::WorkerFailed { request, message } => {
            match request {
                Some(request) => state.cache_mut().record_failure(request, message.clone()),
                None => {
                    let failed = state.cache_mut().fail_decoding(message);
                    tracing::error!(failed, "unreadable worker reply: {}", message);
                }
            }
            Ok((true, vec![]))
        }
        Event::Resize { rows, cols } => Ok((state.set_viewport(*rows, *cols), vec![])),
    }
}

/// Opens a detail panel for the selected card or focused border.
///
/// Looks the country up in the cache and also requests the catalog if it is
/// missing, since border names are resolved from it. With nothing selected
/// during search, leaves search instead.
fn open_selected(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let code = if state.navigation.is_grid() {
        let Some(country) = state.selected_country() else {
            tracing::debug!("no country selected");
            if matches!(state.input_mode, InputMode::Search(_)) {
                exit_search(state);
                return Ok((true, vec![]));
            }
            return Ok((false, vec![]));
        };
        country.code.clone()
    } else {
        let Some(code) = state.selected_border() else {
            return Ok((false, vec![]));
        };
        code.to_string()
    };

    tracing::debug!(code = %code, depth = state.navigation.depth() + 1, "opening detail");
    state.input_mode = InputMode::Normal;
    state.navigation.push(code.clone());

    let mut actions = lookup_actions(state, &code);
    if let Some(request) = state.cache_mut().request_catalog() {
        actions.push(Action::Fetch(request));
    }
    Ok((true, actions))
}

/// Fetch actions needed to show `code`; empty on a cache hit or pending fetch.
fn lookup_actions(state: &mut AppState, code: &str) -> Vec<Action> {
    match state.cache_mut().lookup(code) {
        CountryLookup::Fetch(request) => vec![Action::Fetch(request)],
        CountryLookup::Cached | CountryLookup::Pending => vec![],
        CountryLookup::Failed(message) => {
            tracing::debug!(code = %code, error = %message, "country previously failed");
            vec![]
        }
    }
}

/// Returns to normal mode with an empty query and a clamped selection.
fn exit_search(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    state.filter.search_term.clear();
    state.clamp_selection();
}

/// Debug view of an event that omits response bodies from spans.
///
/// Bodies and decoded catalogs are replaced by their sizes; every other event
/// uses its derived `Debug` output.
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::FetchCompleted {
                request, status, body,
            } => f
                .debug_struct("FetchCompleted")
                .field("request", request)
                .field("status", status)
                .field("bytes", &body.len())
                .finish(),
            Event::WorkerResponse(WorkerResponse::CatalogDecoded { countries }) => f
                .debug_struct("CatalogDecoded")
                .field("countries", &countries.len())
                .finish(),
            other => std::fmt::Debug::fmt(other, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Country, SortOrder};
    use crate::ui::theme::{Theme, ThemeKind};

    fn state_with_catalog() -> AppState {
        let mut state = AppState::new(Theme::default());
        state.set_viewport(40, 80);
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::CatalogDecoded {
                countries: vec![
                    Country::new("PER", "Peru")
                        .with_region("Americas")
                        .with_population(33)
                        .with_borders(["BOL", "CHL"]),
                    Country::new("BOL", "Bolivia").with_region("Americas").with_population(12),
                    Country::new("CHL", "Chile").with_region("Americas").with_population(19),
                    Country::new("CHN", "China").with_region("Asia").with_population(1412),
                ],
            }),
        )
        .unwrap();
        state
    }

    fn names(state: &AppState) -> Vec<&str> {
        state.arranged().iter().map(|c| c.common_name.as_str()).collect()
    }

    #[test]
    fn catalog_is_fetched_once_permission_is_granted() {
        let mut state = AppState::new(Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert_eq!(actions, vec![Action::Fetch(FetchRequest::AllCountries)]);

        // a second grant does not duplicate the in-flight fetch
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn successful_fetch_is_decoded_on_worker() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let (render, actions) = handle_event(
            &mut state,
            &Event::FetchCompleted {
                request: FetchRequest::AllCountries,
                status: 200,
                body: "[]".into(),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::DecodeCatalog { body, .. })] if body == "[]"
        ));
    }

    #[test]
    fn http_error_is_surfaced_without_retry() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let (render, actions) = handle_event(
            &mut state,
            &Event::FetchCompleted {
                request: FetchRequest::AllCountries,
                status: 503,
                body: String::new(),
            },
        )
        .unwrap();
        assert!(render);
        assert!(actions.is_empty());

        let empty = state.compute_viewmodel(30, 80).empty_state.expect("error state");
        assert!(empty.subtitle.contains("503"));

        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert_eq!(actions, vec![Action::Fetch(FetchRequest::AllCountries)]);
    }

    #[test]
    fn search_narrows_the_grid() {
        let mut state = state_with_catalog();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "ch".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(names(&state), vec!["Chile", "China"]);

        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(names(&state).len(), 4);

        handle_event(&mut state, &Event::Char('z')).unwrap();
        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(names(&state).len(), 4);
    }

    #[test]
    fn chars_are_ignored_outside_search() {
        let mut state = state_with_catalog();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.filter.search_term.is_empty());
    }

    #[test]
    fn sort_cycles_through_orders() {
        let mut state = state_with_catalog();
        assert_eq!(names(&state), vec!["Bolivia", "Chile", "China", "Peru"]);
        handle_event(&mut state, &Event::CycleSort).unwrap();
        assert_eq!(state.filter.sort_order, SortOrder::Population);
        assert_eq!(names(&state), vec!["China", "Peru", "Chile", "Bolivia"]);
    }

    #[test]
    fn region_filter_can_be_cycled_and_cleared() {
        let mut state = state_with_catalog();
        handle_event(&mut state, &Event::CycleRegion).unwrap();
        assert_eq!(names(&state), vec!["Bolivia", "Chile", "Peru"]);
        let (render, _) = handle_event(&mut state, &Event::ClearRegion).unwrap();
        assert!(render);
        assert_eq!(names(&state).len(), 4);
        let (render, _) = handle_event(&mut state, &Event::ClearRegion).unwrap();
        assert!(!render);
    }

    #[test]
    fn detail_navigation_follows_borders_and_back() {
        let mut state = state_with_catalog();
        // Bolivia, Chile, China, Peru
        for _ in 0..3 {
            handle_event(&mut state, &Event::KeyRight).unwrap();
        }
        assert_eq!(state.selected_country().map(|c| c.code.as_str()), Some("PER"));

        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(actions.is_empty(), "catalog hit needs no fetch");
        assert_eq!(state.navigation.current().map(|c| c.code.as_str()), Some("PER"));

        handle_event(&mut state, &Event::KeyDown).unwrap();
        assert_eq!(state.selected_border(), Some("CHL"));
        handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert_eq!(state.navigation.depth(), 2);
        assert_eq!(state.navigation.current().map(|c| c.code.as_str()), Some("CHL"));

        handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(state.selected_border(), Some("CHL"));
        handle_event(&mut state, &Event::Back).unwrap();
        assert!(state.navigation.is_grid());
        let (render, _) = handle_event(&mut state, &Event::Back).unwrap();
        assert!(!render);
    }

    #[test]
    fn unknown_border_triggers_single_fetch() {
        let mut state = state_with_catalog();
        state.navigation.push("XXX");
        let actions = lookup_actions(&mut state, "XXX");
        assert_eq!(
            actions,
            vec![Action::Fetch(FetchRequest::CountryByCode("XXX".into()))]
        );
        assert!(lookup_actions(&mut state, "XXX").is_empty());

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::CountryDecoded {
                country: Country::new("XXX", "Atlantis"),
            }),
        )
        .unwrap();
        assert_eq!(state.cache().display_name("XXX"), Some("Atlantis"));
    }

    #[test]
    fn worker_error_is_recorded_against_the_request() {
        let mut state = state_with_catalog();
        state.navigation.push("ZZZ");
        let _ = lookup_actions(&mut state, "ZZZ");
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                request: FetchRequest::CountryByCode("ZZZ".into()),
                message: "country not found: ZZZ".into(),
            }),
        )
        .unwrap();
        let vm = state.compute_viewmodel(30, 80);
        let empty = vm.empty_state.expect("error state");
        assert_eq!(empty.subtitle, "country not found: ZZZ");
    }

    #[test]
    fn permission_denied_is_shown() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::PermissionsDenied).unwrap();
        let empty = state.compute_viewmodel(30, 80).empty_state.expect("denied state");
        assert_eq!(empty.message, "Web access denied");
        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn theme_toggle_and_resize() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.theme().kind, ThemeKind::Dark);

        let (render, _) = handle_event(&mut state, &Event::Resize { rows: 30, cols: 120 }).unwrap();
        assert!(render);
        assert_eq!(state.column_count(), 3);
        let (render, _) = handle_event(&mut state, &Event::Resize { rows: 30, cols: 120 }).unwrap();
        assert!(!render);
    }

    #[test]
    fn unreadable_worker_reply_fails_the_fetch_and_retry_recovers() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(
            &mut state,
            &Event::FetchCompleted {
                request: FetchRequest::AllCountries,
                status: 200,
                body: "[]".into(),
            },
        )
        .unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerFailed {
                request: None,
                message: "unreadable worker reply".into(),
            },
        )
        .unwrap();
        assert!(render);
        let empty = state.compute_viewmodel(30, 80).empty_state.expect("error state");
        assert!(empty.subtitle.contains("unreadable worker reply"));

        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert_eq!(actions, vec![Action::Fetch(FetchRequest::AllCountries)]);
    }

    #[test]
    fn rejected_worker_message_fails_pending_decodes() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(
            &mut state,
            &Event::FetchCompleted {
                request: FetchRequest::AllCountries,
                status: 200,
                body: "[]".into(),
            },
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Rejected {
                message: "worker could not read message".into(),
            }),
        )
        .unwrap();
        assert!(matches!(
            state.cache().status(),
            crate::catalog::CatalogStatus::Failed(_)
        ));
    }

    #[test]
    fn unsent_worker_message_fails_its_request() {
        let mut state = state_with_catalog();
        let _ = lookup_actions(&mut state, "XXX");
        handle_event(
            &mut state,
            &Event::WorkerFailed {
                request: Some(FetchRequest::CountryByCode("XXX".into())),
                message: "failed to serialize worker message".into(),
            },
        )
        .unwrap();
        assert_eq!(
            state.cache().country_failure("XXX"),
            Some("failed to serialize worker message")
        );
    }
}
