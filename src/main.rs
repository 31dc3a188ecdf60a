//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Countrydex library and the Zellij
//! plugin system. It implements `ZellijPlugin`, registers the decoding worker,
//! performs web requests, and maps host events onto library events.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Zellij Main Thread      │
//! │  ┌────────────────────────┐  │   web_request ──▶ REST Countries
//! │  │     State (plugin)     │──┼──────────────────────────┐
//! │  └────────────────────────┘  │                          │
//! │        │ IPC       ▲         │   WebRequestResult ◀─────┘
//! │        ▼           │         │
//! │  ┌────────────────────────┐  │
//! │  │     CatalogWorker      │  │  ← JSON decoding
//! │  │    (worker thread)     │  │
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; on grant the catalog is fetched
//! 3. **Fetch**: `WebRequestResult` bodies go to the worker for decoding
//! 4. **Update**: Keys and results become library events
//! 5. **Render**: The pane size is fed back as `Resize`, then the UI is drawn
//!
//! # Keybindings
//!
//! Grid:
//! - `h`/`j`/`k`/`l` or arrows: Move between cards
//! - `Enter`: Open country
//! - `/`: Search
//! - `o`: Cycle sort order
//! - `f`: Cycle region, `F`: all regions
//! - `t`: Toggle light/dark theme
//! - `r`: Retry a failed fetch
//! - `q`: Close plugin
//!
//! Search (typing):
//! - Characters: Edit query
//! - `Enter`: Move focus to results
//! - `Esc`: Exit search
//!
//! Detail:
//! - `j`/`k` or arrows: Move between border countries
//! - `Enter`: Open border country
//! - `Esc`/`Backspace`/`h`: Back

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use countrydex::worker::{CatalogWorker, WorkerMessage, WorkerResponse};
use countrydex::{handle_event, Action, Config, Event, FetchRequest, InputMode, SearchFocus};

register_plugin!(State);
register_worker!(CatalogWorker, catalog_worker, CATALOG_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like worker
/// communication and request execution.
struct State {
    /// Core application state from library layer.
    app: countrydex::AppState,

    /// Worker namespace for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: countrydex::initialize(&Config::default()),
            worker_name: "catalog".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        countrydex::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            locale = %config.locale,
            api_base_url = %config.api_base_url,
            "parsed configuration"
        );
        self.app = countrydex::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        );
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => match permissions {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.dispatch(&Event::Resize { rows, cols });
        countrydex::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs an event through the library and executes the resulting actions.
    ///
    /// Actions that fail locally produce follow-up events, which are
    /// dispatched in turn.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                let follow_ups: Vec<Event> = actions
                    .iter()
                    .filter_map(|action| self.execute_action(action))
                    .collect();
                follow_ups
                    .iter()
                    .fold(should_render, |render, event| self.dispatch(event) || render)
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current screen and mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        if !self.app.navigation.is_grid() {
            return Self::map_detail_key(key.bare_key);
        }

        match self.app.input_mode {
            InputMode::Search(SearchFocus::Typing) => Self::map_typing_key(key.bare_key),
            InputMode::Search(SearchFocus::Navigating) => match key.bare_key {
                BareKey::Char('/') => Some(Event::FocusSearchBar),
                BareKey::Esc => Some(Event::ExitSearch),
                other => Self::map_grid_motion(other),
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Char('/') => Some(Event::SearchMode),
                BareKey::Char('o') => Some(Event::CycleSort),
                BareKey::Char('f') => Some(Event::CycleRegion),
                BareKey::Char('F') => Some(Event::ClearRegion),
                BareKey::Char('t') => Some(Event::ToggleTheme),
                BareKey::Char('r') => Some(Event::Retry),
                BareKey::Char('q') => Some(Event::CloseFocus),
                BareKey::Esc => Some(Event::Escape),
                other => Self::map_grid_motion(other),
            },
        }
    }

    fn map_grid_motion(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::KeyLeft,
            BareKey::Right | BareKey::Char('l') => Event::KeyRight,
            BareKey::Enter => Event::OpenSelected,
            _ => return None,
        })
    }

    fn map_typing_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Esc => Event::ExitSearch,
            BareKey::Enter => Event::FocusResults,
            BareKey::Backspace => Event::Backspace,
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Left => Event::KeyLeft,
            BareKey::Right => Event::KeyRight,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_detail_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') | BareKey::Right | BareKey::Char('l') => {
                Event::KeyDown
            }
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::OpenSelected,
            BareKey::Esc | BareKey::Backspace | BareKey::Left | BareKey::Char('h') => Event::Back,
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Char('r') => Event::Retry,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a finished web request back to the request that issued it.
    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(request) = FetchRequest::from_context(context) else {
            tracing::debug!(context = ?context, "ignoring web request result without request context");
            return None;
        };

        match String::from_utf8(body) {
            Ok(body) => Some(Event::FetchCompleted {
                request,
                status,
                body,
            }),
            Err(e) => Some(Event::FetchFailed {
                request,
                message: format!("response body is not UTF-8: {e}"),
            }),
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                Some(Event::WorkerFailed {
                    request: None,
                    message: format!("unreadable worker reply: {e}"),
                })
            }
        }
    }

    /// Serializes a message as JSON and sends it to the worker.
    ///
    /// Returns a `WorkerFailed` event for the message's request if it cannot
    /// be serialized.
    fn post_worker_message(&self, message: &WorkerMessage) -> Option<Event> {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
                Some(Event::WorkerFailed {
                    request: Some(message.request()),
                    message: format!("failed to serialize worker message: {e}"),
                })
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    ///
    /// Returns a follow-up event when the action could not be carried out.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                None
            }
            Action::Fetch(request) => {
                let url = request.url(self.app.api_base_url());
                tracing::debug!(url = %url, "issuing web request");
                web_request(
                    url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.context(),
                );
                None
            }
            Action::PostToWorker(message) => self.post_worker_message(message),
        }
    }
}
