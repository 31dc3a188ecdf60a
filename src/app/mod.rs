//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the catalog, listing, and
//! worker layers.
//!
//! ```text
//! Key / WebRequestResult → Events → Event Handler → State Mutations → Actions → Side Effects
//!                                        ↑                                          ↓
//!                                        └────────── Worker Responses ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input modes and the detail navigation stack
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{DetailCursor, InputMode, Navigation, SearchFocus};
pub use state::{AppState, WebAccess};
