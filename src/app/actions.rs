//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event so
//! that several side effects can be queued at once. The plugin runtime
//! executes them in order.
//!
//! # Example
//!
//! ```rust
//! use countrydex::app::Action;
//! use countrydex::catalog::FetchRequest;
//! use countrydex::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::Fetch(FetchRequest::AllCountries),
//!     Action::PostToWorker(WorkerMessage::decode_catalog("[]".to_string())),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::catalog::FetchRequest;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues an HTTP GET for the request, tagged with its context map.
    Fetch(FetchRequest),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),
}
