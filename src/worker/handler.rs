//! Worker thread implementation for payload decoding.
//!
//! The `all` endpoint returns a large JSON document. Decoding it into the slim
//! [`Country`](crate::domain::Country) model on the worker keeps the plugin's
//! render loop responsive and shrinks the payload crossing the IPC boundary.
//! Includes distributed tracing support for cross-thread observability.

use crate::catalog::{decode_catalog, decode_country};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Stateless apart from a decode counter used in trace events.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CatalogWorker {
    #[serde(skip)]
    decoded: usize,
}

impl CatalogWorker {
    /// Number of payloads decoded successfully by this worker.
    #[must_use]
    pub const fn decoded(&self) -> usize {
        self.decoded
    }

    /// Helper for turning decode results into responses with consistent logging.
    fn handle_decode_result<T, F>(
        &mut self,
        message: &WorkerMessage,
        result: Result<T>,
        on_success: F,
    ) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                self.decoded += 1;
                tracing::debug!(decoded_total = self.decoded, "payload decoded");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(error = %e, "payload decode failed");
                WorkerResponse::Error {
                    request: message.request(),
                    message: e.to_string(),
                }
            }
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Decodes a raw IPC payload into a response.
    ///
    /// An unreadable payload yields [`WorkerResponse::Rejected`] so the plugin
    /// can fail the fetches it handed over instead of waiting forever.
    pub fn respond(&mut self, payload: &str) -> WorkerResponse {
        match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Rejected {
                    message: format!("worker could not read message: {e}"),
                }
            }
        }
    }

    /// Processes a worker message and returns the appropriate response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", request = ?message.request());
        let _guard = span.entered();

        match &message {
            WorkerMessage::DecodeCatalog { body, .. } => {
                tracing::debug!(body_len = body.len(), "decoding catalog");
                let result = decode_catalog(body);
                self.handle_decode_result(&message, result, |countries| {
                    tracing::debug!(country_count = countries.len(), "catalog decoded");
                    WorkerResponse::CatalogDecoded { countries }
                })
            }
            WorkerMessage::DecodeCountry { code, body, .. } => {
                tracing::debug!(code = %code, body_len = body.len(), "decoding country");
                let result = decode_country(code, body);
                self.handle_decode_result(&message, result, |country| {
                    WorkerResponse::CountryDecoded { country }
                })
            }
        }
    }
}

/// Initializes tracing for the worker thread.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for CatalogWorker {
    /// Handles incoming messages from the main plugin thread.
    ///
    /// 1. Initializes tracing on first message (once per worker lifetime)
    /// 2. Deserializes the message payload, answering `Rejected` if unreadable
    /// 3. Decodes via `handle_message`
    /// 4. Serializes and sends the response back to the main thread
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.load(std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
            WORKER_TRACING_INITIALIZED.store(true, std::sync::atomic::Ordering::Relaxed);
        }

        let response = self.respond(&payload);

        match serde_json::to_string(&response) {
            Ok(payload) => {
                post_message_to_plugin(PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FetchRequest;

    const BODY: &str = r#"[
        {"name":{"common":"Chad","official":"Republic of Chad"},"cca3":"TCD","region":"Africa","population":17,"area":1284000,"flags":{"png":""}},
        {"name":{"common":"Chile","official":"Republic of Chile"},"cca3":"CHL","region":"Americas","population":19,"area":756102,"flags":{"png":""}}
    ]"#;

    #[test]
    fn catalog_payload_decodes_into_countries() {
        let mut worker = CatalogWorker::default();
        let response = worker.handle_message(WorkerMessage::DecodeCatalog {
            body: BODY.to_string(),
            trace_context: None,
        });
        let WorkerResponse::CatalogDecoded { countries } = response else {
            panic!("expected decoded catalog, got {response:?}");
        };
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[1].common_name, "Chile");
        assert_eq!(worker.decoded(), 1);
    }

    #[test]
    fn country_payload_decodes_first_entry() {
        let mut worker = CatalogWorker::default();
        let response = worker.handle_message(WorkerMessage::DecodeCountry {
            code: "TCD".into(),
            body: BODY.to_string(),
            trace_context: None,
        });
        assert!(matches!(
            response,
            WorkerResponse::CountryDecoded { ref country } if country.code == "TCD"
        ));
    }

    #[test]
    fn malformed_payload_reports_the_request() {
        let mut worker = CatalogWorker::default();
        let response = worker.handle_message(WorkerMessage::DecodeCountry {
            code: "XYZ".into(),
            body: "[]".into(),
            trace_context: None,
        });
        assert_eq!(
            response,
            WorkerResponse::Error {
                request: FetchRequest::CountryByCode("XYZ".into()),
                message: "No country found for code XYZ".into(),
            }
        );
        assert_eq!(worker.decoded(), 0);
    }

    #[test]
    fn unreadable_payload_is_rejected() {
        let mut worker = CatalogWorker::default();
        let response = worker.respond("{not json");
        assert!(matches!(response, WorkerResponse::Rejected { .. }));
        assert_eq!(worker.decoded(), 0);
    }

    #[test]
    fn serialized_message_round_trips_through_respond() {
        let mut worker = CatalogWorker::default();
        let payload = serde_json::to_string(&WorkerMessage::DecodeCatalog {
            body: BODY.to_string(),
            trace_context: None,
        })
        .unwrap();
        assert!(matches!(
            worker.respond(&payload),
            WorkerResponse::CatalogDecoded { ref countries } if countries.len() == 2
        ));
    }
}
