//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker thread that decodes REST payloads. It also
//! implements distributed tracing context propagation across thread boundaries.

use crate::catalog::FetchRequest;
use crate::domain::Country;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }
}

/// Generates builder methods for `WorkerMessage` variants that attach the
/// current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    decode_catalog(DecodeCatalog { body: String }),
    decode_country(DecodeCountry { code: String, body: String }),
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Decode the body of an `all` response.
    DecodeCatalog {
        /// Raw response body.
        body: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Decode the body of an `alpha/{code}` response.
    DecodeCountry {
        /// Requested alpha-3 code.
        code: String,

        /// Raw response body.
        body: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The fetch this message completes.
    #[must_use]
    pub fn request(&self) -> FetchRequest {
        match self {
            Self::DecodeCatalog { .. } => FetchRequest::AllCountries,
            Self::DecodeCountry { code, .. } => FetchRequest::CountryByCode(code.clone()),
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::DecodeCatalog { trace_context, .. } | Self::DecodeCountry { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The catalog was decoded.
    CatalogDecoded {
        /// Countries in API order.
        countries: Vec<Country>,
    },

    /// A single country was decoded.
    CountryDecoded {
        country: Country,
    },

    /// Decoding failed.
    Error {
        /// The fetch whose payload could not be decoded.
        request: FetchRequest,

        /// Human-readable error message.
        message: String,
    },

    /// The worker could not read the message, so the request is unknown.
    Rejected {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_its_request() {
        let catalog = WorkerMessage::DecodeCatalog {
            body: "[]".into(),
            trace_context: None,
        };
        assert_eq!(catalog.request(), FetchRequest::AllCountries);

        let country = WorkerMessage::DecodeCountry {
            code: "PER".into(),
            body: "[]".into(),
            trace_context: None,
        };
        assert_eq!(country.request(), FetchRequest::CountryByCode("PER".into()));
    }

    #[test]
    fn absent_trace_context_is_omitted_on_the_wire() {
        let message = WorkerMessage::DecodeCatalog {
            body: "[]".into(),
            trace_context: None,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));
        assert_eq!(serde_json::from_str::<WorkerMessage>(&json).unwrap(), message);
    }
}
