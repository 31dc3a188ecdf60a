//! Subscriber setup for the plugin and worker threads.

use super::{tracer, SERVICE_NAME, TRACE_FILE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive used when `trace_level` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "info";

/// Builds the level filter from a `trace_level` directive.
///
/// Invalid directives fall back to `info` rather than disabling tracing.
///
/// ```
/// use countrydex::observability::trace_filter;
///
/// assert_eq!(trace_filter(Some("debug")).to_string(), "debug");
/// assert_eq!(trace_filter(Some("not=a=level")).to_string(), "info");
/// assert_eq!(trace_filter(None).to_string(), "info");
/// ```
#[must_use]
pub fn trace_filter(directive: Option<&str>) -> EnvFilter {
    let directive = directive.unwrap_or(DEFAULT_DIRECTIVE);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber exporting to the trace file.
///
/// Does nothing when the data directory cannot be created; tracing is optional.
/// Only the first call per thread group takes effect.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(trace_filter(config.trace_level.as_deref()))
        .with(otel_layer)
        .try_init();
}
