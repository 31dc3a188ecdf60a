//! Trace export to a rotating OTLP JSON file.
//!
//! The plugin has no network collector to talk to, so spans are serialized as
//! OTLP JSON lines into the sandbox data directory:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → countrydex-otlp.json
//! ```
//!
//! Files rotate at 10 MB; the three newest backups are kept.
//!
//! # Configuration
//!
//! The `trace_level` plugin option is an `EnvFilter` directive
//! (`info`, `countrydex=debug`, ...). Default: `"info"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider and file span exporter
//! - [`span_formatter`]: OTLP JSON serialization
//! - [`file_writer`]: Size-based rotating writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::{FileWriter, RotationPolicy};
pub use init::{init_tracing, trace_filter};

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "Countrydex";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "countrydex-otlp.json";
