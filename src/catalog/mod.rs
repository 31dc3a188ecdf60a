//! Country data access: REST requests, payload decoding, and the shared cache.
//!
//! # Architecture
//!
//! ```text
//! AppState ──lookup──▶ CountryCache ──miss──▶ Action::Fetch(FetchRequest)
//!                           ▲                        │ (plugin shim: web_request)
//!                           │                        ▼
//!                     store_* ◀── worker decode ◀── WebRequestResult
//! ```
//!
//! # Modules
//!
//! - [`api`]: Endpoint URLs, request context tagging, response decoding
//! - [`cache`]: Read-through, fetch-once cache

pub mod api;
pub mod cache;

pub use api::{check_status, decode_catalog, decode_country, FetchRequest, DEFAULT_BASE_URL};
pub use cache::{CatalogStatus, CountryCache, CountryLookup};
