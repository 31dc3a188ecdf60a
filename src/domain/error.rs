//! Error types for the Countrydex plugin.
//!
//! This module defines the centralized error type [`CountrydexError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! The list pipeline itself never fails; these errors describe the collaborators
//! around it (REST fetches, payload decoding, themes, worker IPC, configuration).

use thiserror::Error;

/// The main error type for Countrydex plugin operations.
///
/// # Examples
///
/// ```
/// use countrydex::CountrydexError;
///
/// fn fetch_status(status: u16) -> Result<(), CountrydexError> {
///     if status == 200 {
///         Ok(())
///     } else {
///         Err(CountrydexError::Http { status, url: "https://restcountries.com/v3.1/all".into() })
///     }
/// }
///
/// assert!(fetch_status(503).is_err());
/// ```
#[derive(Debug, Error)]
pub enum CountrydexError {
    /// The REST API answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code reported by the host.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// A response body could not be decoded into country data.
    ///
    /// Automatically converts from `serde_json::Error`.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API returned an empty result for a country code.
    #[error("No country found for code {0}")]
    NotFound(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The collator for the configured locale could not be built.
    #[error("Collation error: {0}")]
    Collation(String),
}

/// A specialized `Result` type for Countrydex operations.
pub type Result<T> = std::result::Result<T, CountrydexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_mentions_status_and_url() {
        let err = CountrydexError::Http {
            status: 404,
            url: "https://restcountries.com/v3.1/alpha/XYZ".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 404 from https://restcountries.com/v3.1/alpha/XYZ"
        );
    }

    #[test]
    fn serde_errors_convert_into_decode() {
        let parse = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err: CountrydexError = parse.into();
        assert!(matches!(err, CountrydexError::Decode(_)));
    }
}
