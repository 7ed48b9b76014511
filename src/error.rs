//! Error types for artvee-dl
//!
//! The scrape pipeline treats most failures as per-record or per-page skips
//! rather than hard errors, so this enum is intentionally small: it covers
//! configuration problems, transport-level network failures, and writer-side
//! I/O. Content-level problems (missing HTML elements, unparsable counts) are
//! logged and yield empty results instead of surfacing here.

use thiserror::Error;

/// Result type alias for artvee-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for artvee-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "worker_threads")
        key: Option<String>,
    },

    /// Transport-level network error (DNS failure, connection reset, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A configured page URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// I/O error (writer output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error (writer output)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Shutdown in progress - not accepting new work
    #[error("shutdown in progress: not accepting new work")]
    ShuttingDown,
}

impl Error {
    /// Convenience constructor for configuration errors.
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_message() {
        let err = Error::config("worker_threads must be between 1 and 16", "worker_threads");
        assert_eq!(
            err.to_string(),
            "configuration error: worker_threads must be between 1 and 16"
        );
    }

    #[test]
    fn config_constructor_records_key() {
        let err = Error::config("bad value", "image_size");
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("image_size")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn io_error_converts_via_from() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn invalid_url_converts_via_from() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
