//! Error types for the publication loader.
//!
//! None of these reach page rendering: the loader logs them and degrades to
//! an empty list. They exist so the failure can be logged with context and
//! surfaced as a placeholder.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the publication list.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed to load.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP response.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Payload is not a JSON array of publication records.
    #[error("malformed publication data from {origin}: {source}")]
    Decode {
        /// URL or path the payload came from.
        origin: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Local file could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configured source is neither an http(s) URL nor a usable path.
    #[error("invalid data source '{value}': {reason}\n  Suggestion: Use an http(s) URL or a path to a JSON file")]
    InvalidSource {
        /// The rejected source string.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl LoadError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a decode error.
    pub fn decode(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            origin: origin.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid source error.
    pub fn invalid_source(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message() {
        let err = LoadError::http_status("https://example.com/pubs.json", 404);
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("https://example.com/pubs.json"));
    }

    #[test]
    fn test_decode_message_includes_origin() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = LoadError::decode("data/publications.json", source);
        assert!(err.to_string().contains("data/publications.json"));
    }

    #[test]
    fn test_invalid_source_has_suggestion() {
        let err = LoadError::invalid_source("ftp://x", "scheme 'ftp' is not supported");
        let msg = err.to_string();
        assert!(msg.contains("ftp"));
        assert!(msg.contains("Suggestion"));
    }

    #[test]
    fn test_io_error_message() {
        let err = LoadError::io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing.json"));
    }
}
