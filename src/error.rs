//! Fetch failure taxonomy.
//!
//! Every way a single fetch can fail maps onto one [`FetchError`] variant.
//! An empty collection is *not* an error: it arrives as a successful payload
//! with zero items and renders as an empty card area.

use thiserror::Error;

/// Why a fetch did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never completed (DNS, connection refused, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The body was not the JSON shape we expected.
    #[error("malformed response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_keep_the_decoder_message() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let fetch: FetchError = err.into();
        assert!(matches!(fetch, FetchError::Parse(ref m) if !m.is_empty()));
    }

    #[test]
    fn display_names_the_status() {
        assert_eq!(
            FetchError::Status(503).to_string(),
            "server responded with status 503"
        );
    }
}
