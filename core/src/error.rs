//! Error types for the content client.
//!
//! # Design
//! The set of failures is closed. Each variant carries only the diagnostic
//! text needed for an operator log; callers are expected to match on the
//! variant, not parse the message.

use thiserror::Error;

/// Errors returned by `ContentClient` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Catch-all. No documented code path produces it.
    #[error("unknown error")]
    Unknown,

    /// Transport failure or a non-2xx response. With the default
    /// configuration malformed JSON is also reported here.
    #[error("network error: {0}")]
    Network(String),

    /// The body was not valid JSON. Only produced when
    /// `ClientConfig::split_json_errors` is set.
    #[error("invalid JSON: {0}")]
    JsonParse(String),

    /// The base URL, path or image URL did not form a valid request target.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The transfer produced no bytes.
    #[error("no data returned")]
    NoData,

    /// The JSON parsed but `data` did not have the expected structure.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// Bytes were retrieved but are not a decodable image.
    #[error("image decode failed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_diagnostic() {
        let err = FetchError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn no_data_has_fixed_message() {
        assert_eq!(FetchError::NoData.to_string(), "no data returned");
    }
}
