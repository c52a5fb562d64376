//! Client configuration.

use serde::Deserialize;

/// Settings fixed at construction of a `ContentClient`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Scheme and host of the CMS instance, e.g. `https://example.zesty.site`.
    /// Request targets are `{base_url}/{path}`.
    pub base_url: String,

    /// Report malformed JSON as `FetchError::JsonParse` instead of folding it
    /// into `FetchError::Network`.
    #[serde(default)]
    pub split_json_errors: bool,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            split_json_errors: false,
        }
    }

    pub fn split_json_errors(mut self, split: bool) -> Self {
        self.split_json_errors = split;
        self
    }
}
