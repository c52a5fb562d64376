//! HTTP request and response types as plain data.
//!
//! # Design
//! The client builds an `HttpRequest` and parses an `HttpResponse` in pure
//! functions; only `ContentClient::execute` touches the network. Every request
//! the CMS API accepts is a GET, so no method is recorded.

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
