//! Async client for the Zesty.io headless-CMS content API.
//!
//! # Overview
//! `ContentClient` builds a URL from a base host, a path or content
//! identifier (ZUID) and optional query parameters, issues one GET, and
//! reshapes the response into raw bytes, a JSON document, a single
//! string-valued `Record`, a deduplicated `RecordSet`, or a decoded image.
//!
//! # Design
//! - The client is immutable after construction and holds no cache; every
//!   call is a fresh request and calls may run concurrently.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), both pure; `fetch_*` runs the
//!   round trip between them.
//! - Failures come back as `FetchError` and are also emitted as `tracing`
//!   events. No subscriber is installed by this crate.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod media;
pub mod record;
pub mod zuid;

pub use client::{basic_content_path, ContentClient};
pub use config::ClientConfig;
pub use error::FetchError;
pub use http::{HttpRequest, HttpResponse};
pub use media::{decode_image, ContentImage};
pub use record::{Record, RecordSet};
pub use zuid::{Content, ZuidKind};
