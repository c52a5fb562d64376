//! Request building, response parsing and the async fetch operations.
//!
//! # Design
//! `ContentClient` holds an immutable `ClientConfig` and a `reqwest::Client`,
//! and carries no other state between calls. Each operation is split into a
//! pure `build_*` method that produces an `HttpRequest` and a pure `parse_*`
//! method that consumes an `HttpResponse`; the async `fetch_*` method runs
//! the single GET in between and reports failures through `tracing`.

use tracing::{debug, warn};
use url::{form_urlencoded, Url};

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::media::{decode_image, ContentImage};
use crate::record::{collection_from_document, item_from_document, Record, RecordSet};
use crate::zuid::{Content, ZuidKind};

/// Stateless client for the CMS content API.
///
/// Safe to share between tasks: every call builds its own request and none
/// mutates the client.
#[derive(Debug, Clone)]
pub struct ContentClient {
    config: ClientConfig,
    http: reqwest::Client,
}

/// Path of the basic-content document for `zuid`, relative to the base URL.
/// The identifier is escaped so it always stays a single path segment.
pub fn basic_content_path(zuid: &str) -> String {
    format!("-/basic-content/{}.json", encode_component(zuid))
}

impl ContentClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a caller-configured transport, e.g. one with timeouts or a proxy.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base_url}/{path}`, followed by `?k=v&...` only when `params` is
    /// non-empty. Keys and values are percent-encoded; pairs keep their order.
    pub fn request_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.config.base_url, path);
        if !params.is_empty() {
            let query: Vec<String> = params
                .iter()
                .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }

    pub fn build_raw(&self, path: &str, params: &[(&str, &str)]) -> Result<HttpRequest, FetchError> {
        let url = self.request_url(path, params);
        parse_target(&url)?;
        Ok(HttpRequest {
            url,
            headers: Vec::new(),
        })
    }

    pub fn build_json(&self, path: &str, params: &[(&str, &str)]) -> Result<HttpRequest, FetchError> {
        let mut request = self.build_raw(path, params)?;
        request
            .headers
            .push(("accept".to_string(), "application/json".to_string()));
        Ok(request)
    }

    pub fn build_item(&self, zuid: &str) -> Result<HttpRequest, FetchError> {
        self.build_json(&basic_content_path(zuid), &[])
    }

    pub fn build_array(&self, zuid: &str) -> Result<HttpRequest, FetchError> {
        self.build_json(&basic_content_path(zuid), &[])
    }

    /// Image URLs are absolute and independent of the base URL.
    pub fn build_image(&self, url: &str) -> Result<HttpRequest, FetchError> {
        parse_target(url)?;
        Ok(HttpRequest {
            url: url.to_string(),
            headers: Vec::new(),
        })
    }

    pub fn parse_raw(&self, response: HttpResponse) -> Result<Vec<u8>, FetchError> {
        check_status(&response)?;
        Ok(response.body)
    }

    pub fn parse_json(&self, response: HttpResponse) -> Result<serde_json::Value, FetchError> {
        check_status(&response)?;
        serde_json::from_slice(&response.body).map_err(|e| self.json_error(e))
    }

    pub fn parse_item(&self, response: HttpResponse) -> Result<Record, FetchError> {
        let document = self.parse_json(response)?;
        item_from_document(&document)
    }

    pub fn parse_array(&self, response: HttpResponse) -> Result<RecordSet, FetchError> {
        let document = self.parse_json(response)?;
        collection_from_document(&document)
    }

    pub fn parse_image(&self, response: HttpResponse) -> Result<ContentImage, FetchError> {
        if !response.is_success() {
            debug!(status = response.status, "image request rejected");
            return Err(FetchError::NoData);
        }
        decode_image(&response.body)
    }

    /// GET `{base_url}/{path}?{params}` and return the body untouched.
    pub async fn fetch_raw(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, FetchError> {
        let request = self.build_raw(path, params);
        self.round_trip("fetch_raw", path, request, |r| self.parse_raw(r))
            .await
    }

    /// GET `{base_url}/{path}?{params}` and parse the body as JSON.
    pub async fn fetch_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, FetchError> {
        let request = self.build_json(path, params);
        self.round_trip("fetch_json", path, request, |r| self.parse_json(r))
            .await
    }

    /// Fetch the `data` object of a single-item document.
    pub async fn fetch_item(&self, zuid: &str) -> Result<Record, FetchError> {
        let request = self.build_item(zuid);
        self.round_trip("fetch_item", zuid, request, |r| self.parse_item(r))
            .await
    }

    /// Fetch the `data` array of a collection document, keeping only the
    /// latest version of each item.
    pub async fn fetch_array(&self, zuid: &str) -> Result<RecordSet, FetchError> {
        let request = self.build_array(zuid);
        self.round_trip("fetch_array", zuid, request, |r| self.parse_array(r))
            .await
    }

    /// Fetch and decode an image from an absolute URL.
    ///
    /// Any transport failure is reported as `NoData`.
    pub async fn fetch_image(&self, url: &str) -> Result<ContentImage, FetchError> {
        let outcome = match self.build_image(url) {
            Ok(request) => match self.execute(&request).await {
                Ok(response) => self.parse_image(response),
                Err(err) => {
                    debug!(url, error = %err, "image transfer failed");
                    Err(FetchError::NoData)
                }
            },
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            warn!(operation = "fetch_image", resource = url, error = %err, "content fetch failed");
        }
        outcome
    }

    /// Fetch `zuid` in the shape its leading digit suggests.
    pub async fn fetch_content(&self, zuid: &str) -> Result<Content, FetchError> {
        match ZuidKind::of(zuid) {
            ZuidKind::Item => self.fetch_item(zuid).await.map(Content::Item),
            ZuidKind::Collection => self.fetch_array(zuid).await.map(Content::Collection),
            ZuidKind::Other => self
                .fetch_json(&basic_content_path(zuid), &[])
                .await
                .map(Content::Document),
        }
    }

    async fn round_trip<T>(
        &self,
        operation: &'static str,
        target: &str,
        request: Result<HttpRequest, FetchError>,
        parse: impl FnOnce(HttpResponse) -> Result<T, FetchError>,
    ) -> Result<T, FetchError> {
        let outcome = match request {
            Ok(request) => self.execute(&request).await.and_then(parse),
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            warn!(operation, resource = target, error = %err, "content fetch failed");
        }
        outcome
    }

    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        debug!(url = %request.url, "GET");
        let mut builder = self.http.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }

    fn json_error(&self, err: serde_json::Error) -> FetchError {
        if self.config.split_json_errors {
            FetchError::JsonParse(err.to_string())
        } else {
            FetchError::Network(format!("malformed JSON: {err}"))
        }
    }
}

/// Parse `url` as an absolute http(s) request target.
fn parse_target(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(format!(
            "{url}: unsupported scheme `{}`",
            parsed.scheme()
        )));
    }
    Ok(parsed)
}

/// Percent-encode one query or path component. Spaces become `%20`, not `+`.
fn encode_component(raw: &str) -> String {
    // byte_serialize already escapes a literal '+' as %2B, so every '+' it
    // emits stands for a space.
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Map non-2xx responses to `FetchError::Network`.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    let body = String::from_utf8_lossy(&response.body);
    let body = body.trim();
    if body.is_empty() {
        Err(FetchError::Network(format!("HTTP {}", response.status)))
    } else {
        Err(FetchError::Network(format!("HTTP {}: {body}", response.status)))
    }
}
