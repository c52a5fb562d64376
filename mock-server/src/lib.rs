use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const SAMPLE_ITEM_ZUID: &str = "7-a1b2c3d4e5-f6g7h8";
pub const SAMPLE_COLLECTION_ZUID: &str = "6-9f8e7d6c5b-4a3b2c";

/// Canned documents and media served by the mock CMS. Read-only once the
/// app is built.
#[derive(Clone, Debug, Default)]
pub struct Store {
    documents: HashMap<String, String>,
    media: HashMap<String, Vec<u8>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` at `/-/basic-content/{zuid}.json`.
    pub fn with_document(self, zuid: &str, document: &Value) -> Self {
        self.with_raw_document(zuid, &document.to_string())
    }

    /// Serve `body` verbatim, e.g. to simulate malformed JSON.
    pub fn with_raw_document(mut self, zuid: &str, body: &str) -> Self {
        self.documents.insert(zuid.to_string(), body.to_string());
        self
    }

    /// Serve `bytes` at `/-/media/{name}`.
    pub fn with_media(mut self, name: &str, bytes: Vec<u8>) -> Self {
        self.media.insert(name.to_string(), bytes);
        self
    }

    /// A single item, a collection holding superseded versions, and two
    /// media files that are not images.
    pub fn sample() -> Self {
        Self::new()
            .with_document(
                SAMPLE_ITEM_ZUID,
                &json!({
                    "data": {
                        "title": "Welcome",
                        "views": 42,
                        "published": true,
                        "summary": null
                    },
                    "meta": {"model_alt": "homepage"}
                }),
            )
            .with_document(
                SAMPLE_COLLECTION_ZUID,
                &json!({
                    "data": [
                        {"_item_zuid": "7-aaa", "_version": "1", "name": "Draft A"},
                        {"_item_zuid": "7-bbb", "_version": "3", "name": "B"},
                        {"_item_zuid": "7-aaa", "_version": "2", "name": "A"},
                        {"_item_zuid": "7-bbb", "_version": 2, "name": "Old B"}
                    ]
                }),
            )
            .with_media("readme.txt", b"plain text, not an image".to_vec())
            .with_media("empty.png", Vec::new())
    }
}

type SharedStore = Arc<Store>;

pub fn app() -> Router {
    app_with(Store::sample())
}

pub fn app_with(store: Store) -> Router {
    Router::new()
        .route("/-/basic-content/{file}", get(basic_content))
        .route("/-/media/{name}", get(media))
        .route("/-/echo", get(echo))
        .route("/-/status/{code}", get(status))
        .with_state(Arc::new(store))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Store::sample()).await
}

pub async fn serve(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

async fn basic_content(
    State(store): State<SharedStore>,
    Path(file): Path<String>,
) -> Result<Response, StatusCode> {
    let zuid = file.strip_suffix(".json").ok_or(StatusCode::NOT_FOUND)?;
    let body = store.documents.get(zuid).ok_or(StatusCode::NOT_FOUND)?;
    tracing::debug!(zuid, "serving document");
    Ok(([(header::CONTENT_TYPE, "application/json")], body.clone()).into_response())
}

async fn media(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
) -> Result<Vec<u8>, StatusCode> {
    store.media.get(&name).cloned().ok_or(StatusCode::NOT_FOUND)
}

/// Reflects the query string so clients can check how it was encoded.
async fn echo(
    RawQuery(raw): RawQuery,
    Query(params): Query<BTreeMap<String, String>>,
) -> Json<Value> {
    Json(json!({ "query": raw, "params": params }))
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, format!("status {}", status.as_u16())).into_response()
}
