//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request target, a simulated
//! response, and either the expected records or the expected error variant.

use zesty_core::{ContentClient, FetchError, HttpResponse, Record, RecordSet};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ContentClient {
    ContentClient::new(BASE_URL)
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

fn assert_error_kind(name: &str, err: FetchError, expected: &str) {
    let matched = match expected {
        "Network" => matches!(err, FetchError::Network(_)),
        "Shape" => matches!(err, FetchError::Shape(_)),
        "JsonParse" => matches!(err, FetchError::JsonParse(_)),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

// ---------------------------------------------------------------------------
// URL assembly
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let c = ContentClient::new(case["base_url"].as_str().unwrap());
        let params: Vec<(&str, &str)> = case["params"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| (pair[0].as_str().unwrap(), pair[1].as_str().unwrap()))
            .collect();

        let url = c.request_url(case["path"].as_str().unwrap(), &params);
        assert_eq!(url, case["expected_url"].as_str().unwrap(), "{name}: url");
        assert_eq!(url.contains('?'), !params.is_empty(), "{name}: query marker");
    }
}

// ---------------------------------------------------------------------------
// Single item
// ---------------------------------------------------------------------------

#[test]
fn item_test_vectors() {
    let raw = include_str!("../../test-vectors/item.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let zuid = case["zuid"].as_str().unwrap();

        // Verify build
        let req = c.build_item(zuid).unwrap();
        assert_eq!(req.url, format!("{BASE_URL}{}", case["expected_path"].as_str().unwrap()), "{name}: url");

        // Verify parse
        let result = c.parse_item(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: Record = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

#[test]
fn array_test_vectors() {
    let raw = include_str!("../../test-vectors/array.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let zuid = case["zuid"].as_str().unwrap();

        // Verify build
        let req = c.build_array(zuid).unwrap();
        assert_eq!(req.url, format!("{BASE_URL}{}", case["expected_path"].as_str().unwrap()), "{name}: url");

        // Verify parse
        let result = c.parse_array(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: RecordSet = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}
