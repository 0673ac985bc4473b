//! Canned vendor answers.

use serde_json::{Value, json};
use yadirect_core::{Body, TransportResponse};

/// Minimal item with an `Id`.
#[must_use]
pub fn item(id: i64) -> Value {
    json!({ "Id": id })
}

/// Minimal bid keyed by `KeywordId`.
#[must_use]
pub fn bid(keyword_id: i64, ad_group_id: i64) -> Value {
    json!({ "KeywordId": keyword_id, "AdGroupId": ad_group_id, "Bid": 1_000_000 })
}

/// Active ad belonging to `ad_group_id`.
#[must_use]
pub fn ad(id: i64, ad_group_id: i64) -> Value {
    json!({ "Id": id, "AdGroupId": ad_group_id, "State": "ON", "Status": "ACCEPTED" })
}

/// Successful v5 page with `items` under `key` and an optional continuation.
#[must_use]
pub fn page(key: &str, items: Vec<Value>, limited_by: Option<u64>) -> TransportResponse {
    let mut result = serde_json::Map::new();
    result.insert(key.to_string(), Value::Array(items));
    if let Some(offset) = limited_by {
        result.insert("LimitedBy".into(), json!(offset));
    }
    TransportResponse::json(200, json!({ "result": result }))
}

/// Successful `set` answer with `n` results.
#[must_use]
pub fn set_results(n: usize) -> TransportResponse {
    let results: Vec<Value> = (0..n).map(|i| json!({ "KeywordId": i })).collect();
    TransportResponse::json(200, json!({ "result": { "SetResults": results } }))
}

/// v5 business error with HTTP 200, as the vendor sends them.
#[must_use]
pub fn api_error(code: i64, message: &str) -> TransportResponse {
    TransportResponse::json(
        200,
        json!({ "error": { "error_code": code, "error_string": message, "request_id": "mock" } }),
    )
}

/// Non-JSON answer with `status`.
#[must_use]
pub fn status(status: u16, text: &str) -> TransportResponse {
    TransportResponse {
        status,
        units: None,
        body: Body::Raw(text.as_bytes().to_vec()),
    }
}

/// Successful v4 answer carrying `data`.
#[must_use]
pub fn legacy(data: Value) -> TransportResponse {
    TransportResponse::json(200, json!({ "data": data }))
}

/// v4 business error.
#[must_use]
pub fn legacy_error(code: i64, message: &str) -> TransportResponse {
    TransportResponse::json(
        200,
        json!({ "error_code": code, "error_str": message, "error_detail": "" }),
    )
}

/// Wordstat report that is not ready yet.
#[must_use]
pub fn report_pending() -> TransportResponse {
    legacy(json!([{ "Phrase": "pending" }]))
}

/// Ready wordstat report with one row per phrase.
#[must_use]
pub fn report_ready(phrases: &[&str]) -> TransportResponse {
    let rows: Vec<Value> = phrases
        .iter()
        .map(|p| {
            json!({
                "Phrase": p,
                "GeoID": [225],
                "SearchedWith": [{ "Phrase": p, "Shows": 100 }],
                "SearchedAlso": []
            })
        })
        .collect();
    legacy(Value::Array(rows))
}
