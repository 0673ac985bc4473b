// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;
use yadirect::{ConnectionConfig, Credentials, Direct, DirectBuilder, Transport};
use yadirect_mock::MockTransport;

pub use yadirect_mock::fixtures::*;
pub use yadirect_mock::{MockBehavior, Route};

pub const LOGIN: &str = "agency-client";
pub const TOKEN: &str = "mock-token-0123456789";

/// Connection settings pointing both generations at the mock host.
pub fn mock_connection() -> ConnectionConfig {
    ConnectionConfig {
        v5_url: "https://mock.test/json/v5/".to_string(),
        v4_url: "https://mock.test/v4/json/".to_string(),
        locale: "en".to_string(),
    }
}

/// Builder with both connectors registered over `mock`.
pub fn builder(mock: &Arc<MockTransport>) -> DirectBuilder {
    let transport: Arc<dyn Transport> = mock.clone();
    Direct::builder()
        .with_transport(transport, &Credentials::new(LOGIN, TOKEN), &mock_connection())
        .unwrap()
}

/// `Direct` with default configuration over `mock`.
pub fn direct(mock: &Arc<MockTransport>) -> Direct {
    builder(mock).build().unwrap()
}

/// Ids selected under `key` in a decoded v5 body.
pub fn selected_ids(body: &Value, key: &str) -> Vec<i64> {
    body["params"]["SelectionCriteria"][key]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default()
}

/// Items with ids `from..to`.
pub fn items(from: i64, to: i64) -> Vec<Value> {
    (from..to).map(item).collect()
}
