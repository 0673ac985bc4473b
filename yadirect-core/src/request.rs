//! Logical request shapes for both API generations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::DirectError;

/// Selection criteria object of a v5 `get` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionCriteria(Map<String, Value>);

impl SelectionCriteria {
    /// Empty criteria (select everything visible to the account).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict by a list of integer ids, e.g. `CampaignIds`.
    #[must_use]
    pub fn with_ids(mut self, key: &str, ids: &[i64]) -> Self {
        self.0.insert(key.to_string(), json!(ids));
        self
    }

    /// Restrict by a list of enum values, e.g. `Statuses: ["ACCEPTED"]`.
    #[must_use]
    pub fn with_values(mut self, key: &str, values: &[&str]) -> Self {
        self.0.insert(key.to_string(), json!(values));
        self
    }

    /// Raw access to the criteria object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// One v5 call: `{"method": ..., "params": {...}}`.
///
/// Immutable once built. Pagination never mutates a request in place: each
/// continuation works on a private copy produced by [`Request::with_offset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    method: String,
    params: Map<String, Value>,
}

impl Request {
    /// Build a request from a method name and a raw params object.
    pub fn new(method: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// `get` call selecting `field_names` of items matching `criteria`.
    pub fn get<I, S>(criteria: SelectionCriteria, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = field_names.into_iter().map(Into::into).collect();
        let mut params = Map::new();
        params.insert("SelectionCriteria".into(), Value::Object(criteria.0));
        params.insert("FieldNames".into(), json!(names));
        Self::new("get", params)
    }

    /// Mutation call carrying `records` under `key`, e.g. `set` with `Bids`.
    pub fn mutation(method: impl Into<String>, key: &str, records: Vec<Value>) -> Self {
        let mut params = Map::new();
        params.insert(key.to_string(), Value::Array(records));
        Self::new(method, params)
    }

    /// Add an extra field-name list such as `TextCampaignFieldNames`.
    #[must_use]
    pub fn with_field_list<I, S>(mut self, key: &str, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = field_names.into_iter().map(Into::into).collect();
        self.params.insert(key.to_string(), json!(names));
        self
    }

    /// Method name (`get`, `set`, ...).
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Params object.
    #[must_use]
    pub const fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Pagination offset carried by this request, if any.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        self.params
            .get("Page")
            .and_then(|p| p.get("Offset"))
            .and_then(Value::as_u64)
    }

    /// Copy of this request asking for the page that starts at `offset`.
    ///
    /// Other `Page` settings (such as `Limit`) are preserved.
    #[must_use]
    pub fn with_offset(&self, offset: u64) -> Self {
        let mut next = self.clone();
        let page = next
            .params
            .entry("Page")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(page) = page {
            page.insert("Offset".into(), json!(offset));
        } else {
            *page = json!({ "Offset": offset });
        }
        next
    }

    /// UTF-8 JSON body. Non-ASCII text is written as-is, not escaped.
    ///
    /// # Errors
    /// Returns `MalformedResponse` if serialization fails.
    pub fn to_body(&self) -> Result<Vec<u8>, DirectError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// One legacy (v4) call: `{"method": ..., "param": ...}`.
///
/// The connector adds the token and locale when building the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRequest {
    method: String,
    param: Option<Value>,
}

impl LegacyRequest {
    /// Call `method` with `param`.
    pub fn new(method: impl Into<String>, param: Value) -> Self {
        Self {
            method: method.into(),
            param: Some(param),
        }
    }

    /// Call `method` without a `param` field.
    ///
    /// The body still carries `token` and `locale`; the server ignores a
    /// `locale` on parameterless list calls.
    pub fn bare(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            param: None,
        }
    }

    /// Method name, e.g. `GetWordstatReport`.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Method parameter, if any.
    #[must_use]
    pub const fn param(&self) -> Option<&Value> {
        self.param.as_ref()
    }

    /// UTF-8 JSON body including the token and locale.
    ///
    /// # Errors
    /// Returns `MalformedResponse` if serialization fails.
    pub fn to_body(&self, token: &str, locale: &str) -> Result<Vec<u8>, DirectError> {
        let mut body = Map::new();
        body.insert("method".into(), json!(self.method));
        body.insert("token".into(), json!(token));
        body.insert("locale".into(), json!(locale));
        if let Some(param) = &self.param {
            body.insert("param".into(), param.clone());
        }
        Ok(serde_json::to_vec(&Value::Object(body))?)
    }
}
