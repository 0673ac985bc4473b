//! Transport boundary: one HTTP POST with a JSON body.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::DirectError;

/// Name of the response header carrying units on the paginated API.
pub const UNITS_HEADER: &str = "Units";

/// Outbound POST prepared by a connector.
#[derive(Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// UTF-8 JSON body.
    pub body: Vec<u8>,
}

impl TransportRequest {
    /// Build a request for `url` with `body` and no headers.
    pub fn new(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decode the body as JSON (used by test transports).
    ///
    /// # Errors
    /// Returns `MalformedResponse` if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, DirectError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

impl fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("TransportRequest")
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Body parsed as JSON.
    Json(Value),
    /// Body that was not valid JSON.
    Raw(Vec<u8>),
}

impl Body {
    /// Decode bytes, falling back to `Raw` when they are not JSON.
    #[must_use]
    pub fn decode(bytes: Vec<u8>) -> Self {
        match serde_json::from_slice(&bytes) {
            Ok(v) => Self::Json(v),
            Err(_) => Self::Raw(bytes),
        }
    }

    /// JSON view of the body, if it decoded.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            Self::Raw(_) => None,
        }
    }

    /// Short text rendering for error messages.
    #[must_use]
    pub fn snippet(&self) -> String {
        let text = match self {
            Self::Json(v) => v.to_string(),
            Self::Raw(b) => String::from_utf8_lossy(b).into_owned(),
        };
        text.chars().take(256).collect()
    }
}

/// Status, units header and decoded body of one exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw `Units` header value, if present.
    pub units: Option<String>,
    /// Decoded body.
    pub body: Body,
}

impl TransportResponse {
    /// JSON response with `status`.
    #[must_use]
    pub const fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            units: None,
            body: Body::Json(body),
        }
    }

    /// Attach a raw `Units` header value.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Performs exactly one network exchange per call.
///
/// Implementations return `Err(DirectError::Connection)` for connection-level
/// failures only. Any HTTP answer, including non-2xx statuses, is returned as
/// a [`TransportResponse`] so the classifier can inspect its body. Retrying is
/// never done here.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// POST `request` and decode the answer.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, DirectError>;
}
