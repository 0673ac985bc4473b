//! Response classification for both API generations.
//!
//! The order of checks matters: a vendor `error` body wins over the HTTP
//! status, and the status wins over key extraction.

use serde_json::Value;

use crate::transport::{Body, TransportResponse};
use crate::{DirectError, Item, Units};

/// One successfully decoded page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Items of this page, in server order.
    pub items: Vec<Item>,
    /// Offset of the next page when the server truncated the result.
    pub continuation: Option<u64>,
    /// Units reported for this exchange.
    pub units: Option<Units>,
}

/// Outcome of classifying one v5 exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// The expected collection was present.
    Success(Page),
    /// The answer lacked the expected keys without signalling an error.
    RecoverableEmpty {
        /// Units reported for this exchange.
        units: Option<Units>,
    },
    /// The vendor reported a structured business error.
    ApiError {
        /// Raw `error` object.
        detail: Value,
    },
    /// Non-2xx status without a vendor error body.
    ConnectionError {
        /// HTTP status.
        status: u16,
        /// Body snippet for diagnosis.
        detail: String,
    },
}

impl Classified {
    /// Convert into a page, turning every non-success outcome into an error.
    ///
    /// `what` names the missing collection in `MalformedResponse` messages.
    ///
    /// # Errors
    /// Returns `Api`, `Connection` or `MalformedResponse` for the matching variants.
    pub fn into_page(self, what: &str) -> Result<Page, DirectError> {
        match self {
            Self::Success(page) => Ok(page),
            Self::RecoverableEmpty { .. } => Err(DirectError::malformed(format!(
                "response has no '{what}' collection"
            ))),
            Self::ApiError { detail } => Err(DirectError::api(detail)),
            Self::ConnectionError { status, detail } => {
                Err(DirectError::connection(Some(status), detail))
            }
        }
    }
}

fn signals_error(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_i64() != Some(0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Classify a v5 response against the collection `result_key`.
#[must_use]
pub fn classify(result_key: &str, response: &TransportResponse) -> Classified {
    let units = response.units.as_deref().map(Units::parse);
    let json = response.body.as_json();

    if let Some(body) = json
        && signals_error(body.get("error"))
    {
        return Classified::ApiError {
            detail: body["error"].clone(),
        };
    }

    if !response.is_success() {
        return Classified::ConnectionError {
            status: response.status,
            detail: response.body.snippet(),
        };
    }

    let Some(result) = json.and_then(|b| b.get("result")) else {
        return Classified::RecoverableEmpty { units };
    };
    let Some(items) = result.get(result_key).and_then(Value::as_array) else {
        return Classified::RecoverableEmpty { units };
    };
    let continuation = result
        .get("LimitedBy")
        .and_then(Value::as_u64)
        .filter(|offset| *offset != 0);

    Classified::Success(Page {
        items: items.clone(),
        continuation,
        units,
    })
}

/// Decoded legacy (v4) answer.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyReply {
    /// Full JSON body.
    pub body: Value,
    /// Units reported inline, if any.
    pub units: Option<Units>,
}

impl LegacyReply {
    /// The `data` member most legacy methods answer with.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }
}

/// Classify a legacy (v4) response.
///
/// # Errors
/// Returns `Api` when the body carries a non-zero `error_code` (whatever the
/// HTTP status), `Connection` for other non-2xx statuses, and
/// `MalformedResponse` when a 2xx body is not JSON.
pub fn classify_legacy(response: &TransportResponse) -> Result<LegacyReply, DirectError> {
    if let Some(body) = response.body.as_json()
        && signals_error(body.get("error_code"))
    {
        return Err(DirectError::api(body.clone()));
    }
    if !response.is_success() {
        return Err(DirectError::connection(
            Some(response.status),
            response.body.snippet(),
        ));
    }
    match &response.body {
        Body::Json(body) => {
            let units = response
                .units
                .as_deref()
                .map(Units::parse)
                .or_else(|| body.get("units").and_then(Units::from_json));
            Ok(LegacyReply {
                body: body.clone(),
                units,
            })
        }
        Body::Raw(_) => Err(DirectError::malformed(format!(
            "legacy response is not JSON: {}",
            response.body.snippet()
        ))),
    }
}
