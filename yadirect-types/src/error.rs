use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the yadirect workspace.
///
/// Separates transport-level failures (retryable by re-issuing the same request)
/// from vendor-reported business errors (never retried automatically), and carries
/// the pagination/polling guard failures raised by the orchestration core.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[non_exhaustive]
pub enum DirectError {
    /// Non-2xx HTTP status or a connection-level failure (DNS, TLS, timeout).
    #[error("connection error (status {status:?}): {msg}")]
    Connection {
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
        /// Human-readable description of the failure.
        msg: String,
    },

    /// Structured business error reported by the vendor in the response body.
    #[error("api error {code:?}: {detail}")]
    Api {
        /// Vendor error code (`error_code`), when present.
        code: Option<i64>,
        /// Raw vendor error payload, preserved for diagnosis.
        detail: serde_json::Value,
    },

    /// An expected key was missing from an otherwise successful response.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The requested capability is not provided by any registered connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label (e.g. "paged", "legacy").
        capability: String,
    },

    /// Pagination stopped after the configured page bound.
    #[error("pagination limit reached for {endpoint} after {pages} pages")]
    PaginationLimit {
        /// Endpoint path being paginated.
        endpoint: String,
        /// Number of pages fetched before giving up.
        pages: u32,
    },

    /// The server reported a continuation offset that does not advance.
    #[error("non-advancing continuation offset for {endpoint}: {previous} -> {offset}")]
    NonAdvancingOffset {
        /// Endpoint path being paginated.
        endpoint: String,
        /// Offset requested by the previous page.
        previous: u64,
        /// Offset reported by the server.
        offset: u64,
    },

    /// A report did not become ready within the configured number of polls.
    #[error("report {report_id} not ready after {attempts} polls")]
    PollExhausted {
        /// Report identifier.
        report_id: i64,
        /// Number of polls performed.
        attempts: u32,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// Remaining vendor units fell below the configured reserve.
    #[error("units reserve reached: remaining={remaining} reserve={reserve}")]
    QuotaExceeded {
        /// Remaining units last reported by the server.
        remaining: u64,
        /// Reserve configured on the client.
        reserve: u64,
    },

    /// Several independent calls failed; contains the individual failures.
    #[error("multiple failures: {0:?}")]
    AllFailed(Vec<DirectError>),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl DirectError {
    /// Helper: build a `Connection` error.
    pub fn connection(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Connection {
            status,
            msg: msg.into(),
        }
    }

    /// Helper: build an `Api` error from a raw vendor payload.
    ///
    /// The numeric code is lifted from `error_code` when the payload carries one.
    #[must_use]
    pub fn api(detail: serde_json::Value) -> Self {
        let code = detail.get("error_code").and_then(serde_json::Value::as_i64);
        Self::Api { code, detail }
    }

    /// Helper: build a `MalformedResponse` error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Helper: build an `Unsupported` error for a capability string.
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Returns true if re-issuing the same request may succeed.
    ///
    /// Only transport-level failures and timeouts qualify; vendor business
    /// errors are deterministic for a given request.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { .. } | Self::RequestTimeout { .. } => true,
            Self::AllFailed(inner) => !inner.is_empty() && inner.iter().all(Self::is_retryable),
            _ => false,
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// A missing collection key is benign for listing helpers, which treat it as
    /// "nothing matched".
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::MalformedResponse(_) => false,
            Self::AllFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `AllFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

impl From<serde_json::Error> for DirectError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedResponse(e.to_string())
    }
}
