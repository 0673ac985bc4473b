//! Configuration types shared across orchestrators and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Production base URL of the paginated (v5) API.
pub const V5_URL: &str = "https://api.direct.yandex.com/json/v5/";
/// Production URL of the legacy (v4) JSON API.
pub const V4_URL: &str = "https://api.direct.yandex.ru/v4/json/";
/// Sandbox base URL of the paginated (v5) API.
pub const V5_SANDBOX_URL: &str = "https://api-sandbox.direct.yandex.com/json/v5/";
/// Sandbox URL of the legacy (v4) JSON API.
pub const V4_SANDBOX_URL: &str = "https://api-sandbox.direct.yandex.ru/v4/json/";

/// Wordstat region used when the caller does not pick one (Russia).
pub const DEFAULT_WORDSTAT_GEO: i64 = 225;

/// API generation served by a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiVersion {
    /// Legacy JSON API: single URL, method in the body, `error_code` errors.
    V4,
    /// Versioned API: one path per endpoint, bearer auth, `LimitedBy` pagination.
    V5,
}

/// Where and how connectors talk to the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL for v5 endpoints; the endpoint path is appended.
    pub v5_url: String,
    /// Full URL of the v4 JSON API.
    pub v4_url: String,
    /// Value of `Accept-Language` and of the v4 `locale` field.
    pub locale: String,
}

impl ConnectionConfig {
    /// Sandbox URLs for both API generations.
    #[must_use]
    pub fn sandbox() -> Self {
        Self {
            v5_url: V5_SANDBOX_URL.to_string(),
            v4_url: V4_SANDBOX_URL.to_string(),
            ..Self::default()
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            v5_url: V5_URL.to_string(),
            v4_url: V4_URL.to_string(),
            locale: "ru".to_string(),
        }
    }
}

/// Global configuration for the `Direct` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectConfig {
    /// Maximum number of simultaneous API sessions per dispatch wave.
    pub concurrency_limit: usize,
    /// Maximum ids placed in one selection-criteria list.
    pub max_ids_per_request: usize,
    /// Maximum records submitted in one mutation call.
    pub max_bids_per_call: usize,
    /// Optional bound on pages fetched for one logical query.
    pub max_pages: Option<u32>,
    /// Fixed delay between report polls.
    pub poll_interval: Duration,
    /// Optional bound on report polls before giving up.
    pub max_poll_attempts: Option<u32>,
    /// Optional deadline applied to each dispatch wave and each report poll loop.
    pub request_timeout: Option<Duration>,
    /// Regions used for wordstat reports.
    pub wordstat_geo: Vec<i64>,
}

impl Default for DirectConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 10,
            max_ids_per_request: 1000,
            max_bids_per_call: 10_000,
            max_pages: None,
            poll_interval: Duration::from_secs(1),
            max_poll_attempts: None,
            request_timeout: None,
            wordstat_geo: vec![DEFAULT_WORDSTAT_GEO],
        }
    }
}

/// Exponential backoff used by the opt-in retry layer.
///
/// Only connection failures and 5xx answers without a vendor error body are
/// retried; business errors are returned on the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds.
    pub min_backoff_ms: u64,
    /// Upper bound on a single delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor applied after each failed attempt (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl RetryConfig {
    /// Delay before retry number `retry` (0-based), without jitter.
    #[must_use]
    pub fn base_delay_ms(&self, retry: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 0..retry {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                return self.max_backoff_ms;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            min_backoff_ms: 200,
            max_backoff_ms: 5_000,
            factor: 2,
            jitter_percent: 20,
        }
    }
}
