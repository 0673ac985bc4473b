//! Opt-in re-issue of transient transport failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde_json::Value;
use yadirect_core::{
    DirectError, Middleware, RetryConfig, Transport, TransportRequest, TransportResponse,
};

/// Add up to `jitter_percent` of `base_ms` as random jitter.
pub fn jitter_wait(base_ms: u64, jitter_percent: u32) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms + rng.random_range(0..jitter_range)
}

fn carries_vendor_error(response: &TransportResponse) -> bool {
    let Some(body) = response.body.as_json() else {
        return false;
    };
    let error = body.get("error").is_some_and(|e| !e.is_null());
    let code = body
        .get("error_code")
        .is_some_and(|c| !c.is_null() && c != &Value::from(0));
    error || code
}

/// True when `outcome` is worth sending again unchanged.
#[must_use]
pub fn is_transient(outcome: &Result<TransportResponse, DirectError>) -> bool {
    match outcome {
        Ok(response) => response.status >= 500 && !carries_vendor_error(response),
        Err(err) => err.is_retryable(),
    }
}

/// Transport wrapper re-sending transient failures with exponential backoff.
pub struct RetryTransport {
    inner: Arc<dyn Transport>,
    config: RetryConfig,
}

impl RetryTransport {
    #[must_use]
    pub fn new(inner: Arc<dyn Transport>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Configured backoff.
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for RetryTransport {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, DirectError> {
        let mut retry = 0;
        loop {
            let outcome = self.inner.send(request.clone()).await;
            if retry >= self.config.max_retries || !is_transient(&outcome) {
                return outcome;
            }
            let wait = jitter_wait(
                self.config.base_delay_ms(retry),
                u32::from(self.config.jitter_percent),
            );
            #[cfg(feature = "tracing")]
            tracing::debug!(url = %request.url, retry, wait_ms = wait, "retrying transient failure");
            tokio::time::sleep(Duration::from_millis(wait)).await;
            retry += 1;
        }
    }
}

/// Middleware config for constructing a [`RetryTransport`].
pub struct RetryMiddleware {
    pub config: RetryConfig,
}

impl RetryMiddleware {
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self { config }
    }
}

impl Middleware for RetryMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn Transport>) -> Arc<dyn Transport> {
        Arc::new(RetryTransport::new(inner, self.config))
    }

    fn name(&self) -> &'static str {
        "Retry"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_retries": self.config.max_retries,
            "min_backoff_ms": self.config.min_backoff_ms,
            "max_backoff_ms": self.config.max_backoff_ms,
            "factor": self.config.factor,
            "jitter_percent": self.config.jitter_percent,
        })
    }
}
