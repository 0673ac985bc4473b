//! Bounds the number of simultaneous sessions opened through a transport.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use yadirect_core::{DirectError, Middleware, Transport, TransportRequest, TransportResponse};

/// Transport wrapper holding a semaphore permit for the duration of each exchange.
///
/// The vendor counts concurrent sessions per account; requests beyond the
/// limit wait for a permit instead of failing.
pub struct SessionLimitedTransport {
    inner: Arc<dyn Transport>,
    permits: Arc<Semaphore>,
    limit: usize,
}

impl SessionLimitedTransport {
    /// Wrap `inner`, allowing at most `limit` exchanges at once (minimum 1).
    #[must_use]
    pub fn new(inner: Arc<dyn Transport>, limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            inner,
            permits: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Configured session limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Permits currently free.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl Transport for SessionLimitedTransport {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, DirectError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| DirectError::Other("session limiter closed".into()))?;
        self.inner.send(request).await
    }
}

/// Middleware config for constructing a [`SessionLimitedTransport`].
pub struct SessionLimitMiddleware {
    pub limit: usize,
}

impl SessionLimitMiddleware {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Middleware for SessionLimitMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn Transport>) -> Arc<dyn Transport> {
        Arc::new(SessionLimitedTransport::new(inner, self.limit))
    }

    fn name(&self) -> &'static str {
        "SessionLimit"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({ "limit": self.limit })
    }
}
