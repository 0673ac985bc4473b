//! Refuses calls once the vendor-reported units balance drops below a reserve.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use yadirect_core::{
    DirectError, Middleware, Transport, TransportRequest, TransportResponse, Units,
};

/// Transport wrapper watching the `Units` header of every answer.
///
/// The check happens before sending: the call that drives the balance under
/// the reserve still completes, and every later call fails fast with
/// [`DirectError::QuotaExceeded`] without touching the network.
pub struct UnitsReserveTransport {
    inner: Arc<dyn Transport>,
    reserve: u64,
    remaining: Mutex<Option<u64>>,
}

impl UnitsReserveTransport {
    /// Wrap `inner`, keeping at least `reserve` units untouched.
    #[must_use]
    pub fn new(inner: Arc<dyn Transport>, reserve: u64) -> Self {
        Self {
            inner,
            reserve,
            remaining: Mutex::new(None),
        }
    }

    /// Remaining balance from the latest answer that reported one.
    pub fn remaining(&self) -> Option<u64> {
        *self.remaining.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check whether a call may be sent under the configured reserve.
    ///
    /// # Errors
    /// Returns `QuotaExceeded` when the last known balance is below the reserve.
    pub fn should_allow_call(&self) -> Result<(), DirectError> {
        match self.remaining() {
            Some(remaining) if remaining < self.reserve => Err(DirectError::QuotaExceeded {
                remaining,
                reserve: self.reserve,
            }),
            _ => Ok(()),
        }
    }

    fn observe(&self, response: &TransportResponse) {
        let Some(remaining) = response
            .units
            .as_deref()
            .map(Units::parse)
            .and_then(|u| u.remaining)
        else {
            return;
        };
        *self.remaining.lock().unwrap_or_else(PoisonError::into_inner) = Some(remaining);
    }
}

#[async_trait]
impl Transport for UnitsReserveTransport {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, DirectError> {
        if let Err(err) = self.should_allow_call() {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "units reserve reached; refusing call");
            return Err(err);
        }
        let response = self.inner.send(request).await?;
        self.observe(&response);
        Ok(response)
    }
}

/// Middleware config for constructing a [`UnitsReserveTransport`].
pub struct UnitsReserveMiddleware {
    pub reserve: u64,
}

impl UnitsReserveMiddleware {
    #[must_use]
    pub const fn new(reserve: u64) -> Self {
        Self { reserve }
    }
}

impl Middleware for UnitsReserveMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn Transport>) -> Arc<dyn Transport> {
        Arc::new(UnitsReserveTransport::new(inner, self.reserve))
    }

    fn name(&self) -> &'static str {
        "UnitsReserve"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({ "reserve": self.reserve })
    }
}
