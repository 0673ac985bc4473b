//! Builder for composing a transport with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Layers form an "onion" around the raw transport:
//!
//! ```text
//! Connector
//!     ↓
//! Outermost layer (e.g., SessionLimit - waits for a permit first)
//!     ↓
//! Inner layer (e.g., Retry - re-sends transient failures)
//!     ↓
//! Raw transport (e.g., HttpTransport - performs the POST)
//! ```
//!
//! The `layers` vector stores middleware **outermost-first** (last added =
//! outermost) and `build()` applies them in reverse.
//!
//! ```text
//! builder.with_retry(..).with_session_limit(..)
//!
//! Storage: [SessionLimit, Retry]
//! Result:  SessionLimit(Retry(Raw))
//! ```
//!
//! With this ordering a retried exchange keeps its session permit across
//! attempts.

use std::sync::Arc;

use serde_json::{Value, json};
use yadirect_core::{Middleware, RetryConfig, Transport};

use crate::retry::RetryMiddleware;
use crate::session_limit::SessionLimitMiddleware;
use crate::units_reserve::UnitsReserveMiddleware;

/// Generic middleware builder for composing a transport with layered wrappers.
///
/// See [module-level documentation](self) for details on ordering.
pub struct TransportBuilder {
    raw: Arc<dyn Transport>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl TransportBuilder {
    /// Create a new builder from a raw, unwrapped transport.
    #[must_use]
    pub fn new(raw: Arc<dyn Transport>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    fn replace(mut self, layer: Box<dyn Middleware>) -> Self {
        let name = layer.name();
        self.layers.retain(|m| m.name() != name);
        self.layers.insert(0, layer);
        self
    }

    /// Add or replace the session limit as the outermost layer.
    #[must_use]
    pub fn with_session_limit(self, limit: usize) -> Self {
        self.replace(Box::new(SessionLimitMiddleware::new(limit)))
    }

    /// Add or replace the units reserve as the outermost layer.
    #[must_use]
    pub fn with_units_reserve(self, reserve: u64) -> Self {
        self.replace(Box::new(UnitsReserveMiddleware::new(reserve)))
    }

    /// Add or replace retries as the outermost layer.
    #[must_use]
    pub fn with_retry(self, config: RetryConfig) -> Self {
        self.replace(Box::new(RetryMiddleware::new(config)))
    }

    /// Remove every layer called `name`.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.layers.retain(|m| m.name() != name);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Layer names in outermost-first order.
    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|m| m.name()).collect()
    }

    /// Snapshot of the stack, outermost first, with the raw transport last.
    #[must_use]
    pub fn describe(&self) -> Value {
        let mut out: Vec<Value> = self
            .layers
            .iter()
            .map(|m| json!({ "name": m.name(), "config": m.config_json() }))
            .collect();
        out.push(json!({ "name": "RawTransport", "config": { "name": self.raw.name() } }));
        Value::Array(out)
    }

    /// Build the wrapped transport.
    ///
    /// Applies layers innermost first so that `layers[0]` ends up outermost.
    #[must_use]
    pub fn build(self) -> Arc<dyn Transport> {
        let mut acc: Arc<dyn Transport> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
