#![doc = include_str!("../README.md")]

use std::collections::{HashMap, VecDeque};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use yadirect_core::{DirectError, Endpoint, Transport, TransportRequest, TransportResponse};

pub mod fixtures;

/// Instruction for how one exchange should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided answer.
    Return(TransportResponse),
    /// Fail with the provided connection-level error.
    Fail(DirectError),
    /// Never answer (simulate a stalled session).
    Hang,
}

impl From<TransportResponse> for MockBehavior {
    fn from(response: TransportResponse) -> Self {
        Self::Return(response)
    }
}

/// What a request targets, derived from its URL and body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// v5 call: endpoint from the last URL segment, offset from `params.Page.Offset`.
    Paged {
        /// Target endpoint.
        endpoint: Endpoint,
        /// Requested page offset (0 for the first page).
        offset: u64,
    },
    /// v4 call, keyed by the `method` in the body.
    Legacy {
        /// Method name.
        method: String,
    },
}

impl Route {
    /// Derive the route of `request`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the body is not a recognizable call.
    pub fn of(request: &TransportRequest) -> Result<Self, DirectError> {
        let body = request.json()?;
        if let Some(params) = body.get("params") {
            let segment = request
                .url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default();
            let endpoint = Endpoint::from_str(segment)?;
            let offset = params
                .get("Page")
                .and_then(|p| p.get("Offset"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            return Ok(Self::Paged { endpoint, offset });
        }
        match body.get("method").and_then(Value::as_str) {
            Some(method) => Ok(Self::Legacy {
                method: method.to_string(),
            }),
            None => Err(DirectError::InvalidArg(format!(
                "unrecognized request to {}",
                request.url
            ))),
        }
    }
}

type Handler = dyn Fn(&Route, &Value) -> Option<MockBehavior> + Send + Sync;

#[derive(Default)]
struct InternalState {
    rules: HashMap<Route, VecDeque<MockBehavior>>,
    requests: Vec<TransportRequest>,
}

impl InternalState {
    // The last scripted behavior of a route repeats forever.
    fn next(&mut self, route: &Route) -> Option<MockBehavior> {
        let queue = self.rules.get_mut(route)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

struct InFlight<'a> {
    current: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn enter(current: &'a AtomicUsize, peak: &AtomicUsize) -> Self {
        let now = current.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        Self { current }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Scripted transport for tests. Cheap to share behind an `Arc`.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<InternalState>,
    handler: Option<Arc<Handler>>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every exchange.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue `behavior` for `route`.
    #[must_use]
    pub fn on(self, route: Route, behavior: impl Into<MockBehavior>) -> Self {
        self.lock()
            .rules
            .entry(route)
            .or_default()
            .push_back(behavior.into());
        self
    }

    /// Queue an answer for the page of `endpoint` starting at `offset`.
    #[must_use]
    pub fn on_page(self, endpoint: Endpoint, offset: u64, behavior: impl Into<MockBehavior>) -> Self {
        self.on(Route::Paged { endpoint, offset }, behavior)
    }

    /// Queue an answer for the legacy `method`.
    #[must_use]
    pub fn on_legacy(self, method: &str, behavior: impl Into<MockBehavior>) -> Self {
        self.on(
            Route::Legacy {
                method: method.to_string(),
            },
            behavior,
        )
    }

    /// Answer unscripted routes with `handler`, which sees the route and the decoded body.
    #[must_use]
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Route, &Value) -> Option<MockBehavior> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InternalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Decoded bodies of the requests sent to `endpoint`.
    #[must_use]
    pub fn bodies_for(&self, endpoint: Endpoint) -> Vec<Value> {
        self.lock()
            .requests
            .iter()
            .filter(|r| matches!(Route::of(r), Ok(Route::Paged { endpoint: e, .. }) if e == endpoint))
            .filter_map(|r| r.json().ok())
            .collect()
    }

    /// Decoded bodies of the legacy calls to `method`.
    #[must_use]
    pub fn legacy_bodies(&self, method: &str) -> Vec<Value> {
        self.lock()
            .requests
            .iter()
            .filter(|r| matches!(Route::of(r), Ok(Route::Legacy { method: m }) if m == method))
            .filter_map(|r| r.json().ok())
            .collect()
    }

    /// Highest number of exchanges observed in flight at once.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Exchanges currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &'static str {
        "yadirect-mock"
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, DirectError> {
        let route = Route::of(&request)?;
        let body = request.json()?;
        let scripted = {
            let mut state = self.lock();
            state.requests.push(request);
            state.next(&route)
        };
        let behavior = scripted.or_else(|| self.handler.as_ref().and_then(|h| h(&route, &body)));

        let _guard = InFlight::enter(&self.in_flight, &self.peak);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match behavior {
            Some(MockBehavior::Return(response)) => Ok(response),
            Some(MockBehavior::Fail(err)) => Err(err),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                Err(DirectError::Other("mock hang resumed".into()))
            }
            None => Err(DirectError::Other(format!("no mock behavior for {route:?}"))),
        }
    }
}
