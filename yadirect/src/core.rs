use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use yadirect_core::{
    ConnectionConfig, Credentials, DirectConfig, DirectConnector, DirectError, LegacyProvider,
    PagedProvider, Transport, Units, UnitsTracker,
};
use yadirect_http::{HttpTransport, V4Connector, V5Connector};

/// Orchestrator that paginates, fans out and polls over the registered connectors.
pub struct Direct {
    pub(crate) connectors: Vec<Arc<dyn DirectConnector>>,
    pub(crate) cfg: DirectConfig,
    pub(crate) units: UnitsTracker,
    pub(crate) client_login: Option<String>,
}

/// Builder for constructing a `Direct` orchestrator with custom configuration.
pub struct DirectBuilder {
    connectors: Vec<Arc<dyn DirectConnector>>,
    cfg: DirectConfig,
    client_login: Option<String>,
}

impl Default for DirectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectBuilder {
    /// Create a new builder with vendor-aligned defaults.
    ///
    /// - Starts with no connectors; register at least one via [`with_connector`](Self::with_connector)
    ///   or [`with_http`](Self::with_http).
    /// - 10 concurrent sessions per wave, 1000 ids per selection list,
    ///   10 000 bids per mutation call.
    /// - No page bound, no poll bound and no request deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: DirectConfig::default(),
            client_login: None,
        }
    }

    /// Register a connector.
    ///
    /// For each capability the first registered connector that provides it is used.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn DirectConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Register v5 and v4 connectors sharing `transport`, and remember the login.
    ///
    /// # Errors
    /// Returns `InvalidArg` when a URL in `connection` is not absolute.
    pub fn with_transport(
        mut self,
        transport: Arc<dyn Transport>,
        credentials: &Credentials,
        connection: &ConnectionConfig,
    ) -> Result<Self, DirectError> {
        let v5 = V5Connector::new(Arc::clone(&transport), credentials.clone(), connection)?;
        let v4 = V4Connector::new(transport, credentials.clone(), connection)?;
        self.client_login = Some(credentials.login().to_string());
        Ok(self.with_connector(Arc::new(v5)).with_connector(Arc::new(v4)))
    }

    /// Register both connectors over a default [`HttpTransport`].
    ///
    /// # Errors
    /// Returns `Connection` if the HTTP client cannot be built and `InvalidArg`
    /// for bad URLs.
    pub fn with_http(
        self,
        credentials: &Credentials,
        connection: &ConnectionConfig,
    ) -> Result<Self, DirectError> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new()?);
        self.with_transport(transport, credentials, connection)
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: DirectConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Maximum queries in flight per dispatch wave.
    #[must_use]
    pub const fn concurrency_limit(mut self, limit: usize) -> Self {
        self.cfg.concurrency_limit = limit;
        self
    }

    /// Maximum ids placed in one selection-criteria list.
    #[must_use]
    pub const fn max_ids_per_request(mut self, n: usize) -> Self {
        self.cfg.max_ids_per_request = n;
        self
    }

    /// Maximum records per mutation call.
    #[must_use]
    pub const fn max_bids_per_call(mut self, n: usize) -> Self {
        self.cfg.max_bids_per_call = n;
        self
    }

    /// Fail a logical query with `PaginationLimit` after this many pages.
    #[must_use]
    pub const fn max_pages(mut self, pages: u32) -> Self {
        self.cfg.max_pages = Some(pages);
        self
    }

    /// Delay between report polls.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.cfg.poll_interval = interval;
        self
    }

    /// Fail report polling with `PollExhausted` after this many polls.
    #[must_use]
    pub const fn max_poll_attempts(mut self, attempts: u32) -> Self {
        self.cfg.max_poll_attempts = Some(attempts);
        self
    }

    /// Deadline applied to each dispatch wave and to each report poll loop.
    ///
    /// In a wave, queries still running at the deadline fail with
    /// `RequestTimeout`; queries that already finished keep their results.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Regions used when creating wordstat reports.
    #[must_use]
    pub fn wordstat_geo(mut self, geo: Vec<i64>) -> Self {
        self.cfg.wordstat_geo = geo;
        self
    }

    /// Login used by `client_info`.
    #[must_use]
    pub fn client_login(mut self, login: impl Into<String>) -> Self {
        self.client_login = Some(login.into());
        self
    }

    /// Build the `Direct` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors are registered or a size limit is zero.
    pub fn build(self) -> Result<Direct, DirectError> {
        if self.connectors.is_empty() {
            return Err(DirectError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        for (name, value) in [
            ("concurrency_limit", self.cfg.concurrency_limit),
            ("max_ids_per_request", self.cfg.max_ids_per_request),
            ("max_bids_per_call", self.cfg.max_bids_per_call),
        ] {
            if value == 0 {
                return Err(DirectError::InvalidArg(format!("{name} must be positive")));
            }
        }
        Ok(Direct {
            connectors: self.connectors,
            cfg: self.cfg,
            units: UnitsTracker::new(),
            client_login: self.client_login,
        })
    }
}

impl Direct {
    /// Start building a new `Direct` instance.
    ///
    /// ```rust,ignore
    /// use yadirect::{Direct, Credentials, ConnectionConfig};
    ///
    /// let direct = Direct::builder()
    ///     .with_http(&Credentials::from_env()?, &ConnectionConfig::default())?
    ///     .concurrency_limit(5)
    ///     .build()?;
    /// let campaigns = direct.campaigns(None).await?;
    /// ```
    #[must_use]
    pub fn builder() -> DirectBuilder {
        DirectBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DirectConfig {
        &self.cfg
    }

    /// Units reported by the most recent successful exchange.
    #[must_use]
    pub fn units(&self) -> Option<Units> {
        self.units.current()
    }

    /// Handle to the shared units cell.
    #[must_use]
    pub fn units_tracker(&self) -> UnitsTracker {
        self.units.clone()
    }

    pub(crate) fn paged(&self) -> Result<&dyn PagedProvider, DirectError> {
        self.connectors
            .iter()
            .find_map(|c| c.as_paged_provider())
            .ok_or_else(|| DirectError::unsupported("paged"))
    }

    pub(crate) fn legacy(&self) -> Result<&dyn LegacyProvider, DirectError> {
        self.connectors
            .iter()
            .find_map(|c| c.as_legacy_provider())
            .ok_or_else(|| DirectError::unsupported("legacy"))
    }
}

/// Run `fut` under an optional deadline, mapping expiry to `RequestTimeout(capability)`.
pub async fn with_request_deadline<F, T>(
    deadline: Option<Duration>,
    capability: &str,
    fut: F,
) -> Result<T, DirectError>
where
    F: Future<Output = Result<T, DirectError>>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .unwrap_or_else(|_| Err(DirectError::request_timeout(capability))),
        None => fut.await,
    }
}
