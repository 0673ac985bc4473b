use std::sync::Arc;

use async_trait::async_trait;
use url::Url;
use yadirect_core::{
    ApiVersion, Classified, ConnectionConfig, Credentials, DirectConnector, DirectError, Endpoint,
    PagedProvider, Request, Transport, TransportRequest, classify,
};

use crate::HttpTransport;

/// Connector for the versioned (v5) API.
///
/// Stateless apart from its configuration: units are returned inside every
/// [`Classified`] page and recorded by the caller.
pub struct V5Connector {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    base: Url,
    locale: String,
}

impl V5Connector {
    /// Static connector name used in logs.
    pub const NAME: &'static str = "yadirect-v5";

    /// Build over `transport`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `connection.v5_url` is not an absolute URL.
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        connection: &ConnectionConfig,
    ) -> Result<Self, DirectError> {
        Ok(Self {
            transport,
            credentials,
            base: base_url(&connection.v5_url)?,
            locale: connection.locale.clone(),
        })
    }

    /// Build over a default [`HttpTransport`].
    ///
    /// # Errors
    /// Returns `InvalidArg` for a bad base URL or `Connection` if the client cannot be built.
    pub fn http(credentials: Credentials, connection: &ConnectionConfig) -> Result<Self, DirectError> {
        Self::new(Arc::new(HttpTransport::new()?), credentials, connection)
    }

    /// Full URL of `endpoint`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the path cannot be joined.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, DirectError> {
        self.base
            .join(endpoint.path())
            .map_err(|e| DirectError::InvalidArg(format!("bad endpoint url: {e}")))
    }

    fn prepare(&self, endpoint: Endpoint, request: &Request) -> Result<TransportRequest, DirectError> {
        let url = self.endpoint_url(endpoint)?;
        Ok(TransportRequest::new(url.as_str(), request.to_body()?)
            .header("Authorization", format!("Bearer {}", self.credentials.token()))
            .header("Client-Login", self.credentials.login())
            .header("Accept-Language", self.locale.as_str()))
    }
}

/// Parse a base URL, making sure joins append rather than replace the last segment.
pub(crate) fn base_url(raw: &str) -> Result<Url, DirectError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| DirectError::InvalidArg(format!("bad base url '{raw}': {e}")))
}

#[async_trait]
impl PagedProvider for V5Connector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "yadirect_http::v5::exchange",
            skip(self, request),
            fields(endpoint = %endpoint, method = request.method(), offset = ?request.offset()),
        )
    )]
    async fn exchange(
        &self,
        endpoint: Endpoint,
        request: &Request,
    ) -> Result<Classified, DirectError> {
        let prepared = self.prepare(endpoint, request)?;
        let response = self.transport.send(prepared).await?;
        let classified = classify(&endpoint.result_key(request.method()), &response);
        #[cfg(feature = "tracing")]
        tracing::info!(
            status = response.status,
            units = response.units.as_deref().unwrap_or("-"),
            outcome = outcome_label(&classified),
            "v5 exchange"
        );
        Ok(classified)
    }
}

#[cfg(feature = "tracing")]
const fn outcome_label(c: &Classified) -> &'static str {
    match c {
        Classified::Success(_) => "success",
        Classified::RecoverableEmpty { .. } => "empty",
        Classified::ApiError { .. } => "api_error",
        Classified::ConnectionError { .. } => "connection_error",
    }
}

impl DirectConnector for V5Connector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn version(&self) -> ApiVersion {
        ApiVersion::V5
    }

    fn as_paged_provider(&self) -> Option<&dyn PagedProvider> {
        Some(self as &dyn PagedProvider)
    }
}
