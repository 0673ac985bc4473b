use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use yadirect_core::{
    Body, DirectError, Transport, TransportRequest, TransportResponse, UNITS_HEADER,
};
use yadirect_middleware::TransportBuilder;

/// Session limit the vendor applies per account.
pub const VENDOR_SESSION_LIMIT: usize = 10;

fn connection_error(err: &reqwest::Error) -> DirectError {
    DirectError::connection(err.status().map(|s| s.as_u16()), err.to_string())
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Start building a transport.
    #[must_use]
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Transport with default settings.
    ///
    /// # Errors
    /// Returns `Connection` if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, DirectError> {
        Self::builder().build()
    }

    /// Use an existing client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Default transport wrapped with the vendor session limit; add more layers before `build()`.
    ///
    /// # Errors
    /// Returns `Connection` if the TLS backend cannot be initialized.
    pub fn layered() -> Result<TransportBuilder, DirectError> {
        let raw = std::sync::Arc::new(Self::new()?);
        Ok(TransportBuilder::new(raw).with_session_limit(VENDOR_SESSION_LIMIT))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, DirectError> {
        let mut builder = self
            .client
            .post(request.url.as_str())
            .header(CONTENT_TYPE, "application/json; charset=utf-8");
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| connection_error(&e))?;

        let status = response.status().as_u16();
        let units = response
            .headers()
            .get(UNITS_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| connection_error(&e))?;

        Ok(TransportResponse {
            status,
            units,
            body: Body::decode(bytes.to_vec()),
        })
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: None,
        }
    }
}

impl HttpTransportBuilder {
    /// Whole-exchange timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// TCP/TLS connect timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    /// Returns `Connection` if the client cannot be constructed.
    pub fn build(self) -> Result<HttpTransport, DirectError> {
        let agent = self
            .user_agent
            .unwrap_or_else(|| format!("yadirect/{}", env!("CARGO_PKG_VERSION")));
        let client = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(agent)
            .build()
            .map_err(|e| connection_error(&e))?;
        Ok(HttpTransport { client })
    }
}
