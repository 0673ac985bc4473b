use std::sync::Arc;

use async_trait::async_trait;
use yadirect_core::{
    ApiVersion, ConnectionConfig, Credentials, DirectConnector, DirectError, LegacyProvider,
    LegacyReply, LegacyRequest, Transport, TransportRequest, classify_legacy,
};

use crate::HttpTransport;

/// Connector for the legacy (v4) JSON API.
pub struct V4Connector {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    url: String,
    locale: String,
}

impl V4Connector {
    /// Static connector name used in logs.
    pub const NAME: &'static str = "yadirect-v4";

    /// Build over `transport`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `connection.v4_url` is not an absolute URL.
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        connection: &ConnectionConfig,
    ) -> Result<Self, DirectError> {
        let url = url::Url::parse(&connection.v4_url).map_err(|e| {
            DirectError::InvalidArg(format!("bad legacy url '{}': {e}", connection.v4_url))
        })?;
        Ok(Self {
            transport,
            credentials,
            url: url.into(),
            locale: connection.locale.clone(),
        })
    }

    /// Build over a default [`HttpTransport`].
    ///
    /// # Errors
    /// Returns `InvalidArg` for a bad URL or `Connection` if the client cannot be built.
    pub fn http(credentials: Credentials, connection: &ConnectionConfig) -> Result<Self, DirectError> {
        Self::new(Arc::new(HttpTransport::new()?), credentials, connection)
    }

    /// Login the connector authenticates as.
    #[must_use]
    pub fn login(&self) -> &str {
        self.credentials.login()
    }
}

#[async_trait]
impl LegacyProvider for V4Connector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "yadirect_http::v4::invoke",
            skip(self, request),
            fields(method = request.method()),
        )
    )]
    async fn invoke(&self, request: &LegacyRequest) -> Result<LegacyReply, DirectError> {
        let body = request.to_body(self.credentials.token(), &self.locale)?;
        let response = self
            .transport
            .send(TransportRequest::new(self.url.as_str(), body))
            .await?;
        let reply = classify_legacy(&response);
        #[cfg(feature = "tracing")]
        if let Err(err) = &reply {
            tracing::warn!(error = %err, "v4 call failed");
        }
        reply
    }
}

impl DirectConnector for V4Connector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn version(&self) -> ApiVersion {
        ApiVersion::V4
    }

    fn as_legacy_provider(&self) -> Option<&dyn LegacyProvider> {
        Some(self as &dyn LegacyProvider)
    }
}
