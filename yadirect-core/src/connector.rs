use async_trait::async_trait;

use crate::classify::{Classified, LegacyReply};
use crate::request::{LegacyRequest, Request};
use crate::{ApiVersion, DirectError, Endpoint};

/// Focused role trait for connectors that speak the paginated (v5) API.
#[async_trait]
pub trait PagedProvider: Send + Sync {
    /// Issue `request` against `endpoint` once and classify the answer.
    ///
    /// The answer is classified against `endpoint.result_key(request.method())`.
    /// `Err` is returned only for connection-level failures; HTTP statuses and
    /// vendor errors come back as [`Classified`] variants.
    async fn exchange(
        &self,
        endpoint: Endpoint,
        request: &Request,
    ) -> Result<Classified, DirectError>;
}

/// Focused role trait for connectors that speak the legacy (v4) API.
#[async_trait]
pub trait LegacyProvider: Send + Sync {
    /// Issue `request` once and return the decoded body.
    ///
    /// # Errors
    /// `Api` for `error_code` bodies, `Connection` for transport failures and
    /// non-2xx statuses.
    async fn invoke(&self, request: &LegacyRequest) -> Result<LegacyReply, DirectError>;
}

/// Common interface implemented by every API-generation connector.
///
/// A connector advertises what it can do through the `as_*_provider`
/// accessors; the orchestrator picks the first registered connector that
/// returns `Some` for the capability it needs.
pub trait DirectConnector: Send + Sync {
    /// Stable connector name used in logs and errors.
    fn name(&self) -> &'static str;

    /// API generation this connector talks to.
    fn version(&self) -> ApiVersion;

    /// Paginated-API capability, if supported.
    fn as_paged_provider(&self) -> Option<&dyn PagedProvider> {
        None
    }

    /// Legacy-API capability, if supported.
    fn as_legacy_provider(&self) -> Option<&dyn LegacyProvider> {
        None
    }
}
