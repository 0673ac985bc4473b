//! yadirect talks to the Yandex.Direct advertising API.
//!
//! Overview
//! - Transparent pagination: a `get` whose answer carries `LimitedBy` is
//!   re-issued at the new offset until the whole collection is assembled.
//! - Bounded fan-out: many independent queries run in sequential waves of at
//!   most `concurrency_limit` sessions; failures are isolated per query.
//! - Units tracking: the `Units` header of every successful exchange is kept
//!   in a shared last-value cell and also returned with each result.
//! - Wordstat reports: the legacy (v4) report sub-API is polled at a fixed
//!   interval until the report is ready.
//!
//! Key behaviors and trade-offs
//! - Any error on any page fails the whole logical query; no partial data is returned.
//! - Vendor `error` bodies are never retried. Transport retries are opt-in via
//!   `yadirect-middleware`.
//! - Pagination and polling are unbounded by default; set `max_pages`,
//!   `max_poll_attempts` or `request_timeout` on the builder to bound them.
//!
//! Examples
//! ```rust,ignore
//! use yadirect::{ConnectionConfig, Credentials, Direct};
//!
//! let direct = Direct::builder()
//!     .with_http(&Credentials::from_env()?, &ConnectionConfig::default())?
//!     .build()?;
//!
//! let campaigns = direct.campaigns(None).await?;
//! let ids: Vec<i64> = campaigns.iter().map(|(id, _)| *id).collect();
//! let report = direct.campaigns_bids(&ids).await?;
//! println!("{} bids, units now {:?}", report.result.len(), direct.units());
//! ```
//!
//! See `yadirect/examples/` for runnable demonstrations.
#![warn(missing_docs)]

pub mod blocking;
pub(crate) mod core;
mod router;

pub use core::{Direct, DirectBuilder, with_request_deadline};
pub use router::bids::BID_FIELDS;
pub use router::campaigns::{AD_FIELDS, AD_GROUP_FIELDS, CAMPAIGN_FIELDS, TEXT_CAMPAIGN_FIELDS};
pub use router::dispatch::Query;
pub use router::paginate::Fetched;
pub use router::util::{partition_size, run_in_waves};

pub use yadirect_http::{HttpTransport, HttpTransportBuilder, V4Connector, V5Connector};
pub use yadirect_middleware::{
    RetryMiddleware, SessionLimitMiddleware, TransportBuilder, UnitsReserveMiddleware,
};

// Re-export core types for convenience
pub use yadirect_core::{
    AggregateResult, ApiVersion, Classified, ConnectionConfig, Credentials, DirectConfig,
    DirectConnector, DirectError, DispatchReport, Endpoint, Item, ItemId, LegacyProvider,
    LegacyReply, LegacyRequest, PagedProvider, QueryFailure, Request, RetryConfig,
    SelectionCriteria, Transport, TransportRequest, TransportResponse, Units, UnitsTracker,
};
pub use yadirect_types::DEFAULT_WORDSTAT_GEO;
