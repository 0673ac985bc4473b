//! yadirect-core
//!
//! Core types, traits, and utilities shared across the yadirect ecosystem.
//!
//! - `transport`: the `Transport` trait (one HTTP POST per call) and its request/response types.
//! - `classify`: turns a transport response into success, recoverable-empty, API or connection outcomes.
//! - `connector`: the `DirectConnector` trait and the per-API-generation provider traits.
//! - `request`: immutable v5 and v4 request shapes; pagination works on copies.
//! - `units`: the shared last-value units cell.
//! - `merge`: folding items into an id-keyed aggregate.
//!
//! Nothing in this crate performs I/O by itself or depends on an async
//! runtime; connectors and the orchestrator bring Tokio.
#![warn(missing_docs)]

/// Response classification for both API generations.
pub mod classify;
/// Connector capability traits and the primary `DirectConnector` interface.
pub mod connector;
pub mod merge;
/// Middleware trait implemented by transport wrappers.
pub mod middleware;
pub mod request;
pub mod transport;
pub mod units;

pub use classify::{Classified, LegacyReply, Page, classify, classify_legacy};
pub use connector::{DirectConnector, LegacyProvider, PagedProvider};
pub use merge::{collect_items, fold_items, item_id};
pub use middleware::Middleware;
pub use request::{LegacyRequest, Request, SelectionCriteria};
pub use transport::{Body, Transport, TransportRequest, TransportResponse, UNITS_HEADER};
pub use units::UnitsTracker;

pub use yadirect_types::{
    AggregateResult, ApiVersion, ConnectionConfig, Credentials, DirectConfig, DirectError,
    DispatchReport, Endpoint, Item, ItemId, QueryFailure, RetryConfig, Units,
};
