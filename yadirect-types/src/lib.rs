//! yadirect-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod credentials;
mod endpoint;
mod error;
mod reports;
mod units;

pub use config::{
    ApiVersion, ConnectionConfig, DEFAULT_WORDSTAT_GEO, DirectConfig, RetryConfig, V4_SANDBOX_URL,
    V4_URL, V5_SANDBOX_URL, V5_URL,
};
pub use credentials::{Credentials, LOGIN_ENV, TOKEN_ENV};
pub use endpoint::Endpoint;
pub use error::DirectError;
pub use reports::{AggregateResult, DispatchReport, Item, ItemId, QueryFailure};
pub use units::Units;
