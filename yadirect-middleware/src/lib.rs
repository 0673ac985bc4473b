#![doc = include_str!("../README.md")]
//! yadirect-middleware
//!
//! Re-exports for transport middleware.

mod builder;
mod retry;
mod session_limit;
mod units_reserve;

pub use crate::builder::TransportBuilder;
pub use crate::retry::{RetryMiddleware, RetryTransport, is_transient, jitter_wait};
pub use crate::session_limit::{SessionLimitMiddleware, SessionLimitedTransport};
pub use crate::units_reserve::{UnitsReserveMiddleware, UnitsReserveTransport};
