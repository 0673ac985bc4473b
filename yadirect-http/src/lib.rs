#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

mod transport;
mod v4;
mod v5;

pub use transport::{HttpTransport, HttpTransportBuilder, VENDOR_SESSION_LIMIT};
pub use v4::V4Connector;
pub use v5::V5Connector;
