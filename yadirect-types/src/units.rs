//! Vendor-reported units (quota consumption) values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Units value reported by the server for one exchange.
///
/// The paginated API sends `spent/remaining/daily_limit` in the `Units` header;
/// the legacy API may send a bare counter inline. The raw text is always kept,
/// the numeric parts are filled in when they parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Units {
    /// Raw value exactly as received.
    pub raw: String,
    /// Units consumed by the call.
    pub spent: Option<u64>,
    /// Units left for the account.
    pub remaining: Option<u64>,
    /// Daily limit of the account.
    pub daily_limit: Option<u64>,
}

impl Units {
    /// Parse a raw header/body value. Never fails: unparsable parts stay `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let parts: Vec<Option<u64>> = raw.split('/').map(|p| p.trim().parse().ok()).collect();
        let (spent, remaining, daily_limit) = match parts.as_slice() {
            [spent, remaining, limit] => (*spent, *remaining, *limit),
            [counter] => (*counter, None, None),
            _ => (None, None, None),
        };
        Self {
            raw: raw.to_string(),
            spent,
            remaining,
            daily_limit,
        }
    }

    /// Build from an inline JSON value (number or string).
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::parse(s)),
            serde_json::Value::Number(n) => Some(Self::parse(&n.to_string())),
            _ => None,
        }
    }
}

impl FromStr for Units {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
