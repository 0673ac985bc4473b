//! Static endpoint table for the paginated (v5) API.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DirectError;

/// Resource collection served by the paginated API.
///
/// Each endpoint maps 1:1 to the path segment appended to the base URL, the
/// key holding the item array in a `get` response, and the field that
/// identifies an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Endpoint {
    /// Advertising campaigns.
    Campaigns,
    /// Ad groups.
    AdGroups,
    /// Ads.
    Ads,
    /// Keyword bids.
    Bids,
    /// Keywords.
    Keywords,
}

impl Endpoint {
    /// Every endpoint known to the table.
    pub const ALL: [Self; 5] = [
        Self::Campaigns,
        Self::AdGroups,
        Self::Ads,
        Self::Bids,
        Self::Keywords,
    ];

    /// URL path segment, e.g. `adgroups`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Campaigns => "campaigns",
            Self::AdGroups => "adgroups",
            Self::Ads => "ads",
            Self::Bids => "bids",
            Self::Keywords => "keywords",
        }
    }

    /// Key of the item array in a `get` response, e.g. `AdGroups`.
    #[must_use]
    pub const fn collection_key(self) -> &'static str {
        match self {
            Self::Campaigns => "Campaigns",
            Self::AdGroups => "AdGroups",
            Self::Ads => "Ads",
            Self::Bids => "Bids",
            Self::Keywords => "Keywords",
        }
    }

    /// Field holding the natural identifier of an item.
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::Bids => "KeywordId",
            _ => "Id",
        }
    }

    /// Key of the result array for `method`.
    ///
    /// `get` returns the collection key; mutations answer with `<Method>Results`
    /// (`set` -> `SetResults`, `add` -> `AddResults`).
    #[must_use]
    pub fn result_key(self, method: &str) -> Cow<'static, str> {
        if method == "get" {
            return Cow::Borrowed(self.collection_key());
        }
        let mut chars = method.chars();
        match chars.next() {
            Some(first) => {
                Cow::Owned(format!("{}{}Results", first.to_uppercase(), chars.as_str()))
            }
            None => Cow::Borrowed(self.collection_key()),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Endpoint {
    type Err = DirectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.path().eq_ignore_ascii_case(s))
            .ok_or_else(|| DirectError::InvalidArg(format!("unknown endpoint '{s}'")))
    }
}
