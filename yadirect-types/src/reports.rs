//! Report envelopes produced by the orchestrator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::error::DirectError;

/// Natural identifier of an item (`Id`, or `KeywordId` for bids).
pub type ItemId = i64;

/// Opaque vendor record (campaign, ad group, ad, bid).
pub type Item = serde_json::Value;

/// Items keyed by their natural identifier.
///
/// Insertion order is irrelevant; a later item with an existing id replaces
/// the earlier one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    items: HashMap<ItemId, Item>,
}

impl AggregateResult {
    /// Empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one item, returning the item it replaced.
    pub fn insert(&mut self, id: ItemId, item: Item) -> Option<Item> {
        self.items.insert(id, item)
    }

    /// Move every entry of `other` into `self`.
    pub fn absorb(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    /// Look up one item.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no item was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over `(id, item)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &Item)> {
        self.items.iter()
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> HashMap<ItemId, Item> {
        self.items
    }
}

impl FromIterator<(ItemId, Item)> for AggregateResult {
    fn from_iter<T: IntoIterator<Item = (ItemId, Item)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AggregateResult {
    type Item = (ItemId, Item);
    type IntoIter = std::collections::hash_map::IntoIter<ItemId, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Failure of one logical query inside a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFailure {
    /// Position of the query in the submitted list.
    pub index: usize,
    /// Endpoint the query targeted.
    pub endpoint: Endpoint,
    /// Error that ended the query.
    pub error: DirectError,
}

/// Summary of a bounded concurrent dispatch.
///
/// Carries the merged items of every successful query, the failures of the
/// others, and the size of each wave that was executed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Items of every successful query, keyed by id.
    pub result: AggregateResult,
    /// Per-query failures; siblings are unaffected.
    pub failures: Vec<QueryFailure>,
    /// Number of queries started in each sequential wave.
    pub wave_sizes: Vec<usize>,
}

impl DispatchReport {
    /// True when every query succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Absorb another report, appending its waves after ours.
    pub fn absorb(&mut self, other: Self) {
        self.result.absorb(other.result);
        self.failures.extend(other.failures);
        self.wave_sizes.extend(other.wave_sizes);
    }

    /// The merged result when every query succeeded.
    ///
    /// # Errors
    /// The single failure as-is, or `AllFailed` with every failure when there
    /// are several.
    pub fn into_result(self) -> Result<AggregateResult, DirectError> {
        let mut errors: Vec<DirectError> = self.failures.into_iter().map(|f| f.error).collect();
        match errors.len() {
            0 => Ok(self.result),
            1 => Err(errors.remove(0)),
            _ => Err(DirectError::AllFailed(errors)),
        }
    }
}
