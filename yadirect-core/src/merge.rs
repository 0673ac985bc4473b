//! Folding fetched items into an [`AggregateResult`].

use serde_json::Value;

use crate::{AggregateResult, Endpoint, Item, ItemId};

/// Natural identifier of `item` for `endpoint`.
///
/// Accepts integer ids and numeric strings.
#[must_use]
pub fn item_id(endpoint: Endpoint, item: &Item) -> Option<ItemId> {
    match item.get(endpoint.id_field())? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Fold `items` into `acc` keyed by id; returns how many items had no id.
///
/// Items without an identifier cannot be keyed and are dropped.
pub fn fold_items<I>(acc: &mut AggregateResult, endpoint: Endpoint, items: I) -> usize
where
    I: IntoIterator<Item = Item>,
{
    let mut skipped = 0;
    for item in items {
        match item_id(endpoint, &item) {
            Some(id) => {
                acc.insert(id, item);
            }
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        #[cfg(feature = "tracing")]
        tracing::warn!(%endpoint, skipped, "dropping items without identifier");
    }
    skipped
}

/// Build an aggregate from one item list.
pub fn collect_items<I>(endpoint: Endpoint, items: I) -> AggregateResult
where
    I: IntoIterator<Item = Item>,
{
    let mut acc = AggregateResult::new();
    fold_items(&mut acc, endpoint, items);
    acc
}
