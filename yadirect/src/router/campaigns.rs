use std::collections::BTreeSet;

use serde_json::Value;
use yadirect_core::{
    AggregateResult, Classified, DirectError, Endpoint, ItemId, Request, SelectionCriteria,
    collect_items,
};

use super::paginate::fetch_rest;
use crate::Direct;

/// Campaign fields requested by [`Direct::campaigns`].
pub const CAMPAIGN_FIELDS: [&str; 7] = [
    "Id",
    "Name",
    "State",
    "DailyBudget",
    "Funds",
    "Statistics",
    "Type",
];
/// Text-campaign specific fields requested by [`Direct::campaigns`].
pub const TEXT_CAMPAIGN_FIELDS: [&str; 3] = ["RelevantKeywords", "Settings", "BiddingStrategy"];
/// Ad group fields requested by [`Direct::campaign_groups`].
pub const AD_GROUP_FIELDS: [&str; 5] = ["CampaignId", "Id", "Name", "Status", "Type"];
/// Ad fields requested by the active-ads queries.
pub const AD_FIELDS: [&str; 3] = ["Id", "AdGroupId", "CampaignId"];

fn active_ads_request(key: &str, ids: &[ItemId]) -> Request {
    Request::get(
        SelectionCriteria::new()
            .with_ids(key, ids)
            .with_values("States", &["ON"])
            .with_values("Statuses", &["ACCEPTED"]),
        AD_FIELDS,
    )
}

impl Direct {
    /// Campaigns by id, or every campaign of the account when `ids` is `None`.
    ///
    /// # Errors
    /// Propagates the fetch error.
    pub async fn campaigns(&self, ids: Option<&[ItemId]>) -> Result<AggregateResult, DirectError> {
        let criteria = match ids {
            Some(ids) if !ids.is_empty() => SelectionCriteria::new().with_ids("Ids", ids),
            _ => SelectionCriteria::new(),
        };
        let request = Request::get(criteria, CAMPAIGN_FIELDS)
            .with_field_list("TextCampaignFieldNames", TEXT_CAMPAIGN_FIELDS);
        let fetched = self.fetch(Endpoint::Campaigns, &request).await?;
        Ok(collect_items(Endpoint::Campaigns, fetched.items))
    }

    /// Accepted ad groups of one campaign.
    ///
    /// # Errors
    /// Propagates the fetch error.
    pub async fn campaign_groups(&self, campaign_id: ItemId) -> Result<AggregateResult, DirectError> {
        let request = Request::get(
            SelectionCriteria::new()
                .with_ids("CampaignIds", &[campaign_id])
                .with_values("Statuses", &["ACCEPTED"]),
            AD_GROUP_FIELDS,
        );
        let fetched = self.fetch(Endpoint::AdGroups, &request).await?;
        #[cfg(feature = "tracing")]
        tracing::info!(campaign_id, groups = fetched.items.len(), "fetched campaign groups");
        Ok(collect_items(Endpoint::AdGroups, fetched.items))
    }

    /// Running, accepted ads of the given campaigns.
    ///
    /// A first answer without an `Ads` collection means there are none.
    ///
    /// # Errors
    /// Propagates `Api` and `Connection` errors, and `MalformedResponse` when a
    /// continuation page lacks the collection.
    pub async fn campaigns_active_ads(
        &self,
        campaign_ids: &[ItemId],
    ) -> Result<AggregateResult, DirectError> {
        self.active_ads("CampaignIds", campaign_ids).await
    }

    /// Running, accepted ads of the given ad groups.
    ///
    /// # Errors
    /// Propagates `Api` and `Connection` errors.
    pub async fn groups_active_ads(
        &self,
        group_ids: &[ItemId],
    ) -> Result<AggregateResult, DirectError> {
        self.active_ads("AdGroupIds", group_ids).await
    }

    async fn active_ads(&self, key: &str, ids: &[ItemId]) -> Result<AggregateResult, DirectError> {
        if ids.is_empty() {
            return Ok(AggregateResult::new());
        }
        let provider = self.paged()?;
        let request = active_ads_request(key, ids);
        // Only a first answer without `Ads` means "none"; later pages must carry it.
        let first = match provider.exchange(Endpoint::Ads, &request).await? {
            Classified::RecoverableEmpty { units } => {
                self.units.record_opt(units.as_ref());
                #[cfg(feature = "tracing")]
                tracing::info!(key, ids = ids.len(), "no active ads");
                return Ok(AggregateResult::new());
            }
            other => other.into_page(&Endpoint::Ads.result_key(request.method()))?,
        };
        let fetched = fetch_rest(
            provider,
            Endpoint::Ads,
            &request,
            first,
            self.cfg.max_pages,
            &self.units,
        )
        .await?;
        Ok(collect_items(Endpoint::Ads, fetched.items))
    }

    /// Ids of the ad groups that have at least one active ad in `campaign_id`.
    ///
    /// # Errors
    /// Propagates `Api` and `Connection` errors.
    pub async fn campaign_active_groups(
        &self,
        campaign_id: ItemId,
    ) -> Result<BTreeSet<ItemId>, DirectError> {
        let ads = self.campaigns_active_ads(&[campaign_id]).await?;
        Ok(ads
            .iter()
            .filter_map(|(_, ad)| ad.get("AdGroupId").and_then(Value::as_i64))
            .collect())
    }
}
