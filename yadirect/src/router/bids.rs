use yadirect_core::{
    AggregateResult, DirectError, DispatchReport, Endpoint, Item, ItemId, QueryFailure, Request,
    SelectionCriteria, collect_items,
};

use super::util::run_in_waves;
use crate::Direct;

/// Bid fields requested by every bid query.
pub const BID_FIELDS: [&str; 8] = [
    "CampaignId",
    "KeywordId",
    "Bid",
    "ContextBid",
    "CompetitorsBids",
    "SearchPrices",
    "MinSearchPrice",
    "CurrentSearchPrice",
];

fn bids_request(key: &str, ids: &[ItemId]) -> Request {
    Request::get(SelectionCriteria::new().with_ids(key, ids), BID_FIELDS)
}

impl Direct {
    /// Bids of the given ad groups, spread over the configured session count.
    ///
    /// # Errors
    /// Fails if any chunk fails; several failures come back as `AllFailed`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "yadirect::router", skip(self, group_ids), fields(groups = group_ids.len()))
    )]
    pub async fn groups_bids(&self, group_ids: &[ItemId]) -> Result<AggregateResult, DirectError> {
        let report = self
            .dispatch_partitioned(
                Endpoint::Bids,
                group_ids,
                |chunk| bids_request("AdGroupIds", chunk),
                self.cfg.concurrency_limit,
            )
            .await?;
        report.into_result()
    }

    /// Bids of one campaign.
    ///
    /// # Errors
    /// Propagates the fetch error.
    pub async fn campaign_bids(&self, campaign_id: ItemId) -> Result<AggregateResult, DirectError> {
        let fetched = self
            .fetch(Endpoint::Bids, &bids_request("CampaignIds", &[campaign_id]))
            .await?;
        Ok(collect_items(Endpoint::Bids, fetched.items))
    }

    /// Bids of the ad groups of `campaign_id` that have active ads.
    ///
    /// Group chunks are fetched one after another so this call holds a single
    /// session at a time.
    ///
    /// # Errors
    /// Propagates `Api` and `Connection` errors.
    pub async fn campaign_active_bids(
        &self,
        campaign_id: ItemId,
    ) -> Result<AggregateResult, DirectError> {
        let groups: Vec<ItemId> = self
            .campaign_active_groups(campaign_id)
            .await?
            .into_iter()
            .collect();
        let mut out = AggregateResult::new();
        for chunk in groups.chunks(self.cfg.max_ids_per_request) {
            let fetched = self
                .fetch(Endpoint::Bids, &bids_request("AdGroupIds", chunk))
                .await?;
            out.absorb(collect_items(Endpoint::Bids, fetched.items));
        }
        Ok(out)
    }

    /// Active bids of every campaign, one task per campaign in waves of the session limit.
    ///
    /// # Errors
    /// Only `InvalidArg`/`Unsupported` setup errors; per-campaign failures are
    /// reported in the returned `failures`, indexed by position in `campaign_ids`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "yadirect::router", skip(self, campaign_ids), fields(campaigns = campaign_ids.len()))
    )]
    pub async fn campaigns_bids(
        &self,
        campaign_ids: &[ItemId],
    ) -> Result<DispatchReport, DirectError> {
        if campaign_ids.is_empty() {
            return Ok(DispatchReport::default());
        }
        self.paged()?;
        let (outcomes, wave_sizes) = run_in_waves(
            campaign_ids.to_vec(),
            self.cfg.concurrency_limit,
            self.cfg.request_timeout,
            "campaigns_bids",
            |id| self.campaign_active_bids(id),
        )
        .await;

        let mut report = DispatchReport {
            wave_sizes,
            ..DispatchReport::default()
        };
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(bids) => report.result.absorb(bids),
                Err(error) => report.failures.push(QueryFailure {
                    index,
                    endpoint: Endpoint::Bids,
                    error,
                }),
            }
        }
        #[cfg(feature = "tracing")]
        tracing::info!(
            bids = report.result.len(),
            failures = report.failures.len(),
            "campaign bids collected"
        );
        Ok(report)
    }

    /// Submit new bids in batches of `max_bids_per_call`, one batch at a time.
    ///
    /// Returns how many results the server acknowledged in total. Each record is
    /// an object such as `{"KeywordId": 1, "Bid": 3000000}`.
    ///
    /// # Errors
    /// The first failing batch aborts the submission; batches already sent stay applied.
    pub async fn set_bids(&self, bids: Vec<Item>) -> Result<usize, DirectError> {
        let mut applied = 0;
        let mut remaining = bids.into_iter().peekable();
        while remaining.peek().is_some() {
            let batch: Vec<Item> = remaining.by_ref().take(self.cfg.max_bids_per_call).collect();
            #[cfg(feature = "tracing")]
            tracing::info!(batch = batch.len(), "setting bids");
            let request = Request::mutation("set", "Bids", batch);
            applied += self.fetch(Endpoint::Bids, &request).await?.items.len();
        }
        Ok(applied)
    }
}
