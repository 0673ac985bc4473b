//! Synchronous facade over [`Direct`].
//!
//! Each `BlockingDirect` owns a current-thread Tokio runtime and blocks on the
//! async operations. Do not use it from inside an async context.

use std::collections::BTreeSet;

use serde_json::Value;
use tokio::runtime::{Builder as RuntimeBuilder, Runtime};
use yadirect_core::{
    AggregateResult, DirectError, DispatchReport, Endpoint, Item, ItemId, Request, Units,
};

use crate::{Direct, Fetched, Query};

/// Blocking wrapper around [`Direct`].
pub struct BlockingDirect {
    inner: Direct,
    rt: Runtime,
}

impl BlockingDirect {
    /// Wrap `inner` with a private runtime.
    ///
    /// # Errors
    /// Returns `Other` if the runtime cannot be created.
    pub fn new(inner: Direct) -> Result<Self, DirectError> {
        let rt = RuntimeBuilder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DirectError::Other(format!("failed to build runtime: {e}")))?;
        Ok(Self { inner, rt })
    }

    /// The async orchestrator.
    #[must_use]
    pub const fn inner(&self) -> &Direct {
        &self.inner
    }

    /// See [`Direct::units`].
    #[must_use]
    pub fn units(&self) -> Option<Units> {
        self.inner.units()
    }

    /// See [`Direct::fetch`].
    ///
    /// # Errors
    /// As the async call.
    pub fn fetch(&self, endpoint: Endpoint, request: &Request) -> Result<Fetched, DirectError> {
        self.rt.block_on(self.inner.fetch(endpoint, request))
    }

    /// See [`Direct::dispatch_many`].
    ///
    /// # Errors
    /// As the async call.
    pub fn dispatch_many(
        &self,
        queries: Vec<Query>,
        concurrency: usize,
    ) -> Result<DispatchReport, DirectError> {
        self.rt.block_on(self.inner.dispatch_many(queries, concurrency))
    }

    /// See [`Direct::campaigns`].
    ///
    /// # Errors
    /// As the async call.
    pub fn campaigns(&self, ids: Option<&[ItemId]>) -> Result<AggregateResult, DirectError> {
        self.rt.block_on(self.inner.campaigns(ids))
    }

    /// See [`Direct::campaign_groups`].
    ///
    /// # Errors
    /// As the async call.
    pub fn campaign_groups(&self, campaign_id: ItemId) -> Result<AggregateResult, DirectError> {
        self.rt.block_on(self.inner.campaign_groups(campaign_id))
    }

    /// See [`Direct::campaigns_active_ads`].
    ///
    /// # Errors
    /// As the async call.
    pub fn campaigns_active_ads(&self, campaign_ids: &[ItemId]) -> Result<AggregateResult, DirectError> {
        self.rt.block_on(self.inner.campaigns_active_ads(campaign_ids))
    }

    /// See [`Direct::groups_active_ads`].
    ///
    /// # Errors
    /// As the async call.
    pub fn groups_active_ads(&self, group_ids: &[ItemId]) -> Result<AggregateResult, DirectError> {
        self.rt.block_on(self.inner.groups_active_ads(group_ids))
    }

    /// See [`Direct::campaign_active_groups`].
    ///
    /// # Errors
    /// As the async call.
    pub fn campaign_active_groups(
        &self,
        campaign_id: ItemId,
    ) -> Result<BTreeSet<ItemId>, DirectError> {
        self.rt.block_on(self.inner.campaign_active_groups(campaign_id))
    }

    /// See [`Direct::groups_bids`].
    ///
    /// # Errors
    /// As the async call.
    pub fn groups_bids(&self, group_ids: &[ItemId]) -> Result<AggregateResult, DirectError> {
        self.rt.block_on(self.inner.groups_bids(group_ids))
    }

    /// See [`Direct::campaign_bids`].
    ///
    /// # Errors
    /// As the async call.
    pub fn campaign_bids(&self, campaign_id: ItemId) -> Result<AggregateResult, DirectError> {
        self.rt.block_on(self.inner.campaign_bids(campaign_id))
    }

    /// See [`Direct::campaign_active_bids`].
    ///
    /// # Errors
    /// As the async call.
    pub fn campaign_active_bids(&self, campaign_id: ItemId) -> Result<AggregateResult, DirectError> {
        self.rt.block_on(self.inner.campaign_active_bids(campaign_id))
    }

    /// See [`Direct::campaigns_bids`].
    ///
    /// # Errors
    /// As the async call.
    pub fn campaigns_bids(&self, campaign_ids: &[ItemId]) -> Result<DispatchReport, DirectError> {
        self.rt.block_on(self.inner.campaigns_bids(campaign_ids))
    }

    /// See [`Direct::set_bids`].
    ///
    /// # Errors
    /// As the async call.
    pub fn set_bids(&self, bids: Vec<Item>) -> Result<usize, DirectError> {
        self.rt.block_on(self.inner.set_bids(bids))
    }

    /// See [`Direct::client_info`].
    ///
    /// # Errors
    /// As the async call.
    pub fn client_info(&self) -> Result<Value, DirectError> {
        self.rt.block_on(self.inner.client_info())
    }

    /// See [`Direct::create_wordstat_report`].
    ///
    /// # Errors
    /// As the async call.
    pub fn create_wordstat_report(
        &self,
        phrases: &[&str],
        geo: Option<&[i64]>,
    ) -> Result<i64, DirectError> {
        self.rt.block_on(self.inner.create_wordstat_report(phrases, geo))
    }

    /// See [`Direct::wordstat_report`].
    ///
    /// # Errors
    /// As the async call.
    pub fn wordstat_report(&self, report_id: i64) -> Result<Vec<Item>, DirectError> {
        self.rt.block_on(self.inner.wordstat_report(report_id))
    }

    /// See [`Direct::delete_wordstat_report`].
    ///
    /// # Errors
    /// As the async call.
    pub fn delete_wordstat_report(&self, report_id: i64) -> Result<(), DirectError> {
        self.rt.block_on(self.inner.delete_wordstat_report(report_id))
    }

    /// See [`Direct::delete_all_wordstat_reports`].
    ///
    /// # Errors
    /// As the async call.
    pub fn delete_all_wordstat_reports(&self) -> Result<usize, DirectError> {
        self.rt.block_on(self.inner.delete_all_wordstat_reports())
    }
}
