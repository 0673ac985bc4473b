use yadirect_core::{
    DirectError, DispatchReport, Endpoint, ItemId, QueryFailure, Request, fold_items,
};

use super::paginate::fetch_all;
use super::util::{partition_size, run_in_waves};
use crate::Direct;

/// One independent logical query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Collection queried.
    pub endpoint: Endpoint,
    /// Request sent for the first page.
    pub request: Request,
}

impl Query {
    /// Pair `request` with the collection it targets.
    #[must_use]
    pub const fn new(endpoint: Endpoint, request: Request) -> Self {
        Self { endpoint, request }
    }
}

impl Direct {
    /// Run `queries` in waves of at most `concurrency` and merge their items.
    ///
    /// Each query is fully paginated. A failing query does not affect its
    /// siblings: its error is reported in `failures` with its input index and
    /// the items of every successful query land in `result`, keyed by the
    /// endpoint's identifier field.
    ///
    /// # Errors
    /// Only for setup problems: `InvalidArg` when `concurrency` is zero and
    /// `Unsupported` when no paged connector is registered. An empty query list
    /// returns an empty report without touching the network.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "yadirect::router",
            skip(self, queries),
            fields(queries = queries.len()),
        )
    )]
    pub async fn dispatch_many(
        &self,
        queries: Vec<Query>,
        concurrency: usize,
    ) -> Result<DispatchReport, DirectError> {
        if concurrency == 0 {
            return Err(DirectError::InvalidArg(
                "concurrency must be positive".to_string(),
            ));
        }
        if queries.is_empty() {
            return Ok(DispatchReport::default());
        }
        let provider = self.paged()?;
        let endpoints: Vec<Endpoint> = queries.iter().map(|q| q.endpoint).collect();
        let max_pages = self.cfg.max_pages;
        let tracker = &self.units;

        let (outcomes, wave_sizes) = run_in_waves(
            queries,
            concurrency,
            self.cfg.request_timeout,
            "dispatch",
            |q: Query| async move {
                fetch_all(provider, q.endpoint, &q.request, max_pages, tracker).await
            },
        )
        .await;

        let mut report = DispatchReport {
            wave_sizes,
            ..DispatchReport::default()
        };
        for (index, (outcome, endpoint)) in outcomes.into_iter().zip(endpoints).enumerate() {
            match outcome {
                Ok(fetched) => {
                    fold_items(&mut report.result, endpoint, fetched.items);
                }
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(index, %endpoint, error = %error, "query failed");
                    report.failures.push(QueryFailure {
                        index,
                        endpoint,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Split `ids` into chunks, build one query per chunk and dispatch them.
    ///
    /// Chunks hold `ceil(ids.len() / concurrency)` ids, capped at the
    /// configured `max_ids_per_request`, so that one wave normally covers the
    /// whole list.
    ///
    /// # Errors
    /// Same as [`dispatch_many`](Self::dispatch_many).
    pub async fn dispatch_partitioned<B>(
        &self,
        endpoint: Endpoint,
        ids: &[ItemId],
        build: B,
        concurrency: usize,
    ) -> Result<DispatchReport, DirectError>
    where
        B: Fn(&[ItemId]) -> Request,
    {
        if ids.is_empty() {
            return Ok(DispatchReport::default());
        }
        let size = partition_size(ids.len(), concurrency, self.cfg.max_ids_per_request);
        let queries = ids
            .chunks(size)
            .map(|chunk| Query::new(endpoint, build(chunk)))
            .collect();
        self.dispatch_many(queries, concurrency).await
    }
}
