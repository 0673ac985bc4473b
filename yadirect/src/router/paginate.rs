use std::borrow::Cow;

use yadirect_core::{
    DirectError, Endpoint, Item, Page, PagedProvider, Request, Units, UnitsTracker,
};

use crate::Direct;

/// One logical query assembled across every page the server returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    /// Items of all pages, in fetch order.
    pub items: Vec<Item>,
    /// Number of exchanges performed.
    pub pages: u32,
    /// Units reported by the last page that carried them.
    pub units: Option<Units>,
}

/// Follow `LimitedBy` continuations until the server stops reporting one.
///
/// `request` is never modified; every continuation runs on a private copy with
/// `params.Page.Offset` set. The first failing page aborts the query and no
/// partial items are returned. Units are recorded into `tracker` after each
/// successful page.
pub(crate) async fn fetch_all(
    provider: &dyn PagedProvider,
    endpoint: Endpoint,
    request: &Request,
    max_pages: Option<u32>,
    tracker: &UnitsTracker,
) -> Result<Fetched, DirectError> {
    let result_key = endpoint.result_key(request.method());
    let first = provider
        .exchange(endpoint, request)
        .await?
        .into_page(&result_key)?;
    fetch_rest(provider, endpoint, request, first, max_pages, tracker).await
}

/// Continue a query whose first page has already been classified.
///
/// Every later page must carry the collection; a missing key there is a
/// `MalformedResponse` for the whole query.
pub(crate) async fn fetch_rest(
    provider: &dyn PagedProvider,
    endpoint: Endpoint,
    request: &Request,
    first: Page,
    max_pages: Option<u32>,
    tracker: &UnitsTracker,
) -> Result<Fetched, DirectError> {
    let result_key = endpoint.result_key(request.method());
    let mut items = Vec::new();
    let mut pages = 0u32;
    let mut units = None;
    let mut current = Cow::Borrowed(request);
    let mut page = first;

    loop {
        pages += 1;
        tracker.record_opt(page.units.as_ref());
        if page.units.is_some() {
            units = page.units;
        }
        items.extend(page.items);

        let Some(next) = page.continuation else {
            break;
        };
        let previous = current.offset().unwrap_or(0);
        if next <= previous {
            return Err(DirectError::NonAdvancingOffset {
                endpoint: endpoint.path().to_string(),
                previous,
                offset: next,
            });
        }
        if let Some(max) = max_pages
            && pages >= max
        {
            return Err(DirectError::PaginationLimit {
                endpoint: endpoint.path().to_string(),
                pages,
            });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(%endpoint, offset = next, "following continuation");
        current = Cow::Owned(request.with_offset(next));
        page = provider
            .exchange(endpoint, &current)
            .await?
            .into_page(&result_key)?;
    }

    Ok(Fetched {
        items,
        pages,
        units,
    })
}

impl Direct {
    /// Fetch every page of one logical query.
    ///
    /// # Errors
    /// Returns the first `Api`, `Connection` or `MalformedResponse` error met on
    /// any page, `NonAdvancingOffset` for a looping continuation,
    /// `PaginationLimit` when the configured page bound is hit, and
    /// `Unsupported` when no paged connector is registered.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "yadirect::router",
            skip(self, request),
            fields(endpoint = %endpoint, method = request.method()),
        )
    )]
    pub async fn fetch(&self, endpoint: Endpoint, request: &Request) -> Result<Fetched, DirectError> {
        let provider = self.paged()?;
        fetch_all(provider, endpoint, request, self.cfg.max_pages, &self.units).await
    }
}
