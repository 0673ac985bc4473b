use std::collections::BTreeSet;
use std::sync::Arc;

use yadirect::{BID_FIELDS, DirectError, Endpoint, Request, SelectionCriteria};
use yadirect_mock::MockTransport;

use crate::helpers::*;

// One bid per selected ad group; group 7 is rejected by the server.
fn bids_by_group() -> MockTransport {
    MockTransport::new().with_handler(|route, body| match route {
        Route::Paged {
            endpoint: Endpoint::Bids,
            ..
        } => {
            let groups = selected_ids(body, "AdGroupIds");
            if groups.contains(&7) {
                return Some(api_error(1000, "Bad ad group").into());
            }
            let bids = groups.iter().map(|g| bid(g * 100, *g)).collect();
            Some(page("Bids", bids, None).into())
        }
        _ => None,
    })
}

#[tokio::test]
async fn groups_bids_spreads_ids_over_sessions() {
    let mock = Arc::new(bids_by_group());
    let direct = direct(&mock);
    let groups: Vec<i64> = (100..125).collect();

    let bids = direct.groups_bids(&groups).await.unwrap();

    assert_eq!(bids.len(), 25);
    assert!(bids.get(100 * 100).is_some());

    let bodies = mock.bodies_for(Endpoint::Bids);
    // ceil(25 / 10) ids per request
    assert_eq!(bodies.len(), 9);
    let mut seen = BTreeSet::new();
    for body in &bodies {
        let ids = selected_ids(body, "AdGroupIds");
        assert!(ids.len() <= 3);
        seen.extend(ids);
        assert_eq!(body["params"]["FieldNames"].as_array().unwrap().len(), BID_FIELDS.len());
    }
    assert_eq!(seen, groups.into_iter().collect());
}

#[tokio::test]
async fn chunks_respect_the_id_cap() {
    let mock = Arc::new(bids_by_group());
    let direct = builder(&mock).max_ids_per_request(2).build().unwrap();
    let groups: Vec<i64> = (20..29).collect();

    let report = direct
        .dispatch_partitioned(
            Endpoint::Bids,
            &groups,
            |chunk| Request::get(SelectionCriteria::new().with_ids("AdGroupIds", chunk), ["KeywordId"]),
            2,
        )
        .await
        .unwrap();

    assert_eq!(report.wave_sizes, vec![2, 2, 1]);
    assert_eq!(report.result.len(), 9);
    assert!(
        mock.bodies_for(Endpoint::Bids)
            .iter()
            .all(|b| selected_ids(b, "AdGroupIds").len() <= 2)
    );
}

#[tokio::test]
async fn groups_bids_fails_when_a_chunk_fails() {
    let mock = Arc::new(bids_by_group());
    let direct = builder(&mock).concurrency_limit(3).build().unwrap();

    let err = direct.groups_bids(&[1, 2, 3, 5, 6, 7]).await.unwrap_err();

    assert!(matches!(err, DirectError::Api { code: Some(1000), .. }));
    // Sibling chunks still ran.
    assert_eq!(mock.bodies_for(Endpoint::Bids).len(), 3);
}

#[tokio::test]
async fn empty_id_list_sends_nothing() {
    let mock = Arc::new(bids_by_group());
    let bids = direct(&mock).groups_bids(&[]).await.unwrap();
    assert!(bids.is_empty());
    assert_eq!(mock.request_count(), 0);
}
