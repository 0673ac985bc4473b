use std::sync::Arc;
use std::time::Duration;

use yadirect::{DirectError, Endpoint};
use yadirect_mock::MockTransport;

use crate::helpers::*;

// Campaign `c` has active ads in group `c * 10`; group `g` has one bid keyed `g * 10`.
// Campaign 2 is rejected when its ads are requested.
fn account() -> MockTransport {
    MockTransport::new().with_handler(|route, body| match route {
        Route::Paged {
            endpoint: Endpoint::Ads,
            ..
        } => {
            let campaigns = selected_ids(body, "CampaignIds");
            if campaigns.contains(&2) {
                return Some(api_error(54, "No rights").into());
            }
            let ads = campaigns.iter().map(|c| ad(c * 100, c * 10)).collect();
            Some(page("Ads", ads, None).into())
        }
        Route::Paged {
            endpoint: Endpoint::Bids,
            ..
        } => {
            let bids = selected_ids(body, "AdGroupIds")
                .into_iter()
                .map(|g| bid(g * 10, g))
                .collect();
            Some(page("Bids", bids, None).into())
        }
        _ => None,
    })
}

#[tokio::test]
async fn campaign_bids_select_by_campaign() {
    let mock = Arc::new(MockTransport::new().on_page(
        Endpoint::Bids,
        0,
        page("Bids", vec![bid(1, 10), bid(2, 10)], None),
    ));
    let bids = direct(&mock).campaign_bids(7).await.unwrap();

    assert_eq!(bids.len(), 2);
    assert!(bids.get(2).is_some());
    assert_eq!(
        selected_ids(&mock.bodies_for(Endpoint::Bids)[0], "CampaignIds"),
        vec![7]
    );
}

#[tokio::test]
async fn active_bids_come_from_groups_with_active_ads() {
    let mock = Arc::new(
        MockTransport::new()
            .on_page(Endpoint::Ads, 0, page("Ads", vec![ad(1, 10), ad(2, 11), ad(3, 12)], None))
            .on_page(Endpoint::Bids, 0, page("Bids", vec![bid(100, 10)], None)),
    );
    let direct = builder(&mock).max_ids_per_request(2).build().unwrap();

    direct.campaign_active_bids(5).await.unwrap();

    let bodies = mock.bodies_for(Endpoint::Bids);
    assert_eq!(bodies.len(), 2);
    assert_eq!(selected_ids(&bodies[0], "AdGroupIds"), vec![10, 11]);
    assert_eq!(selected_ids(&bodies[1], "AdGroupIds"), vec![12]);
}

#[tokio::test]
async fn campaign_without_active_ads_has_no_bids() {
    let mock = Arc::new(MockTransport::new().on_page(Endpoint::Ads, 0, page("Ads", vec![], None)));
    let bids = direct(&mock).campaign_active_bids(5).await.unwrap();
    assert!(bids.is_empty());
    assert!(mock.bodies_for(Endpoint::Bids).is_empty());
}

#[tokio::test]
async fn campaigns_bids_report_failures_per_campaign() {
    let mock = Arc::new(account());
    let report = direct(&mock).campaigns_bids(&[1, 2, 3]).await.unwrap();

    assert_eq!(report.wave_sizes, vec![3]);
    assert_eq!(report.result.len(), 2);
    assert!(report.result.get(100).is_some());
    assert!(report.result.get(300).is_some());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert!(matches!(
        report.failures[0].error,
        DirectError::Api { code: Some(54), .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn campaigns_bids_hold_at_most_the_session_limit() {
    let mock = Arc::new(account().with_latency(Duration::from_millis(100)));
    let direct = builder(&mock).concurrency_limit(2).build().unwrap();

    let report = direct.campaigns_bids(&[1, 3, 4, 5, 6]).await.unwrap();

    assert_eq!(report.wave_sizes, vec![2, 2, 1]);
    assert!(report.is_complete());
    assert_eq!(report.result.len(), 5);
    assert!(mock.peak_in_flight() <= 2);
}

#[tokio::test]
async fn broken_ads_continuation_lands_in_failures() {
    let mock = Arc::new(
        MockTransport::new()
            .on_page(Endpoint::Ads, 0, page("Ads", vec![ad(1, 10)], Some(1)))
            .on_page(
                Endpoint::Ads,
                1,
                yadirect::TransportResponse::json(200, serde_json::json!({ "result": {} })),
            ),
    );
    let report = direct(&mock).campaigns_bids(&[4]).await.unwrap();

    assert!(report.result.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        DirectError::MalformedResponse(_)
    ));
    assert!(mock.bodies_for(Endpoint::Bids).is_empty());
}
