use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::json;
use yadirect::{AD_GROUP_FIELDS, CAMPAIGN_FIELDS, DirectError, Endpoint, TransportResponse};
use yadirect_mock::MockTransport;

use crate::helpers::*;

#[tokio::test]
async fn all_campaigns_use_an_empty_selection() {
    let mock = Arc::new(MockTransport::new().on_page(
        Endpoint::Campaigns,
        0,
        page("Campaigns", items(1, 4), None),
    ));
    let campaigns = direct(&mock).campaigns(None).await.unwrap();

    assert_eq!(campaigns.len(), 3);
    let body = &mock.bodies_for(Endpoint::Campaigns)[0];
    assert_eq!(body["method"], "get");
    assert_eq!(body["params"]["SelectionCriteria"], json!({}));
    assert_eq!(body["params"]["FieldNames"], json!(CAMPAIGN_FIELDS));
    assert!(body["params"]["TextCampaignFieldNames"].is_array());
}

#[tokio::test]
async fn campaigns_by_id_select_those_ids() {
    let mock = Arc::new(MockTransport::new().on_page(
        Endpoint::Campaigns,
        0,
        page("Campaigns", items(5, 7), None),
    ));
    direct(&mock).campaigns(Some(&[5, 6])).await.unwrap();

    let body = &mock.bodies_for(Endpoint::Campaigns)[0];
    assert_eq!(selected_ids(body, "Ids"), vec![5, 6]);
}

#[tokio::test]
async fn campaign_groups_filter_accepted_groups() {
    let mock = Arc::new(MockTransport::new().on_page(
        Endpoint::AdGroups,
        0,
        page("AdGroups", items(70, 73), None),
    ));
    let groups = direct(&mock).campaign_groups(42).await.unwrap();

    assert_eq!(groups.len(), 3);
    let body = &mock.bodies_for(Endpoint::AdGroups)[0];
    assert_eq!(selected_ids(body, "CampaignIds"), vec![42]);
    assert_eq!(body["params"]["SelectionCriteria"]["Statuses"], json!(["ACCEPTED"]));
    assert_eq!(body["params"]["FieldNames"], json!(AD_GROUP_FIELDS));
}

#[tokio::test]
async fn active_ads_select_running_accepted_ads() {
    let mock = Arc::new(MockTransport::new().on_page(
        Endpoint::Ads,
        0,
        page("Ads", vec![ad(1, 10), ad(2, 11)], None),
    ));
    let ads = direct(&mock).groups_active_ads(&[10, 11]).await.unwrap();

    assert_eq!(ads.len(), 2);
    let criteria = &mock.bodies_for(Endpoint::Ads)[0]["params"]["SelectionCriteria"];
    assert_eq!(criteria["AdGroupIds"], json!([10, 11]));
    assert_eq!(criteria["States"], json!(["ON"]));
    assert_eq!(criteria["Statuses"], json!(["ACCEPTED"]));
}

#[tokio::test]
async fn answer_without_ads_means_no_active_ads() {
    let mock = Arc::new(MockTransport::new().on_page(
        Endpoint::Ads,
        0,
        TransportResponse::json(200, json!({ "result": {} })),
    ));
    let ads = direct(&mock).campaigns_active_ads(&[3]).await.unwrap();
    assert!(ads.is_empty());
}

#[tokio::test]
async fn active_ads_still_surface_api_errors() {
    let mock = Arc::new(MockTransport::new().on_page(
        Endpoint::Ads,
        0,
        api_error(53, "Authorization error"),
    ));
    let err = direct(&mock).campaigns_active_ads(&[3]).await.unwrap_err();
    assert!(matches!(err, DirectError::Api { code: Some(53), .. }));
}

#[tokio::test]
async fn active_groups_are_deduplicated() {
    let mock = Arc::new(MockTransport::new().on_page(
        Endpoint::Ads,
        0,
        page("Ads", vec![ad(1, 10), ad(2, 10), ad(3, 11)], None),
    ));
    let groups = direct(&mock).campaign_active_groups(8).await.unwrap();

    assert_eq!(groups, BTreeSet::from([10, 11]));
    assert_eq!(
        selected_ids(&mock.bodies_for(Endpoint::Ads)[0], "CampaignIds"),
        vec![8]
    );
}

#[tokio::test]
async fn empty_active_ads_query_sends_nothing() {
    let mock = Arc::new(MockTransport::new());
    assert!(direct(&mock).groups_active_ads(&[]).await.unwrap().is_empty());
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn continuation_page_without_ads_fails_the_query() {
    let mock = Arc::new(
        MockTransport::new()
            .on_page(Endpoint::Ads, 0, page("Ads", vec![ad(1, 10), ad(2, 11)], Some(2)))
            .on_page(Endpoint::Ads, 2, TransportResponse::json(200, json!({ "result": {} }))),
    );
    let err = direct(&mock).campaigns_active_ads(&[5]).await.unwrap_err();

    assert!(matches!(err, DirectError::MalformedResponse(_)));
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn active_ads_follow_continuations() {
    let mock = Arc::new(
        MockTransport::new()
            .on_page(Endpoint::Ads, 0, page("Ads", vec![ad(1, 10)], Some(1)))
            .on_page(Endpoint::Ads, 1, page("Ads", vec![ad(2, 11)], None)),
    );
    let groups = direct(&mock).campaign_active_groups(5).await.unwrap();
    assert_eq!(groups, BTreeSet::from([10, 11]));
}
