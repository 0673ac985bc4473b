use std::sync::Arc;

use serde_json::json;
use yadirect::{Endpoint, Request, SelectionCriteria};
use yadirect_mock::MockTransport;

use crate::helpers::*;

fn ads_request() -> Request {
    Request::get(SelectionCriteria::new(), ["Id"])
}

#[tokio::test]
async fn units_follow_the_last_successful_page() {
    let mock = Arc::new(
        MockTransport::new()
            .on_page(
                Endpoint::Ads,
                0,
                page("Ads", items(1, 2), Some(1)).with_units("10/20838/64000"),
            )
            .on_page(
                Endpoint::Ads,
                1,
                page("Ads", items(2, 3), None).with_units("10/20828/64000"),
            ),
    );
    let direct = direct(&mock);
    assert!(direct.units().is_none());

    let fetched = direct.fetch(Endpoint::Ads, &ads_request()).await.unwrap();

    assert_eq!(fetched.units.as_ref().and_then(|u| u.remaining), Some(20828));
    let units = direct.units().unwrap();
    assert_eq!(units.raw, "10/20828/64000");
    assert_eq!(units.daily_limit, Some(64000));
}

#[tokio::test]
async fn failed_query_leaves_units_unchanged() {
    let mock = Arc::new(
        MockTransport::new()
            .on_page(Endpoint::Ads, 0, page("Ads", items(1, 2), None).with_units("5/500/1000"))
            .on_page(Endpoint::Ads, 0, api_error(152, "Not enough units").with_units("5/0/1000")),
    );
    let direct = direct(&mock);
    let tracker = direct.units_tracker();

    direct.fetch(Endpoint::Ads, &ads_request()).await.unwrap();
    assert!(direct.fetch(Endpoint::Ads, &ads_request()).await.is_err());

    assert_eq!(direct.units().and_then(|u| u.remaining), Some(500));
    assert_eq!(tracker.current(), direct.units());
}

#[tokio::test]
async fn legacy_calls_record_units() {
    let mock = Arc::new(MockTransport::new().on_legacy(
        "GetClientInfo",
        legacy(json!([{ "Login": LOGIN }])).with_units("1/99/100"),
    ));
    let direct = direct(&mock);

    direct.client_info().await.unwrap();

    assert_eq!(direct.units().and_then(|u| u.remaining), Some(99));
}
