use std::sync::Arc;

use serde_json::{Value, json};
use yadirect::{DirectError, Endpoint};
use yadirect_mock::MockTransport;

use crate::helpers::*;

fn new_bids(n: i64) -> Vec<Value> {
    (0..n).map(|k| json!({ "KeywordId": k, "Bid": 3_000_000 })).collect()
}

// Acknowledge all but one record of every batch.
fn acknowledging() -> MockTransport {
    MockTransport::new().with_handler(|route, body| match route {
        Route::Paged {
            endpoint: Endpoint::Bids,
            ..
        } => {
            let n = body["params"]["Bids"].as_array().map_or(0, Vec::len);
            Some(set_results(n.saturating_sub(1)).into())
        }
        _ => None,
    })
}

#[tokio::test]
async fn large_submissions_are_split_and_count_acknowledged_results() {
    let mock = Arc::new(acknowledging());
    let direct = direct(&mock);

    let applied = direct.set_bids(new_bids(25_000)).await.unwrap();

    assert_eq!(applied, 24_997);
    let sizes: Vec<usize> = mock
        .bodies_for(Endpoint::Bids)
        .iter()
        .map(|b| {
            assert_eq!(b["method"], "set");
            b["params"]["Bids"].as_array().unwrap().len()
        })
        .collect();
    assert_eq!(sizes, vec![10_000, 10_000, 5_000]);
}

#[tokio::test]
async fn empty_submission_sends_nothing() {
    let mock = Arc::new(acknowledging());
    assert_eq!(direct(&mock).set_bids(Vec::new()).await.unwrap(), 0);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn failing_batch_stops_the_submission() {
    let mock = Arc::new(
        MockTransport::new()
            .on_page(Endpoint::Bids, 0, set_results(2))
            .on_page(Endpoint::Bids, 0, api_error(6000, "Bid too high")),
    );
    let direct = builder(&mock).max_bids_per_call(2).build().unwrap();

    let err = direct.set_bids(new_bids(5)).await.unwrap_err();

    assert!(matches!(err, DirectError::Api { code: Some(6000), .. }));
    assert_eq!(mock.request_count(), 2);
}
