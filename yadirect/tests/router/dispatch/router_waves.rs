use std::sync::Arc;
use std::time::Duration;

use yadirect::{DirectError, Endpoint, Query, Request, SelectionCriteria};
use yadirect_mock::MockTransport;

use crate::helpers::*;

fn by_id(id: i64) -> Query {
    Query::new(
        Endpoint::Campaigns,
        Request::get(SelectionCriteria::new().with_ids("Ids", &[id]), ["Id"]),
    )
}

// Answers every campaign query with the campaigns it selected.
fn echo_campaigns(latency: Option<Duration>) -> MockTransport {
    let mock = MockTransport::new().with_handler(|route, body| match route {
        Route::Paged { .. } => {
            let ids = selected_ids(body, "Ids");
            if ids.contains(&13) {
                return Some(api_error(8800, "Object not found").into());
            }
            if ids.contains(&99) {
                return Some(MockBehavior::Hang);
            }
            Some(page("Campaigns", ids.into_iter().map(item).collect(), None).into())
        }
        Route::Legacy { .. } => None,
    });
    match latency {
        Some(latency) => mock.with_latency(latency),
        None => mock,
    }
}

#[tokio::test(start_paused = true)]
async fn waves_never_exceed_the_session_limit() {
    let mock = Arc::new(echo_campaigns(Some(Duration::from_millis(200))));
    let direct = direct(&mock);
    let queries = (100..125).map(by_id).collect();

    let report = direct.dispatch_many(queries, 10).await.unwrap();

    assert_eq!(report.wave_sizes, vec![10, 10, 5]);
    assert_eq!(mock.peak_in_flight(), 10);
    assert_eq!(mock.in_flight(), 0);
    assert_eq!(report.result.len(), 25);
    assert!(report.is_complete());
}

#[tokio::test]
async fn a_failing_query_does_not_sink_its_siblings() {
    let mock = Arc::new(echo_campaigns(None));
    let direct = direct(&mock);
    let queries = [11, 12, 13, 14].into_iter().map(by_id).collect();

    let report = direct.dispatch_many(queries, 10).await.unwrap();

    assert_eq!(report.result.len(), 3);
    assert!(report.result.get(13).is_none());
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.index, 2);
    assert_eq!(failure.endpoint, Endpoint::Campaigns);
    assert!(matches!(failure.error, DirectError::Api { code: Some(8800), .. }));
    assert!(!report.is_complete());
}

#[tokio::test]
async fn overlapping_queries_merge_to_unique_ids() {
    let mock = Arc::new(echo_campaigns(None));
    let direct = direct(&mock);
    let overlapping = |ids: &[i64]| {
        Query::new(
            Endpoint::Campaigns,
            Request::get(SelectionCriteria::new().with_ids("Ids", ids), ["Id"]),
        )
    };

    let report = direct
        .dispatch_many(vec![overlapping(&[1, 2, 3]), overlapping(&[3, 4])], 2)
        .await
        .unwrap();

    let mut ids: Vec<i64> = report.result.iter().map(|(id, _)| *id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn empty_dispatch_makes_no_calls() {
    let mock = Arc::new(echo_campaigns(None));
    let direct = direct(&mock);

    let report = direct.dispatch_many(Vec::new(), 10).await.unwrap();

    assert!(report.result.is_empty());
    assert!(report.wave_sizes.is_empty());
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn zero_concurrency_is_invalid() {
    let mock = Arc::new(echo_campaigns(None));
    let err = direct(&mock).dispatch_many(vec![by_id(1)], 0).await.unwrap_err();
    assert!(matches!(err, DirectError::InvalidArg(_)));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn stalled_query_times_out_without_losing_the_wave() {
    let mock = Arc::new(echo_campaigns(None));
    let direct = builder(&mock)
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let queries = [1, 99, 2].into_iter().map(by_id).collect();

    let report = direct.dispatch_many(queries, 3).await.unwrap();

    assert_eq!(report.result.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(
        report.failures[0].error,
        DirectError::RequestTimeout {
            capability: "dispatch".to_string()
        }
    );
}
