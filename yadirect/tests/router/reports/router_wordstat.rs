use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use yadirect::{DEFAULT_WORDSTAT_GEO, DirectError, TransportResponse};
use yadirect_mock::MockTransport;

use crate::helpers::*;

#[tokio::test]
async fn create_report_sends_phrases_and_default_regions() {
    let mock = Arc::new(MockTransport::new().on_legacy("CreateNewWordstatReport", legacy(json!(42))));
    let direct = direct(&mock);

    let id = direct
        .create_wordstat_report(&["купить слона", "slon"], None)
        .await
        .unwrap();

    assert_eq!(id, 42);
    let body = &mock.legacy_bodies("CreateNewWordstatReport")[0];
    assert_eq!(body["param"]["Phrases"], json!(["купить слона", "slon"]));
    assert_eq!(body["param"]["GeoID"], json!([DEFAULT_WORDSTAT_GEO]));
    assert_eq!(body["token"], TOKEN);
    assert_eq!(body["locale"], "en");
}

#[tokio::test]
async fn create_report_requires_phrases() {
    let mock = Arc::new(MockTransport::new());
    let err = direct(&mock).create_wordstat_report(&[], Some(&[213])).await.unwrap_err();
    assert!(matches!(err, DirectError::InvalidArg(_)));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn report_is_polled_until_ready() {
    let mock = Arc::new(
        MockTransport::new()
            .on_legacy("GetWordstatReport", report_pending())
            .on_legacy("GetWordstatReport", report_pending())
            .on_legacy("GetWordstatReport", report_ready(&["slon"])),
    );
    let direct = builder(&mock)
        .poll_interval(Duration::from_secs(10))
        .build()
        .unwrap();
    let started = tokio::time::Instant::now();

    let rows = direct.wordstat_report(7).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Phrase"], "slon");
    assert_eq!(mock.legacy_bodies("GetWordstatReport").len(), 3);
    assert_eq!(mock.legacy_bodies("GetWordstatReport")[0]["param"], 7);
    assert!(started.elapsed() >= Duration::from_secs(20));
}

#[tokio::test(start_paused = true)]
async fn polling_stops_after_the_attempt_bound() {
    let mock = Arc::new(MockTransport::new().on_legacy("GetWordstatReport", report_pending()));
    let direct = builder(&mock).max_poll_attempts(3).build().unwrap();

    let err = direct.wordstat_report(9).await.unwrap_err();

    assert_eq!(
        err,
        DirectError::PollExhausted {
            report_id: 9,
            attempts: 3
        }
    );
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn polling_honors_the_request_deadline() {
    let mock = Arc::new(MockTransport::new().on_legacy("GetWordstatReport", report_pending()));
    let direct = builder(&mock)
        .poll_interval(Duration::from_secs(2))
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = direct.wordstat_report(9).await.unwrap_err();

    assert_eq!(
        err,
        DirectError::RequestTimeout {
            capability: "report".to_string()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn vendor_error_stops_polling() {
    let mock = Arc::new(
        MockTransport::new().on_legacy("GetWordstatReport", legacy_error(31, "Report does not exist")),
    );
    let err = direct(&mock).wordstat_report(1).await.unwrap_err();

    assert!(matches!(err, DirectError::Api { code: Some(31), .. }));
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn delete_all_removes_every_listed_report() {
    let mock = Arc::new(
        MockTransport::new()
            .on_legacy(
                "GetWordstatReportList",
                legacy(json!([
                    { "ReportID": 11, "StatusReport": "Done" },
                    { "ReportID": 12, "StatusReport": "Pending" }
                ])),
            )
            .on_legacy("DeleteWordstatReport", legacy(json!(1))),
    );

    let deleted = direct(&mock).delete_all_wordstat_reports().await.unwrap();

    assert_eq!(deleted, 2);
    let params: Vec<_> = mock
        .legacy_bodies("DeleteWordstatReport")
        .into_iter()
        .map(|b| b["param"].clone())
        .collect();
    assert_eq!(params, vec![json!(11), json!(12)]);
    assert!(mock.legacy_bodies("GetWordstatReportList")[0].get("param").is_none());
}

#[tokio::test]
async fn delete_all_with_no_reports_is_a_no_op() {
    let mock = Arc::new(MockTransport::new().on_legacy(
        "GetWordstatReportList",
        TransportResponse::json(200, json!({})),
    ));

    assert_eq!(direct(&mock).delete_all_wordstat_reports().await.unwrap(), 0);
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn unreadable_poll_answers_count_as_not_ready() {
    let mock = Arc::new(
        MockTransport::new()
            .on_legacy("GetWordstatReport", status(200, "<html>busy</html>"))
            .on_legacy("GetWordstatReport", report_ready(&["slon", "kit"])),
    );
    let rows = direct(&mock).wordstat_report(3).await.unwrap();
    // Only the first phrase's rows are returned.
    assert_eq!(rows.len(), 1);
    assert_eq!(mock.request_count(), 2);
}
