use std::sync::Arc;
use std::time::Duration;

use yadirect::{Direct, DirectError};
use yadirect_mock::MockTransport;

use crate::helpers::*;

#[test]
fn build_without_connectors_fails() {
    let err = Direct::builder().build().err().unwrap();
    assert!(matches!(err, DirectError::InvalidArg(_)));
}

#[test]
fn zero_limits_are_rejected() {
    let mock = Arc::new(MockTransport::new());
    for builder in [
        builder(&mock).concurrency_limit(0),
        builder(&mock).max_ids_per_request(0),
        builder(&mock).max_bids_per_call(0),
    ] {
        assert!(matches!(builder.build(), Err(DirectError::InvalidArg(_))));
    }
}

#[test]
fn defaults_match_vendor_limits() {
    let mock = Arc::new(MockTransport::new());
    let direct = direct(&mock);
    let cfg = direct.config();
    assert_eq!(cfg.concurrency_limit, 10);
    assert_eq!(cfg.max_ids_per_request, 1000);
    assert_eq!(cfg.max_bids_per_call, 10_000);
    assert_eq!(cfg.max_pages, None);
    assert_eq!(cfg.max_poll_attempts, None);
    assert_eq!(cfg.request_timeout, None);
}

#[test]
fn setters_override_defaults() {
    let mock = Arc::new(MockTransport::new());
    let direct = builder(&mock)
        .concurrency_limit(4)
        .poll_interval(Duration::from_millis(250))
        .request_timeout(Duration::from_secs(30))
        .wordstat_geo(vec![213, 2])
        .build()
        .unwrap();
    let cfg = direct.config();
    assert_eq!(cfg.concurrency_limit, 4);
    assert_eq!(cfg.poll_interval, Duration::from_millis(250));
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(30)));
    assert_eq!(cfg.wordstat_geo, vec![213, 2]);
}

#[test]
fn bad_connection_url_is_rejected() {
    let mock = Arc::new(MockTransport::new());
    let mut conn = mock_connection();
    conn.v5_url = "not a url".to_string();
    let err = Direct::builder()
        .with_transport(mock, &yadirect::Credentials::new(LOGIN, TOKEN), &conn)
        .err()
        .unwrap();
    assert!(matches!(err, DirectError::InvalidArg(_)));
}
