use std::sync::Arc;

use serde_json::json;
use yadirect::{Credentials, Direct, DirectError, V4Connector};
use yadirect_mock::MockTransport;

use crate::helpers::*;

#[tokio::test]
async fn client_info_asks_for_the_configured_login() {
    let mock = Arc::new(MockTransport::new().on_legacy(
        "GetClientInfo",
        legacy(json!([{ "Login": LOGIN, "Discount": 0 }])),
    ));

    let info = direct(&mock).client_info().await.unwrap();

    assert_eq!(info["data"][0]["Login"], LOGIN);
    assert_eq!(mock.legacy_bodies("GetClientInfo")[0]["param"], json!([LOGIN]));
}

#[tokio::test]
async fn client_info_without_login_is_invalid() {
    let mock = Arc::new(MockTransport::new());
    let v4 = V4Connector::new(mock.clone(), Credentials::new(LOGIN, TOKEN), &mock_connection()).unwrap();
    let direct = Direct::builder().with_connector(Arc::new(v4)).build().unwrap();

    let err = direct.client_info().await.unwrap_err();
    assert!(matches!(err, DirectError::InvalidArg(_)));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn client_info_surfaces_vendor_errors() {
    let mock = Arc::new(
        MockTransport::new().on_legacy("GetClientInfo", legacy_error(53, "Authorization error")),
    );
    let err = direct(&mock).client_info().await.unwrap_err();
    assert!(matches!(err, DirectError::Api { code: Some(53), .. }));
    assert!(!err.is_retryable());
}
