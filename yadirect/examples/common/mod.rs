use std::sync::Arc;

use serde_json::json;
use yadirect::{ConnectionConfig, Credentials, Endpoint, Transport};
use yadirect_mock::{MockTransport, fixtures};

/// Transport, credentials and URLs for the examples.
///
/// Set `YADIRECT_EXAMPLES_USE_MOCK` to run against canned answers.
pub fn setup() -> Result<(Arc<dyn Transport>, Credentials, ConnectionConfig), Box<dyn std::error::Error>> {
    if std::env::var("YADIRECT_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Transport for CI) ---");
        let mock = MockTransport::new()
            .on_page(
                Endpoint::Campaigns,
                0,
                fixtures::page("Campaigns", vec![fixtures::item(1), fixtures::item(2)], None)
                    .with_units("2/998/1000"),
            )
            .on_page(
                Endpoint::Ads,
                0,
                fixtures::page("Ads", vec![fixtures::ad(10, 100)], None),
            )
            .on_page(
                Endpoint::Bids,
                0,
                fixtures::page("Bids", vec![fixtures::bid(1000, 100)], None),
            )
            .on_legacy("CreateNewWordstatReport", fixtures::legacy(json!(77)))
            .on_legacy("GetWordstatReport", fixtures::report_pending())
            .on_legacy("GetWordstatReport", fixtures::report_ready(&["slon"]))
            .on_legacy("DeleteWordstatReport", fixtures::legacy(json!(1)));
        let conn = ConnectionConfig {
            v5_url: "https://mock.test/json/v5/".into(),
            v4_url: "https://mock.test/v4/json/".into(),
            ..ConnectionConfig::default()
        };
        let transport: Arc<dyn Transport> = Arc::new(mock);
        return Ok((transport, Credentials::new("demo", "demo-token"), conn));
    }
    let transport: Arc<dyn Transport> = Arc::new(yadirect::HttpTransport::new()?);
    Ok((
        transport,
        Credentials::from_env()?,
        ConnectionConfig::sandbox(),
    ))
}

/// Log to stderr, filtered by `RUST_LOG` (build with `--features tracing`).
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("yadirect=info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
