use std::sync::Arc;

use yadirect::{
    ConnectionConfig, Credentials, Direct, HttpTransport, RetryConfig, TransportBuilder,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // describe() lists the layers outermost-first.
    let transport = TransportBuilder::new(Arc::new(HttpTransport::new()?))
        .with_session_limit(10)
        .with_units_reserve(500)
        .with_retry(RetryConfig::default());
    println!("layers: {}", transport.describe());

    let direct = Direct::builder()
        .with_transport(
            transport.build(),
            &Credentials::from_env()?,
            &ConnectionConfig::sandbox(),
        )?
        .build()?;

    let info = direct.client_info().await?;
    println!("{info:#}");
    Ok(())
}
