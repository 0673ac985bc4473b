mod common;

use yadirect::Direct;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_logging();
    let (transport, credentials, connection) = common::setup()?;

    let direct = Direct::builder()
        .with_transport(transport, &credentials, &connection)?
        .build()?;

    let campaigns = direct.campaigns(None).await?;
    let ids: Vec<i64> = campaigns.iter().map(|(id, _)| *id).collect();
    println!("{} campaigns: {ids:?}", ids.len());

    let report = direct.campaigns_bids(&ids).await?;
    println!(
        "{} active bids in {} wave(s)",
        report.result.len(),
        report.wave_sizes.len()
    );
    for failure in &report.failures {
        println!("campaign {} failed: {}", ids[failure.index], failure.error);
    }
    if let Some(units) = direct.units() {
        println!("units: {units}");
    }
    Ok(())
}
