mod common;

use std::time::Duration;

use yadirect::Direct;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_logging();
    let (transport, credentials, connection) = common::setup()?;

    let direct = Direct::builder()
        .with_transport(transport, &credentials, &connection)?
        .poll_interval(Duration::from_secs(2))
        .max_poll_attempts(30)
        .build()?;

    let id = direct.create_wordstat_report(&["slon"], None).await?;
    println!("report {id} created");

    let rows = direct.wordstat_report(id).await?;
    for row in &rows {
        println!("{} {}", row["Phrase"], row["Shows"]);
    }
    direct.delete_wordstat_report(id).await?;
    Ok(())
}
