use anyhow::Context as _;
use lead_status::{config::Config, telemetry, LeadStatusFunction, SqliteLeadStore};
use lead_status_http::{handler, lambda};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_subscriber("info").map_err(|e| anyhow::anyhow!(e))?;

    let config = Config::load().context("Failed to load the function configuration")?;
    let pool = config
        .database
        .pool()
        .await
        .context("Failed to connect to the leads database")?;
    let function = LeadStatusFunction::new(Arc::new(SqliteLeadStore::new(pool)));

    tracing::info!("Waiting for lead status requests");
    lambda::run(handler(function)).await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
