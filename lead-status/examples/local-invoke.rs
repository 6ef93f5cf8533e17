//! Run a single proxy event through the function against a throwaway
//! in-memory database that holds one `new` lead with id `42`, and print the
//! response event the runtime would send back.
//!
//! ```text
//! cargo run --example local-invoke -- lead-status-http/tests/data/apigw_v2_patch_lead.json
//! ```
use anyhow::Context as _;
use lead_status::{telemetry, LeadStatusFunction, SqliteLeadStore};
use lead_status_http::{handler, lambda::Handler as _, request::LambdaRequest, Context};
use sqlx::sqlite::SqlitePoolOptions;
use std::{fs::File, io::BufReader, sync::Arc};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_subscriber("debug").map_err(|e| anyhow::anyhow!(e))?;

    let path = std::env::args().nth(1).context("Usage: local-invoke <event.json>")?;
    let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
    let event: LambdaRequest =
        serde_json::from_reader(BufReader::new(file)).context("Failed to parse the proxy event")?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = SqliteLeadStore::new(pool.clone());
    store.migrate().await?;
    sqlx::query("INSERT INTO leads (id, name) VALUES (42, 'Example lead')")
        .execute(&pool)
        .await?;

    let mut function = handler(LeadStatusFunction::new(Arc::new(store)));
    let response = function
        .call(event, Context::default())
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
