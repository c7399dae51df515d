use std::time::Instant;

use anyhow::Result;

use ytdetails::{AppState, Config};

/// Run the request path once and print the JSON body a client would receive.
pub async fn cmd_lookup(config: &Config, url: &str) -> Result<()> {
    let state = AppState::from_config(config)?;
    let fetcher = state.fetcher()?;

    let start = Instant::now();
    let details = fetcher.fetch_url(url).await?;
    tracing::info!(elapsed = ?start.elapsed(), "Lookup finished");

    println!("{}", serde_json::to_string_pretty(&details)?);
    Ok(())
}
