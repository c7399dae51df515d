use anyhow::{Context, Result};

use ytdetails::server::{self, AppState};
use ytdetails::Config;

pub async fn cmd_serve(config: &Config) -> Result<()> {
    tracing::debug!(?config, "Starting server");

    let state = AppState::from_config(config).context("failed to build HTTP client")?;
    server::serve(config, state)
        .await
        .with_context(|| format!("server on {} failed", config.bind))
}
