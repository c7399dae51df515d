//! `ytdetails` CLI - serve the details endpoint or run one lookup

mod cmd;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ytdetails::Config;

#[derive(Parser)]
#[command(name = "ytdetails")]
#[command(about = "Turn a YouTube link into normalized video details")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Look up one video and print its details as JSON
    Lookup {
        /// YouTube link (watch?v=... or youtu.be/...)
        url: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Config file (defaults to ~/.config/ytdetails/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Provider request timeout in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
}

impl CommonArgs {
    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(secs) = self.timeout {
            config.request_timeout_secs = secs;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is the normal case
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, common } => {
            let mut config = common.load_config()?;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            cmd::cmd_serve(&config).await?;
        }
        Commands::Lookup { url, common } => {
            let config = common.load_config()?;
            cmd::cmd_lookup(&config, &url).await?;
        }
    }

    Ok(())
}
