use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod context;
mod error;
mod handlers;
mod pages;
mod password;
mod router;
mod schemas;
mod view_models;

#[cfg(test)]
mod test_utils;

use cli::Cli;

/// Main entry point for the Quire application.
#[tokio::main]
async fn main() -> Result<()> {
    // `.env` must be loaded before clap reads its env fallbacks and before the log filter
    let cli = Cli::try_parse_with_env_file(None, std::env::args_os()).unwrap_or_else(|e| e.exit());

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quire=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    cli.run().await?;

    Ok(())
}
