//! tracemark-scan - OSINT scan entry point
//!
//! Sweeps data sources for a target string and aggregates every
//! discovery into the run timeline, which finalize renders to the
//! console and exports as JSON and HTML.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracemark_common::config::{Overrides, ScanConfig};
use tracemark_common::timeline::TimelineRegistry;

mod extract;
mod pastebin;

use pastebin::PastebinClient;

/// Command-line arguments for tracemark-scan
#[derive(Parser, Debug)]
#[command(name = "tracemark-scan")]
#[command(about = "OSINT scanner aggregating discoveries into a target timeline")]
#[command(version)]
struct Args {
    /// Target to investigate (domain, username, ...)
    target: String,

    /// Paste-dump search API base URL
    #[arg(long)]
    pastebin_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Directory receiving the JSON and HTML exports
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Config file path (defaults to ~/.config/tracemark/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracemark_scan=info,tracemark_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting tracemark-scan v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config = ScanConfig::resolve(&Overrides {
        pastebin_base_url: args.pastebin_url.clone(),
        timeout_secs: args.timeout,
        export_dir: args.export_dir.clone(),
        config_file: args.config.clone(),
    })
    .context("Failed to resolve configuration")?;

    info!("Export directory: {}", config.export_dir.display());

    let client = PastebinClient::new(config.pastebin_base_url.as_str(), config.timeout)
        .context("Failed to build pastebin client")?;

    let mut registry = TimelineRegistry::new();

    // A failed sweep still finalizes whatever was gathered.
    let timeline = registry.timeline_for(&args.target);
    match client.search(timeline, &args.target).await {
        Ok(report) => {
            if !report.phone_numbers.is_empty() {
                info!(
                    "extracted {} phone-number candidates",
                    report.phone_numbers.len()
                );
            }
        }
        Err(e) => error!("Pastebin sweep failed: {}", e),
    }

    let outcome = registry
        .finalize(&config.export_dir)
        .context("Failed to export timeline")?;
    if outcome.is_none() {
        info!("No events recorded for {}; nothing to export", args.target);
    }

    Ok(())
}
