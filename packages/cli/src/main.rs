//! Plotline operator CLI
//!
//! Browses the spatial registry over its REST API: summary metrics,
//! drill-down and discovery listings, lookups, and the few mutations an
//! operator needs from a terminal.
//!
//! # Usage
//!
//! ```bash
//! export PLOTLINE_API_BASE_URL=https://registry.example.com/api
//! plotline summary
//! plotline list --path zone-1 block-2
//! plotline discover room --json
//! RUST_LOG=plotline_core=debug plotline find 42
//! ```
//!
//! Logs go to stderr; stdout carries only command output.

mod cli;
mod commands;
mod output;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use commands::StdinPrompt;
use plotline_core::config::ConsoleConfig;
use plotline_core::registry::RegistryController;
use plotline_core::services::{ApiClient, HttpLocationsService, HttpLookupsService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConsoleConfig::from_config_file(path),
        None => ConsoleConfig::from_default_sources(),
    }
    .context("Failed to load configuration")?;
    tracing::debug!("Using registry API at {}", config.api_base_url);

    let api = ApiClient::new(&config.client_config()).context("Failed to create API client")?;
    let mut controller = RegistryController::new(
        HttpLocationsService::new(api.clone()),
        HttpLookupsService::new(api),
    );

    let mut stdout = std::io::stdout().lock();
    let result = commands::run(
        &mut controller,
        &cli.command,
        cli.json,
        &StdinPrompt,
        &mut stdout,
    )
    .await;

    let notifications = controller.take_notifications();
    for notification in &notifications {
        eprintln!("{}", notification.message);
    }
    result?;

    if notifications.iter().any(|n| n.is_error()) {
        std::process::exit(1);
    }
    Ok(())
}
