//! `serve` command: run the coordinator as an HTTP service

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::coordinator::Coordinator;
use crate::metrics;
use crate::server::ApiServer;

/// Load config, wire a coordinator, and serve until ctrl-c
pub async fn serve(config_path: Option<PathBuf>) -> Result<()> {
    let config = match &config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate().context("Invalid configuration")?;

    if let Err(e) = metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed; continuing without metrics");
    }

    println!("Stop Fake coordinator");
    println!("=====================");
    println!("  Bind address: {}", config.service.bind_address);
    println!("  Backend URL:  {}", config.analysis.backend_url);
    println!("  Auto analyze: {}", config.analysis.auto_analyze);
    println!();

    let coordinator =
        Coordinator::from_config(&config).context("Failed to create coordinator")?;
    let server = ApiServer::new(config.service.clone(), coordinator);

    server
        .start_with_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
