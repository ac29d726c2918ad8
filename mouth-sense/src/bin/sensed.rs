//! mouth-sense daemon.
//!
//! Serves the classification API, pulling samples and ambient readings
//! from the configured feeds on each request.

use std::sync::Arc;

use anyhow::Result;
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use mouth_sense::api::{self, SharedState};
use mouth_sense::classify::ClassifierConfig;
use mouth_sense::config::DaemonConfig;
use mouth_sense::orchestrator::Orchestrator;
use mouth_sense::source::{HttpBaselineProvider, HttpSampleSource};

#[tokio::main]
async fn main() -> Result<()> {
    mouth_sense::tracing::init_journald_or_stdout();

    let config = DaemonConfig::from_env()?;
    info!(
        source_url = %config.source_url,
        baseline_url = %config.baseline_url,
        api_addr = %config.api_addr,
        "Starting mouth-sense"
    );

    let source = HttpSampleSource::new(&config.source_url, config.fetch_timeout)?;
    let baseline_provider = HttpBaselineProvider::new(&config.baseline_url, config.fetch_timeout)?;
    let orchestrator = Arc::new(Orchestrator::new(
        ClassifierConfig::default(),
        Box::new(source),
        Box::new(baseline_provider),
        config.liveness_threshold,
    ));

    // Best effort; requests can refresh the baseline later.
    if !orchestrator.refresh_baseline().await.is_set() {
        warn!("No ambient baseline yet, classification will fail until one is fetched");
    }

    let running = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(running.clone()));

    api::serve(config.api_addr, SharedState::new(orchestrator), running).await?;

    info!("Exiting.");
    Ok(())
}

async fn shutdown_on_signal(running: CancellationToken) {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            warn!(error = %e, "Cannot listen for SIGTERM, only SIGINT will stop the daemon");
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Cannot listen for SIGINT, shutting down");
            }
            running.cancel();
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Received SIGINT."),
        _ = sigterm.recv() => info!("Received SIGTERM."),
    }

    running.cancel();
}
