//! reckon - client-side prediction loopback harness.
//!
//! Runs the prediction engine against a simulated in-process authority and
//! reports how prediction, acknowledgment, and reconciliation behaved.

mod config;
mod session;

use anyhow::Result;
use config::SessionConfig;
use std::{env, path::Path};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting reckon v{}", env!("CARGO_PKG_VERSION"));

    let config = match env::args().nth(1) {
        Some(path) => SessionConfig::load_from_path(Path::new(&path)),
        None => SessionConfig::load(),
    };
    info!(?config, "loaded session config");

    let report = session::run(&config)?;

    info!(
        predicted_position = report.final_predicted.position,
        confirmed_position = report.final_confirmed.position,
        "final states"
    );
    info!(
        inputs_applied = report.metrics.inputs_applied,
        inputs_acknowledged = report.metrics.inputs_acknowledged,
        inputs_replayed = report.metrics.inputs_replayed,
        inputs_dropped = report.metrics.inputs_dropped,
        reconciliations = report.metrics.reconciliations,
        peak_pending = report.metrics.peak_pending,
        "engine metrics"
    );

    Ok(())
}
