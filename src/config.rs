//! Session configuration for the loopback harness.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_SESSION_PATH: &str = "config/session.toml";

/// Tunables for one simulated prediction session.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of input ticks to simulate.
    pub ticks: u64,
    /// Simulated frame time per tick (milliseconds).
    pub tick_ms: f64,
    /// Ticks between an input being sent and the authority's update for it
    /// arriving back.
    pub authority_latency_ticks: u64,
    /// Probability that a transmitted input is lost before the authority.
    pub input_loss: f64,
    /// Bound on unacknowledged inputs held by the predictor.
    pub max_pending_inputs: usize,
    /// Seed for the simulated loss rolls.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            tick_ms: 16.0,
            authority_latency_ticks: 6,
            input_loss: 0.05,
            max_pending_inputs: 60,
            seed: 7,
        }
    }
}

impl SessionConfig {
    /// Load session configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_SESSION_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SessionConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SessionConfig::default()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                SessionConfig::default()
            }
        }
    }
}
