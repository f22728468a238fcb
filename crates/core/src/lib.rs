#![warn(missing_docs)]
//! Client-side prediction with server reconciliation, generic over the
//! application's simulated state.
//!
//! The engine applies inputs locally and immediately while a remote
//! authority asynchronously confirms or overrides the resulting state.
//! Callers apply inputs through [`Predictor::apply_input`], transmit the
//! returned [`TimestampedInput`] records through whatever transport they
//! use, and feed authoritative updates back through
//! [`Predictor::on_server_state`]. Prediction is recomputed by replaying
//! unacknowledged inputs onto each new confirmed state, never by diffing.

mod engine;
mod error;
mod input;
mod metrics;
mod queue;
mod shared;
mod state;

pub use engine::Predictor;
pub use error::PredictError;
pub use input::TimestampedInput;
pub use metrics::PredictorMetrics;
pub use queue::{PendingInputs, DEFAULT_MAX_PENDING};
pub use shared::SharedPredictor;
pub use state::Predictable;
