//! Counters describing prediction behavior over one engine lifetime.

use serde::{Deserialize, Serialize};

/// Running totals for one [`Predictor`](crate::Predictor) instance.
///
/// Counters accumulate for the lifetime of the engine: a `reset` restarts
/// the confirmed baseline but keeps counting, matching the sequence
/// counter. Purely observational; no engine behavior depends on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorMetrics {
    /// Inputs applied to the predicted state while prediction was enabled.
    pub inputs_applied: u64,

    /// Inputs dropped from the pending queue by the bound. Each dropped
    /// input permanently diverges prediction from eventual reconciliation.
    pub inputs_dropped: u64,

    /// Authoritative updates reconciled.
    pub reconciliations: u64,

    /// Pending inputs retired by acknowledgment.
    pub inputs_acknowledged: u64,

    /// Pending inputs replayed onto a new confirmed state.
    pub inputs_replayed: u64,

    /// Largest pending-queue depth observed.
    pub peak_pending: u64,
}
