//! Engine error taxonomy.
//!
//! Two classes exist. Invalid arguments fail fast, synchronously, at the
//! call that introduced the bad value. Bounded-memory data loss — the
//! pending queue dropping its oldest entries when full — is deliberately
//! not an error and is never reported through this type. The engine
//! performs no I/O, so there is no retryable or transient class, and a
//! prediction mismatch against the authority surfaces as a visible state
//! correction, never as an error. Null/absent arguments from the original
//! taxonomy cannot be expressed in safe Rust; the type system discharges
//! them.

use thiserror::Error;

/// Errors surfaced by the prediction engine.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Construction was attempted with a pending-input bound of zero.
    #[error("max_pending_inputs must be >= 1, got {got}")]
    InvalidMaxPending {
        /// The rejected bound.
        got: usize,
    },

    /// A thread panicked while holding the shared engine lock.
    #[error("prediction engine lock poisoned")]
    Poisoned,
}
