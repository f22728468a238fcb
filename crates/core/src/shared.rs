//! Shared handle for engines driven from more than one thread.

use crate::engine::Predictor;
use crate::error::PredictError;
use crate::input::TimestampedInput;
use crate::metrics::PredictorMetrics;
use crate::state::Predictable;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cheaply cloneable, thread-safe handle around a [`Predictor`].
///
/// In a typical host, `apply_input` runs on an input/render thread at frame
/// rate while `on_server_state` runs on a network-receive thread whenever
/// an update arrives. Every operation here takes the single internal lock
/// for its full body, so no caller ever observes a torn mix of pre- and
/// post-reconciliation values. Sequence ids are assigned in lock-acquisition
/// order, which gives replay a total order regardless of call-site thread.
///
/// The lock is only ever held for in-memory work (a clone plus a replay
/// bounded by `max_pending`), never across I/O or external calls. Read
/// accessors return owned clones: immutable snapshots that stay valid while
/// the engine keeps moving, safe to hand to a renderer.
pub struct SharedPredictor<S: Predictable> {
    inner: Arc<Mutex<Predictor<S>>>,
}

impl<S: Predictable> Clone for SharedPredictor<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> SharedPredictor<S>
where
    S: Predictable,
    S::Input: Clone,
{
    /// Wrap a predictor for shared use.
    pub fn new(predictor: Predictor<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(predictor)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Predictor<S>>, PredictError> {
        self.inner.lock().map_err(|_| PredictError::Poisoned)
    }

    /// See [`Predictor::apply_input`].
    pub fn apply_input(
        &self,
        input: S::Input,
    ) -> Result<TimestampedInput<S::Input>, PredictError> {
        Ok(self.lock()?.apply_input(input))
    }

    /// See [`Predictor::apply_input_with_delta`].
    pub fn apply_input_with_delta(
        &self,
        input: S::Input,
        delta_ms: f64,
    ) -> Result<TimestampedInput<S::Input>, PredictError> {
        Ok(self.lock()?.apply_input_with_delta(input, delta_ms))
    }

    /// See [`Predictor::on_server_state`].
    ///
    /// Updates are applied in lock-acquisition order; if authoritative
    /// updates can race each other out of network order, sequencing them is
    /// the caller's responsibility — the engine cannot detect a stale
    /// update and unconditionally overwrites the confirmed state.
    pub fn on_server_state(
        &self,
        state: S,
        last_processed_input_id: u64,
    ) -> Result<(), PredictError> {
        self.lock()?.on_server_state(state, last_processed_input_id);
        Ok(())
    }

    /// See [`Predictor::reset`].
    pub fn reset(&self, new_state: S) -> Result<(), PredictError> {
        self.lock()?.reset(new_state);
        Ok(())
    }

    /// See [`Predictor::clear_pending_inputs`].
    pub fn clear_pending_inputs(&self) -> Result<(), PredictError> {
        self.lock()?.clear_pending_inputs();
        Ok(())
    }

    /// See [`Predictor::set_enabled`].
    pub fn set_enabled(&self, enabled: bool) -> Result<(), PredictError> {
        self.lock()?.set_enabled(enabled);
        Ok(())
    }

    /// See [`Predictor::is_enabled`].
    pub fn is_enabled(&self) -> Result<bool, PredictError> {
        Ok(self.lock()?.is_enabled())
    }

    /// Snapshot of the current predicted state.
    pub fn predicted(&self) -> Result<S, PredictError> {
        Ok(self.lock()?.predicted_state().clone())
    }

    /// Snapshot of the last confirmed state.
    pub fn confirmed(&self) -> Result<S, PredictError> {
        Ok(self.lock()?.confirmed_state().clone())
    }

    /// Number of pending inputs.
    pub fn pending_input_count(&self) -> Result<usize, PredictError> {
        Ok(self.lock()?.pending_input_count())
    }

    /// Snapshot of the running behavior counters.
    pub fn metrics(&self) -> Result<PredictorMetrics, PredictError> {
        Ok(self.lock()?.metrics().clone())
    }
}
