//! Prediction engine: immediate local application of inputs, reconciled
//! against asynchronous authoritative updates.

use crate::error::PredictError;
use crate::input::TimestampedInput;
use crate::metrics::PredictorMetrics;
use crate::queue::{PendingInputs, DEFAULT_MAX_PENDING};
use crate::state::Predictable;
use std::time::Instant;
use tracing::{debug, trace};

/// Client-side predictor with acknowledgment and replay.
///
/// Owns the last confirmed (authoritative) state, the current predicted
/// state, and the queue of inputs applied locally but not yet acknowledged.
/// While enabled, the predicted state always equals the confirmed state
/// advanced through every pending input in ascending sequence order.
///
/// The engine runs no background work and performs no I/O; it is a passive
/// structure driven entirely by whichever calls arrive. For concurrent use
/// from an input/render thread and a network-receive thread, wrap it in a
/// [`SharedPredictor`](crate::SharedPredictor).
#[derive(Debug)]
pub struct Predictor<S: Predictable> {
    confirmed_state: S,
    predicted_state: S,
    pending: PendingInputs<S::Input>,
    next_sequence_id: u64,
    enabled: bool,
    /// Monotonic origin for `captured_at_ms` stamps.
    epoch: Instant,
    /// When the previous input was applied; auto deltas are measured from
    /// here.
    last_input_at: Instant,
    metrics: PredictorMetrics,
}

impl<S> Predictor<S>
where
    S: Predictable,
    S::Input: Clone,
{
    /// Create a predictor over `initial_state` with the default pending
    /// bound of [`DEFAULT_MAX_PENDING`].
    pub fn new(initial_state: S) -> Self {
        Self::build(initial_state, DEFAULT_MAX_PENDING)
    }

    /// Create a predictor holding at most `max_pending_inputs`
    /// unacknowledged inputs.
    ///
    /// Fails with [`PredictError::InvalidMaxPending`] when the bound is
    /// zero.
    pub fn with_max_pending(
        initial_state: S,
        max_pending_inputs: usize,
    ) -> Result<Self, PredictError> {
        if max_pending_inputs == 0 {
            return Err(PredictError::InvalidMaxPending {
                got: max_pending_inputs,
            });
        }
        Ok(Self::build(initial_state, max_pending_inputs))
    }

    fn build(initial_state: S, max_pending: usize) -> Self {
        let now = Instant::now();
        Self {
            predicted_state: initial_state.clone(),
            confirmed_state: initial_state,
            pending: PendingInputs::new(max_pending),
            next_sequence_id: 0,
            enabled: true,
            epoch: now,
            last_input_at: now,
            metrics: PredictorMetrics::default(),
        }
    }

    /// Apply one input locally, measuring the elapsed time since the
    /// previous input on the engine's monotonic clock.
    ///
    /// Returns the stamped record for the caller to transmit to the
    /// authority. The record is returned even while prediction is disabled,
    /// so input submission can continue with prediction toggled off.
    ///
    /// Never blocks; safe to call once per rendered frame.
    pub fn apply_input(&mut self, input: S::Input) -> TimestampedInput<S::Input> {
        let delta_ms = self.last_input_at.elapsed().as_secs_f64() * 1000.0;
        self.apply_input_with_delta(input, delta_ms)
    }

    /// Apply one input locally with a caller-supplied elapsed-time delta.
    pub fn apply_input_with_delta(
        &mut self,
        input: S::Input,
        delta_ms: f64,
    ) -> TimestampedInput<S::Input> {
        let now = Instant::now();
        let captured_at_ms = now.duration_since(self.epoch).as_secs_f64() * 1000.0;
        self.last_input_at = now;

        let stamped = TimestampedInput {
            sequence_id: self.next_sequence_id,
            input,
            captured_at_ms,
            delta_ms,
        };
        self.next_sequence_id += 1;

        if self.enabled {
            self.predicted_state = self.predicted_state.apply(&stamped.input, stamped.delta_ms);
            let dropped = self.pending.push(stamped.clone());
            if dropped > 0 {
                self.metrics.inputs_dropped += dropped as u64;
                debug!(dropped, "pending queue full, dropped oldest inputs");
            }
            self.metrics.inputs_applied += 1;
            self.metrics.peak_pending = self.metrics.peak_pending.max(self.pending.len() as u64);
        }

        trace!(
            sequence_id = stamped.sequence_id,
            delta_ms = stamped.delta_ms,
            enabled = self.enabled,
            "input applied"
        );

        stamped
    }

    /// Reconcile against an authoritative update.
    ///
    /// `state` becomes the new confirmed baseline unconditionally — it is
    /// the new ground truth regardless of what was predicted. Pending
    /// inputs with `sequence_id <= last_processed_input_id` are retired
    /// (their effects are already embedded in `state`); every remaining
    /// input is then replayed in ascending sequence order, with its stored
    /// delta, onto a fresh clone of the new baseline.
    ///
    /// Replaying forward rather than diffing keeps the predicted state on a
    /// single baseline, and tolerates the authority confirming inputs out
    /// of the order they were sent: trailing inputs are always replayed in
    /// the engine's own sequence order, not packet-arrival order.
    ///
    /// A divergence between the previous prediction and the replayed result
    /// is not an error; it shows up as a discontinuity in the predicted
    /// state, to be smoothed by a display layer outside this engine.
    pub fn on_server_state(&mut self, state: S, last_processed_input_id: u64) {
        self.confirmed_state = state;
        self.metrics.reconciliations += 1;

        if !self.enabled {
            self.pending.clear();
            self.predicted_state = self.confirmed_state.clone();
            debug!(last_processed_input_id, "authoritative update while disabled");
            return;
        }

        let acked = self.pending.acknowledge(last_processed_input_id);
        self.metrics.inputs_acknowledged += acked as u64;

        let mut replayed = self.confirmed_state.clone();
        for entry in self.pending.iter() {
            replayed = replayed.apply(&entry.input, entry.delta_ms);
        }
        self.metrics.inputs_replayed += self.pending.len() as u64;
        self.predicted_state = replayed;

        debug!(
            last_processed_input_id,
            acked,
            replaying = self.pending.len(),
            "reconciled authoritative update"
        );
    }

    /// Restart from a new baseline.
    ///
    /// Confirmed and predicted state both become `new_state`, the pending
    /// queue empties, and the input clock re-arms to now. The sequence
    /// counter is not restarted: ids stay unique across resets for the
    /// lifetime of the engine, and downstream consumers may rely on that.
    pub fn reset(&mut self, new_state: S) {
        self.predicted_state = new_state.clone();
        self.confirmed_state = new_state;
        self.pending.clear();
        self.last_input_at = Instant::now();
        debug!(next_sequence_id = self.next_sequence_id, "predictor reset");
    }

    /// Drop every unacknowledged input and collapse the prediction back to
    /// the confirmed state.
    ///
    /// The confirmed state and the sequence counter are untouched.
    pub fn clear_pending_inputs(&mut self) {
        self.pending.clear();
        self.predicted_state = self.confirmed_state.clone();
    }

    /// Toggle prediction.
    ///
    /// Disabling collapses the predicted state to the confirmed state and
    /// empties the queue at the flip; while disabled, [`apply_input`]
    /// still stamps and returns records without queueing or applying them,
    /// and authoritative updates keep overwriting the confirmed state.
    /// Re-enabling resumes prediction from whatever the confirmed state
    /// currently holds, with an empty queue. Read accessors never act on
    /// the flag.
    ///
    /// [`apply_input`]: Predictor::apply_input
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.pending.clear();
        self.predicted_state = self.confirmed_state.clone();
        debug!(enabled, "prediction toggled");
    }

    /// Whether prediction is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current predicted state: the confirmed state advanced through every
    /// pending input. Treat the reference as an immutable snapshot.
    pub fn predicted_state(&self) -> &S {
        &self.predicted_state
    }

    /// Last state received from the authority, or the initial state if no
    /// update has arrived yet.
    pub fn confirmed_state(&self) -> &S {
        &self.confirmed_state
    }

    /// Pending (unacknowledged) inputs, oldest first.
    pub fn pending_inputs(&self) -> &PendingInputs<S::Input> {
        &self.pending
    }

    /// Number of pending inputs.
    pub fn pending_input_count(&self) -> usize {
        self.pending.len()
    }

    /// The sequence id the next applied input will receive.
    pub fn next_sequence_id(&self) -> u64 {
        self.next_sequence_id
    }

    /// Running behavior counters.
    pub fn metrics(&self) -> &PredictorMetrics {
        &self.metrics
    }
}
