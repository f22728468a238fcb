//! Fixture state for exercising prediction.

use reckon_core::{Predictable, TimestampedInput};
use serde::{Deserialize, Serialize};

/// Fixture input: a 1-D velocity in units per millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveInput {
    /// Displacement per millisecond.
    pub velocity: f64,
}

impl MoveInput {
    /// Convenience constructor.
    pub fn new(velocity: f64) -> Self {
        Self { velocity }
    }
}

/// Fixture state: a 1-D position plus a trace of every apply call.
///
/// The trace lets tests assert exactly which inputs were replayed, in
/// which order, with which deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeState {
    /// Accumulated position.
    pub position: f64,
    /// `(velocity, delta_ms)` of every input applied to reach this state.
    pub trace: Vec<(f64, f64)>,
}

impl ProbeState {
    /// State at `position` with an empty trace.
    pub fn at(position: f64) -> Self {
        Self {
            position,
            trace: Vec::new(),
        }
    }
}

impl Predictable for ProbeState {
    type Input = MoveInput;

    fn apply(&self, input: &MoveInput, delta_ms: f64) -> Self {
        let mut next = self.clone();
        next.position += input.velocity * delta_ms;
        next.trace.push((input.velocity, delta_ms));
        next
    }
}

/// Independent replay oracle: `confirmed` advanced through `inputs` in
/// order, as a plain fold over `apply`. Used to cross-check the engine's
/// replay.
pub fn reference_replay(
    confirmed: &ProbeState,
    inputs: &[TimestampedInput<MoveInput>],
) -> ProbeState {
    inputs.iter().fold(confirmed.clone(), |state, entry| {
        state.apply(&entry.input, entry.delta_ms)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_is_pure_and_deterministic() {
        let state = ProbeState::at(4.0);
        let input = MoveInput::new(0.5);

        let a = state.apply(&input, 16.0);
        let b = state.apply(&input, 16.0);

        assert_eq!(a, b);
        assert_eq!(a.position, 12.0);
        assert_eq!(state.position, 4.0);
        assert!(state.trace.is_empty());
    }

    #[test]
    fn test_reference_replay_folds_in_order() {
        let confirmed = ProbeState::at(0.0);
        let inputs = vec![
            TimestampedInput {
                sequence_id: 5,
                input: MoveInput::new(1.0),
                captured_at_ms: 0.0,
                delta_ms: 10.0,
            },
            TimestampedInput {
                sequence_id: 6,
                input: MoveInput::new(2.0),
                captured_at_ms: 10.0,
                delta_ms: 5.0,
            },
        ];

        let replayed = reference_replay(&confirmed, &inputs);

        assert_eq!(replayed.position, 20.0);
        assert_eq!(replayed.trace, vec![(1.0, 10.0), (2.0, 5.0)]);
    }
}
