//! Input records exchanged with the authority.

use serde::{Deserialize, Serialize};

/// One locally-applied input, stamped for acknowledgment and replay.
///
/// The engine returns one of these from every apply call; the caller hands
/// it to its transport for delivery to the authority, which later echoes
/// the highest `sequence_id` it has incorporated into its reported state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedInput<I> {
    /// Engine-assigned id: starts at 0 and increases by exactly 1 per
    /// locally-applied input, with no gaps and no reuse for the lifetime
    /// of one engine instance (resets included).
    pub sequence_id: u64,

    /// The application input value.
    pub input: I,

    /// Capture time in milliseconds since engine construction, on the
    /// engine's monotonic clock.
    pub captured_at_ms: f64,

    /// Elapsed time the input was locally applied with. Replay reuses this
    /// exact value.
    pub delta_ms: f64,
}
