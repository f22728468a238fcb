//! Contract between the engine and application-defined simulation state.

/// State that can be advanced by applying one input over an elapsed-time
/// delta.
///
/// This is the only coupling point between the engine and domain logic: a
/// character position, a game board, a document — anything that changes in
/// response to inputs can be predicted.
///
/// The `Clone` bound supplies the snapshot capability. A clone must be
/// fully independent of the original (no shared mutable substructure): the
/// engine mutates its working copy during replay while callers may still
/// hold earlier snapshots.
///
/// `apply` must be pure and deterministic: identical
/// `(state, input, delta_ms)` triples must produce identical results on
/// every call, with no hidden randomness, clocks, or shared mutation.
/// Reconciliation recomputes prediction by replaying unacknowledged inputs
/// onto each authoritative state, so a non-deterministic `apply` silently
/// corrupts the replayed prediction. The type system cannot enforce this
/// precondition; the engine's property tests pin it for the fixture types.
pub trait Predictable: Clone {
    /// Application-defined input value (a movement vector, a command, ...).
    type Input;

    /// Return the state that results from applying `input` over `delta_ms`
    /// milliseconds.
    fn apply(&self, input: &Self::Input, delta_ms: f64) -> Self;
}
