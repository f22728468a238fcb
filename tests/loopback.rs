//! End-to-end prediction/reconciliation run over a scripted lossy session,
//! cross-checked against the testkit's reference replay.

use reckon_core::{Predictable, Predictor, TimestampedInput};
use reckon_testkit::{reference_replay, EventRecord, JsonlSink, MoveInput, ProbeState};
use std::collections::VecDeque;

const TICKS: u64 = 50;
const LATENCY_TICKS: u64 = 3;
const TICK_MS: f64 = 16.0;

/// An input is lost in transit when its id lands on this stride.
fn is_lost(sequence_id: u64) -> bool {
    sequence_id % 7 == 3
}

#[test]
fn scripted_lossy_session_reconciles_and_converges() {
    let mut predictor = Predictor::new(ProbeState::at(0.0));
    let mut authority = ProbeState::at(0.0);
    let mut last_processed: Option<u64> = None;
    let mut in_flight: VecDeque<(u64, TimestampedInput<MoveInput>)> = VecDeque::new();

    let mut sink = JsonlSink::create(std::env::temp_dir().join("reckon_loopback.jsonl"))
        .expect("can create temp log");
    let mut events = 0u64;

    for tick in 0..TICKS {
        let velocity = if tick % 2 == 0 { 1.0 } else { -0.25 };
        let stamped = predictor.apply_input_with_delta(MoveInput::new(velocity), TICK_MS);

        if is_lost(stamped.sequence_id) {
            sink.write(&EventRecord {
                sequence_id: Some(stamped.sequence_id),
                kind: "InputLost",
                payload: String::new(),
            })
            .expect("can write event");
            events += 1;
        } else {
            in_flight.push_back((tick + LATENCY_TICKS, stamped));
        }

        let mut processed = false;
        while let Some((deliver_at, _)) = in_flight.front() {
            if *deliver_at > tick {
                break;
            }
            if let Some((_, entry)) = in_flight.pop_front() {
                authority = authority.apply(&entry.input, entry.delta_ms);
                last_processed = Some(entry.sequence_id);
                processed = true;
            }
        }

        if !processed {
            continue;
        }
        let ack = last_processed.expect("processed implies an id");

        // Reconcile, then verify replay equivalence against an
        // independently computed reference.
        let remaining: Vec<TimestampedInput<MoveInput>> = predictor
            .pending_inputs()
            .iter()
            .filter(|e| e.sequence_id > ack)
            .cloned()
            .collect();
        predictor.on_server_state(authority.clone(), ack);

        assert_eq!(
            *predictor.predicted_state(),
            reference_replay(&authority, &remaining),
            "predicted state diverged from reference replay at tick {tick}"
        );

        sink.write(&EventRecord {
            sequence_id: Some(ack),
            kind: "Reconciled",
            payload: format!("pending={}", predictor.pending_input_count()),
        })
        .expect("can write event");
        events += 1;
    }

    // Drain the remaining in-flight inputs and reconcile one last time.
    while let Some((_, entry)) = in_flight.pop_front() {
        authority = authority.apply(&entry.input, entry.delta_ms);
        last_processed = Some(entry.sequence_id);
    }
    let final_ack = last_processed.expect("session delivered inputs");
    predictor.on_server_state(authority.clone(), final_ack);

    // Id 49 is not lost, so the final update acknowledges every input and
    // prediction collapses exactly onto the authoritative state.
    assert_eq!(final_ack, TICKS - 1);
    assert_eq!(predictor.pending_input_count(), 0);
    assert_eq!(*predictor.predicted_state(), authority);
    assert_eq!(*predictor.confirmed_state(), authority);

    // The authority saw everything except the lost inputs.
    let lost = (0..TICKS).filter(|id| is_lost(*id)).count();
    assert_eq!(authority.trace.len(), TICKS as usize - lost);

    let metrics = predictor.metrics();
    assert_eq!(metrics.inputs_applied, TICKS);
    assert_eq!(metrics.inputs_acknowledged, TICKS);
    assert_eq!(metrics.inputs_dropped, 0);
    assert!(events > 0);
}
