//! Headless loopback session: a shared predictor driven against a
//! simulated in-process authority.
//!
//! The authority consumes transmitted inputs after a configured delay,
//! advances its own state with the same `Predictable` contract, and
//! reports `(state, last_processed_input_id)` back — the same cycle a
//! networked client runs, with zero networking. Lost inputs are the
//! interesting part: the authority never sees them, so reconciliation
//! visibly snaps the prediction.

use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};
use reckon_core::{Predictable, Predictor, PredictorMetrics, SharedPredictor, TimestampedInput};
use std::collections::VecDeque;
use tracing::{debug, info};

use crate::config::SessionConfig;

/// Demo vehicle state advanced by throttle inputs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    /// 1-D position.
    pub position: f64,
    /// 1-D velocity in units per millisecond.
    pub velocity: f64,
}

/// Demo input: acceleration in units per millisecond squared.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    /// Signed acceleration.
    pub accel: f64,
}

impl Predictable for Cart {
    type Input = Throttle;

    fn apply(&self, input: &Throttle, delta_ms: f64) -> Self {
        let velocity = self.velocity + input.accel * delta_ms;
        Cart {
            position: self.position + velocity * delta_ms,
            velocity,
        }
    }
}

/// An input in transit to the authority.
struct InFlight {
    deliver_at: u64,
    entry: TimestampedInput<Throttle>,
}

/// Simulated authority: the ground truth the predictor reconciles against.
struct Authority {
    state: Cart,
    last_processed: Option<u64>,
}

impl Authority {
    fn process(&mut self, entry: &TimestampedInput<Throttle>) {
        self.state = self.state.apply(&entry.input, entry.delta_ms);
        self.last_processed = Some(entry.sequence_id);
    }
}

/// Outcome of one simulated session.
#[derive(Debug)]
pub struct SessionReport {
    /// Inputs applied and transmitted.
    pub inputs_sent: u64,
    /// Inputs lost before reaching the authority.
    pub inputs_lost: u64,
    /// Reconciliations that visibly moved the predicted position.
    pub snaps: u64,
    /// Inputs still unacknowledged when the session ended.
    pub pending_at_end: usize,
    /// Final predicted state.
    pub final_predicted: Cart,
    /// Final confirmed state.
    pub final_confirmed: Cart,
    /// Engine counters.
    pub metrics: PredictorMetrics,
}

/// Deterministic throttle pattern: alternating acceleration phases.
fn throttle_at(tick: u64) -> Throttle {
    Throttle {
        accel: (tick as f64 * 0.05).sin() * 1e-4,
    }
}

/// Deliver every in-flight input due at `tick` to the authority, then feed
/// the authoritative update back into the predictor.
fn deliver_due(
    tick: u64,
    predictor: &SharedPredictor<Cart>,
    authority: &mut Authority,
    in_flight: &mut VecDeque<InFlight>,
    snaps: &mut u64,
) -> Result<()> {
    let mut processed = false;
    while let Some(front) = in_flight.front() {
        if front.deliver_at > tick {
            break;
        }
        if let Some(flight) = in_flight.pop_front() {
            authority.process(&flight.entry);
            processed = true;
        }
    }
    if !processed {
        return Ok(());
    }

    if let Some(last_processed) = authority.last_processed {
        let before = predictor.predicted()?;
        predictor.on_server_state(authority.state.clone(), last_processed)?;
        let after = predictor.predicted()?;

        let correction = (after.position - before.position).abs();
        if correction > 1e-9 {
            *snaps += 1;
            debug!(tick, correction, "reconciliation snapped prediction");
        }
    }
    Ok(())
}

/// Run one loopback session.
pub fn run(config: &SessionConfig) -> Result<SessionReport> {
    let predictor = SharedPredictor::new(Predictor::with_max_pending(
        Cart::default(),
        config.max_pending_inputs,
    )?);
    let mut authority = Authority {
        state: Cart::default(),
        last_processed: None,
    };
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut in_flight: VecDeque<InFlight> = VecDeque::new();

    let mut inputs_lost = 0u64;
    let mut snaps = 0u64;

    for tick in 0..config.ticks {
        let stamped = predictor.apply_input_with_delta(throttle_at(tick), config.tick_ms)?;

        if rng.gen::<f64>() < config.input_loss {
            inputs_lost += 1;
            debug!(sequence_id = stamped.sequence_id, "input lost in transit");
        } else {
            in_flight.push_back(InFlight {
                deliver_at: tick + config.authority_latency_ticks,
                entry: stamped,
            });
        }

        deliver_due(tick, &predictor, &mut authority, &mut in_flight, &mut snaps)?;
    }

    // Drain whatever is still in transit.
    let mut tick = config.ticks;
    while !in_flight.is_empty() {
        deliver_due(tick, &predictor, &mut authority, &mut in_flight, &mut snaps)?;
        tick += 1;
    }

    let report = SessionReport {
        inputs_sent: config.ticks,
        inputs_lost,
        snaps,
        pending_at_end: predictor.pending_input_count()?,
        final_predicted: predictor.predicted()?,
        final_confirmed: predictor.confirmed()?,
        metrics: predictor.metrics()?,
    };
    info!(
        inputs_sent = report.inputs_sent,
        inputs_lost = report.inputs_lost,
        snaps = report.snaps,
        pending_at_end = report.pending_at_end,
        "loopback session finished"
    );
    Ok(report)
}
