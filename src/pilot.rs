//! Poll-driven orchestration: one snapshot in, at most one
//! recommendation out.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::policy::{self, ObservationSource, PolicyAction, ResponsePredictor, StrategyOracle};
use crate::state::{StateTracker, TrackError};

/// Owns the tracker and drives the poll → update → decide cycle.
/// Strictly synchronous: a cycle finishes before the next poll is
/// read, and any tracking error is local to its cycle.
pub struct Pilot<S, P, O> {
    source: S,
    predictor: P,
    oracle: O,
    tracker: StateTracker,
    rng: StdRng,
    /// Action count the last recommendation was issued at. The same
    /// decision point is never answered twice.
    actions_at_update: Option<u32>,
}

impl<S, P, O> Pilot<S, P, O>
where
    S: ObservationSource,
    P: ResponsePredictor,
    O: StrategyOracle,
{
    pub fn new(source: S, predictor: P, oracle: O) -> Pilot<S, P, O> {
        Pilot::from_rng(source, predictor, oracle, StdRng::from_entropy())
    }

    /// Seeded variant for deterministic strategy sampling.
    pub fn from_rng(source: S, predictor: P, oracle: O, rng: StdRng) -> Pilot<S, P, O> {
        Pilot {
            source,
            predictor,
            oracle,
            tracker: StateTracker::new(),
            rng,
            actions_at_update: None,
        }
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    /// Run one cycle. `Ok(None)` when there is nothing to do this
    /// poll; errors mean the snapshot was rejected and the cycle
    /// skipped.
    pub fn poll_cycle(&mut self) -> Result<Option<PolicyAction>, TrackError> {
        let Some(snapshot) = self.source.poll_snapshot() else {
            return Ok(None);
        };
        self.tracker.apply_observation(&snapshot)?;

        if snapshot.active_player != Some(0) {
            return Ok(None);
        }
        let Some(hand) = self.tracker.hand() else {
            return Ok(None);
        };

        // Nothing happened since the last recommendation: same node,
        // same answer, don't recompute.
        if self.actions_at_update == Some(hand.action_count) {
            debug!("decision point unchanged");
            return Ok(None);
        }
        self.actions_at_update = Some(hand.action_count);

        let action = policy::decide(hand, &mut self.oracle, &self.predictor, &mut self.rng);
        info!(%action, line = %hand.line_string(), "recommendation");
        Ok(Some(action))
    }
}
