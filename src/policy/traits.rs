use rand::Rng;

use crate::policy::PolicyAction;
use crate::state::{HandState, TableSnapshot};

/// Predicts how the table reacts to a hypothetical hero action.
/// Implementations see the live hand by reference only and must copy
/// whatever they advance hypothetically.
pub trait ResponsePredictor {
    /// Probability that every remaining opponent folds to `action`.
    fn fold_probability(&self, hand: &HandState, action: &PolicyAction) -> f64;

    /// Probability the street checks through if hero checks now.
    fn check_through(&self, hand: &HandState) -> f64;
}

/// Mixed strategy entry returned by a solver lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyOption {
    pub action: PolicyAction,
    /// Weight in [0,1]; a lookup's weights sum to ~1.
    pub frequency: f64,
}

/// A best-effort cached solver. `None` means no answer for this node
/// and the caller falls back to its static rules. The read-through
/// cache, and any network it fronts, belong to the implementation.
pub trait StrategyOracle {
    fn lookup(&mut self, hand: &HandState) -> Option<Vec<StrategyOption>>;
}

/// Wherever snapshots come from. `None` means nothing readable this
/// poll.
pub trait ObservationSource {
    fn poll_snapshot(&mut self) -> Option<TableSnapshot>;
}

/// Sample one option from a mixed strategy by cumulative frequency.
/// Falls back to the last option if the weights undershoot 1.
pub fn sample_strategy<R: Rng>(options: &[StrategyOption], rng: &mut R) -> Option<PolicyAction> {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for option in options {
        cumulative += option.frequency;
        if roll < cumulative {
            return Some(option.action);
        }
    }
    options.last().map(|o| o.action)
}
