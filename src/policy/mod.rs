//! The decision policy: turns a reconstructed hand plus equity
//! metrics into a single recommended action.
//!
//! Pre-flop is table-driven with an optional solver override;
//! post-flop is an ordered chain of value, call, bluff and default
//! branches over effective hand strength.

use rand::Rng;

use crate::state::{HandState, Street};

/// Module for the recommendation enum and sizing conversion.
mod action;
pub use self::action::PolicyAction;

/// Module for static pre-flop ranges.
mod preflop;
pub use self::preflop::{PreflopClass, Tier};

/// Module for the post-flop branch machine.
mod postflop;

/// Module for collaborator traits.
mod traits;
pub use self::traits::{
    sample_strategy, ObservationSource, ResponsePredictor, StrategyOption, StrategyOracle,
};

/// Recommend an action for hero at the current decision point.
pub fn decide<O, P, R>(hand: &HandState, oracle: &mut O, predictor: &P, rng: &mut R) -> PolicyAction
where
    O: StrategyOracle,
    P: ResponsePredictor,
    R: Rng,
{
    match hand.street {
        Street::Preflop => preflop::decide(hand, oracle, rng),
        _ => postflop::decide(hand, predictor),
    }
}
