//! Real-time decision support for 6-max no-limit hold'em.
//!
//! The crate is organized as a pipeline over noisy periodic table
//! snapshots:
//!
//! * [`core`] - cards, card sets, deck combinatorics and hand ranking.
//! * [`state`] - the reconstruction engine that folds snapshots into a
//!   full hand history, inferring the actions that fell between polls.
//! * [`equity`] - exhaustive strength and potential enumeration.
//! * [`policy`] - the decision policy producing a recommended action.
//! * [`Pilot`] - the synchronous poll loop tying them together.
//!
//! Everything outside the observation source, response predictor and
//! strategy oracle traits is deterministic and pure, which is what
//! makes the reconstruction testable hand by hand.

pub mod core;
pub mod equity;
pub mod policy;
pub mod state;

mod pilot;
pub use self::pilot::Pilot;
