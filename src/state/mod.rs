//! State reconstruction: rebuilds a full hand history from periodic
//! snapshots of the table.
//!
//! Snapshots arrive every few seconds and carry only what a screen
//! reader can see at that instant, so the [`StateTracker`] infers the
//! actions that happened between polls, including the street-terminal
//! actions that are never directly observable.

/// Module for the five action kinds and per-street action records.
mod action;
pub use self::action::{Action, ActionKind, ActionRecord};

/// Module for tracking errors.
mod errors;
pub use self::errors::{
    InvalidObservationError, ReconciliationAmbiguity, SetupError, TrackError,
};

/// Module for the authoritative hand model.
mod hand_state;
pub(crate) use self::hand_state::round2;
pub use self::hand_state::{HandState, Wager};

/// Module for seats, seat orderings and the seat/player bijection.
mod seat;
pub use self::seat::{PlayerSet, Seat, SeatMap};

/// Module for raw table observations.
mod snapshot;
pub use self::snapshot::TableSnapshot;

/// Module for the betting rounds.
mod street;
pub use self::street::Street;

/// Module for the snapshot-folding tracker.
mod tracker;
pub use self::tracker::{estimated_unraked, StateTracker, RAKE, RAKE_CAP};
