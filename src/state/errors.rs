use thiserror::Error;

use crate::core::Card;

/// A hand could not be initialized from the available observations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    #[error("no button assignment could be resolved")]
    NoButton,
    #[error("seat assignment is not a bijection of the six roles")]
    BadSeatAssignment,
}

/// A snapshot contradicts an invariant of the tracked hand.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidObservationError {
    #[error("wager of player {player} decreased from {prior} to {observed}")]
    DecreasingWager {
        player: usize,
        prior: f32,
        observed: f32,
    },

    #[error("player {player} has street investment but no readable wager")]
    UnreadableWager { player: usize },

    #[error("duplicate card observed: {0}")]
    DuplicateCard(Card),

    #[error("board of {0} cards does not map to a street")]
    BadBoardLength(usize),

    #[error("board no longer extends the previously observed board")]
    BoardRegressed,

    #[error("player {player} reappeared after leaving the hand")]
    FoldedPlayerReturned { player: usize },

    #[error("prior street pot unavailable at street rollover")]
    MissingStreetPot,
}

/// Missed-action inference could not uniquely resolve a pot discrepancy.
/// Fatal to the current hand's tracking; the hand is discarded and
/// re-initialized on the next valid observation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconciliationAmbiguity {
    #[error("pot deficit of {deficit} with no remaining players to attribute a call to")]
    NoRemainingPlayers { deficit: f32 },

    #[error("unseen aggression cannot be attributed: player {front} acted first, not hero")]
    UnexpectedFrontRunner { front: usize },
}

/// Any error surfaced by the state reconstruction engine. All variants
/// are local to one poll cycle; the orchestration loop skips the poll
/// and retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    InvalidObservation(#[from] InvalidObservationError),

    #[error(transparent)]
    Reconciliation(#[from] ReconciliationAmbiguity),
}
