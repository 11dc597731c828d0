use crate::core::Card;
use crate::state::errors::InvalidObservationError;
use crate::state::seat::PlayerSet;
use crate::state::street::Street;

/// One poll of the table, exactly as read. Every field a reader can
/// fail to recover is an `Option`; the tracker decides what absence
/// means in context rather than the capture layer guessing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSnapshot {
    /// Hero's hole cards as currently displayed. A change of cards
    /// means a new hand has started.
    pub hole: Option<[Card; 2]>,
    /// Player number the dealer button sits in front of, when the
    /// marker is readable. Required to seat a newly observed hand.
    pub button: Option<usize>,
    /// Players whose cards are still face down in front of them.
    pub players: PlayerSet,
    /// The player the action marker currently points at.
    pub active_player: Option<usize>,
    /// Cumulative board cards.
    pub board: Vec<Card>,
    /// Displayed (raked) pot total.
    pub pot: Option<f32>,
    /// Each player's total wager on the current street, where readable.
    pub wagers: [Option<f32>; 6],
    /// Raked pot of the street that just completed. Only populated
    /// while the table is showing a street boundary.
    pub prior_street_pot: Option<f32>,
    /// Remaining stacks, where readable.
    pub stacks: [Option<f32>; 6],
}

impl TableSnapshot {
    /// The street the board size implies.
    pub fn street(&self) -> Result<Street, InvalidObservationError> {
        Street::from_board_len(self.board.len())
            .ok_or(InvalidObservationError::BadBoardLength(self.board.len()))
    }
}
