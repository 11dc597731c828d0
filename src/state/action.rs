use core::fmt;
use std::fmt::Display;

use crate::state::seat::Seat;

/// The kind of action a player can take, without sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionKind {
    /// Single-letter code used in line strings.
    pub fn code(self) -> char {
        match self {
            ActionKind::Fold => 'F',
            ActionKind::Check => 'X',
            ActionKind::Call => 'C',
            ActionKind::Bet => 'B',
            ActionKind::Raise => 'R',
        }
    }

    /// Did this action put voluntary aggression into the pot?
    pub fn is_aggressive(self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise)
    }
}

/// A taken action with its sizing payload.
///
/// The wager is always the player's *total* chips committed on the
/// street after the action, not the increment. Raises also carry the
/// pot-after-call and the wager they raised over, which is what a
/// fractional policy sizing needs to be converted back into an
/// absolute amount later in the hand.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Fold,
    Check,
    Call {
        wager: f32,
    },
    Bet {
        wager: f32,
        pct_pot: f32,
    },
    Raise {
        wager: f32,
        pct_pot: f32,
        pot_after_call: f32,
        prior_wager: f32,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call { .. } => ActionKind::Call,
            Action::Bet { .. } => ActionKind::Bet,
            Action::Raise { .. } => ActionKind::Raise,
        }
    }

    /// Total street wager after this action.
    pub fn wager(&self) -> f32 {
        match self {
            Action::Fold | Action::Check => 0.0,
            Action::Call { wager } => *wager,
            Action::Bet { wager, .. } => *wager,
            Action::Raise { wager, .. } => *wager,
        }
    }
}

/// One entry in a street's action line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub seat: Seat,
    pub action: Action,
}

impl Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.seat.abbrev(), self.action.kind().code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_wager() {
        let raise = Action::Raise {
            wager: 9.0,
            pct_pot: 0.75,
            pot_after_call: 8.0,
            prior_wager: 3.0,
        };
        assert_eq!(ActionKind::Raise, raise.kind());
        assert_eq!(9.0, raise.wager());
        assert!(raise.kind().is_aggressive());
        assert!(!ActionKind::Call.is_aggressive());
    }

    #[test]
    fn test_record_display() {
        let record = ActionRecord {
            seat: Seat::Button,
            action: Action::Check,
        };
        assert_eq!("BU:X", record.to_string());
    }
}
