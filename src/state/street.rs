use core::fmt;
use std::fmt::Display;

/// One of the four betting rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    pub fn advance(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::River,
        }
    }

    /// The street implied by a cumulative board size.
    pub fn from_board_len(len: usize) -> Option<Street> {
        match len {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }

    /// Number of board cards dealt by the end of this street.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

impl Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_saturates_at_river() {
        assert_eq!(Street::Flop, Street::Preflop.advance());
        assert_eq!(Street::River, Street::River.advance());
    }

    #[test]
    fn test_board_len_round_trip() {
        for street in Street::ALL {
            assert_eq!(Some(street), Street::from_board_len(street.board_len()));
        }
        assert_eq!(None, Street::from_board_len(2));
    }
}
