use core::fmt;
use std::fmt::Display;

use crate::state::{round2, HandState};

/// A recommendation the policy hands to the input layer. Sizings are
/// pot fractions, converted to absolute street wagers only at the
/// edge via [`PolicyAction::to_wager`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyAction {
    Fold,
    Check,
    Call,
    /// Fraction of the current pot.
    Bet { fraction: f64 },
    /// Fraction of the pot after hero calls the outstanding wager.
    Raise { fraction: f64 },
    Shove,
}

impl PolicyAction {
    /// Convert a sizing into hero's total street wager in big blinds.
    /// Bets are priced against the live pot; raises against the pot
    /// hero's call would create, then stacked on top of the wager
    /// being raised.
    pub fn to_wager(&self, hand: &HandState) -> f32 {
        let hero_inv = hand.invested_this_street(0);
        match *self {
            PolicyAction::Fold | PolicyAction::Check => 0.0,
            PolicyAction::Call => hand
                .last_wager
                .map(|w| w.amount)
                .unwrap_or(hero_inv),
            PolicyAction::Bet { fraction } => round2(fraction as f32 * hand.unraked_pot),
            PolicyAction::Raise { fraction } => {
                let last = hand.last_wager.map(|w| w.amount).unwrap_or(0.0);
                let pot_after_call = hand.unraked_pot + (last - hero_inv);
                round2(fraction as f32 * pot_after_call + last)
            }
            PolicyAction::Shove => round2(hand.stacks[0] + hero_inv),
        }
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(
            self,
            PolicyAction::Bet { .. } | PolicyAction::Raise { .. } | PolicyAction::Shove
        )
    }
}

impl Display for PolicyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyAction::Fold => write!(f, "Fold"),
            PolicyAction::Check => write!(f, "Check"),
            PolicyAction::Call => write!(f, "Call"),
            PolicyAction::Bet { fraction } => write!(f, "Bet {}%", (fraction * 100.0).round()),
            PolicyAction::Raise { fraction } => {
                write!(f, "Raise {}%", (fraction * 100.0).round())
            }
            PolicyAction::Shove => write!(f, "All-in"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cards_from_str;
    use crate::state::{ActionKind, Seat, SeatMap, Street};

    fn hand() -> HandState {
        let cards = cards_from_str("AsKd").unwrap();
        HandState::new([cards[0], cards[1]], SeatMap::from_button(0).unwrap())
    }

    #[test]
    fn test_bet_prices_against_pot() {
        let mut hand = hand();
        hand.roll_street(Street::Flop);
        hand.unraked_pot = 10.0;
        let wager = PolicyAction::Bet { fraction: 0.75 }.to_wager(&hand);
        assert_eq!(7.5, wager);
    }

    #[test]
    fn test_raise_prices_against_pot_after_call() {
        let mut hand = hand();
        // LJ opens to 3: pot 4.5, hero has nothing in.
        let lj = hand.seats.player(Seat::Lojack);
        hand.add_action(lj, ActionKind::Raise, 3.0);

        // Pot after hero's call would be 7.5; a 100% raise puts the
        // wager at 7.5 + 3.
        let wager = PolicyAction::Raise { fraction: 1.0 }.to_wager(&hand);
        assert_eq!(10.5, wager);
    }

    #[test]
    fn test_shove_is_stack_plus_street_investment() {
        let mut hand = hand();
        hand.stacks[0] = 42.0;
        let lj = hand.seats.player(Seat::Lojack);
        hand.add_action(lj, ActionKind::Raise, 3.0);
        hand.add_action(0, ActionKind::Call, 3.0);
        assert_eq!(45.0, PolicyAction::Shove.to_wager(&hand));
    }
}
