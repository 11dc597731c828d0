//! Post-flop decision machine: effective-strength thresholds over a
//! fixed sizing lattice, with fold-equity searched through the
//! response predictor.

use tracing::debug;

use crate::equity::{
    effective_strength, hand_metrics, nutted_potential, EffectiveStrength, NUTTED_THRESHOLD,
};
use crate::policy::action::PolicyAction;
use crate::policy::traits::ResponsePredictor;
use crate::state::{HandState, Seat, Street};

/// Bet sizings as fractions of the pot.
const BET_FRACTIONS: [f64; 6] = [0.25, 0.50, 0.75, 1.00, 1.25, 1.50];
/// Raise sizings as fractions of the pot after hero's call.
const RAISE_FRACTIONS: [f64; 6] = [0.30, 0.50, 0.70, 0.90, 1.10, 1.30];
/// Base threshold for continuing against a wager.
const CALL_THRESHOLD: f64 = 0.6;
/// Below this aggregate equity a hand has no showdown value and is a
/// bluffing candidate.
const SHOWDOWN_EQUITY: f64 = 0.5;
/// Check-through probability under which a strong hand checks to let
/// a later player hang themselves.
const INDUCE_THRESHOLD: f64 = 0.35;
/// Smallest bet worth making, in big blinds.
const MIN_BET: f32 = 1.0;

/// Value thresholds by street, tightened when the street has already
/// seen aggression.
fn value_threshold(street: Street, aggressed: bool) -> f64 {
    match (street, aggressed) {
        (Street::Flop, false) => 0.70,
        (Street::Flop, true) => 0.78,
        (Street::Turn, false) => 0.78,
        (Street::Turn, true) => 0.85,
        (Street::River, false) => 0.85,
        (Street::River, true) | (Street::Preflop, _) => 0.93,
    }
}

/// Linear interpolation of `x` from `[x0, x1]` onto `[y0, y1]`.
fn map_range(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Effective strength is discounted per opponent action this street
/// by raising it to a power: one bet and a raise in front of hero
/// squares-and-a-half the requirement.
fn strength_exponent(hand: &HandState) -> f64 {
    1.0 + 0.5 * hand.street_aggression as f64
}

fn hero_closes_action(hand: &HandState) -> bool {
    Seat::POSTFLOP_ORDER
        .iter()
        .map(|&s| hand.seats.player(s))
        .filter(|&p| hand.players.contains(p))
        .next_back()
        == Some(0)
}

fn default_action(facing: bool) -> PolicyAction {
    if facing {
        PolicyAction::Fold
    } else {
        PolicyAction::Check
    }
}

/// Post-flop recommendation: check-to-induce, then value, call,
/// bluff, and finally check/fold.
pub fn decide<P: ResponsePredictor>(hand: &HandState, predictor: &P) -> PolicyAction {
    let facing = hand.last_wager.is_some();
    let num_opponents = hand.num_opponents().max(1);

    let metrics = match hand_metrics(hand.hole, &hand.board, num_opponents) {
        Ok(m) => m,
        // Degenerate inputs never justify chips going in.
        Err(_) => return default_action(facing),
    };
    let ehs = effective_strength(&metrics);
    let exponent = strength_exponent(hand);
    let threshold = value_threshold(hand.street, hand.street_aggression > 0);
    debug!(
        strength = metrics.strength,
        for_aggression = ehs.for_aggression,
        for_calling = ehs.for_calling,
        threshold,
        "postflop metrics"
    );

    let wants_value = ehs.for_aggression.powf(exponent) >= threshold;

    // Strong, out of position, and a later player is likely to bet if
    // checked to: slow-play.
    if wants_value
        && !facing
        && !hero_closes_action(hand)
        && predictor.check_through(hand) < INDUCE_THRESHOLD
    {
        return PolicyAction::Check;
    }

    if wants_value {
        if let Some(action) = best_value_size(hand, predictor) {
            return action;
        }
    }

    if facing && should_call(hand, &ehs, exponent) {
        return PolicyAction::Call;
    }

    if metrics.strength < SHOWDOWN_EQUITY {
        if let Some(action) = best_bluff_size(hand, predictor) {
            return action;
        }
    }

    default_action(facing)
}

/// Extra chips a sizing puts in, after capping at hero's stack.
fn chips_in(hand: &HandState, action: &PolicyAction) -> f32 {
    let hero_inv = hand.invested_this_street(0);
    let wager = action.to_wager(hand).min(hand.stacks[0] + hero_inv);
    wager - hero_inv
}

/// Search the lattice for the sizing that extracts the most: maximize
/// expected chips paid off, `(1 - foldProb) * amount`.
fn best_value_size<P: ResponsePredictor>(hand: &HandState, predictor: &P) -> Option<PolicyAction> {
    let fractions: &[f64] = if hand.last_wager.is_some() {
        &RAISE_FRACTIONS
    } else {
        &BET_FRACTIONS
    };

    let mut best: Option<(PolicyAction, f64)> = None;
    for &fraction in fractions {
        let mut action = if hand.last_wager.is_some() {
            PolicyAction::Raise { fraction }
        } else {
            PolicyAction::Bet { fraction }
        };
        let hero_inv = hand.invested_this_street(0);
        let wager = action.to_wager(hand);
        if wager - hero_inv < MIN_BET {
            continue;
        }
        if wager - hero_inv >= hand.stacks[0] {
            action = PolicyAction::Shove;
        }
        let amount = chips_in(hand, &action) as f64;
        let paid_off = (1.0 - predictor.fold_probability(hand, &action)) * amount;
        if best.map(|(_, ev)| paid_off > ev).unwrap_or(true) {
            best = Some((action, paid_off));
        }
    }
    best.map(|(action, ev)| {
        debug!(%action, ev, "value sizing");
        action
    })
}

/// Continue against a wager when discounted calling strength clears a
/// pot-odds-adjusted threshold, or when nutted run-outs price the call
/// by implied odds.
fn should_call(hand: &HandState, ehs: &EffectiveStrength, exponent: f64) -> bool {
    let to_call = hand.amount_to_call(0) as f64;
    if to_call <= 0.0 {
        return false;
    }
    let pot = hand.unraked_pot as f64;
    let pot_odds = to_call / (pot + to_call);

    // A cheap call needs less; a pot-sized bet needs more.
    let threshold = CALL_THRESHOLD * map_range(pot_odds.min(0.5), 0.0, 0.5, 0.75, 1.25);
    if ehs.for_calling.powf(exponent) >= threshold {
        return true;
    }

    // Implied odds on hands that still make the near-nuts often
    // enough. Skipped when the strength denominator already says the
    // hand is hopeless on the river.
    if hand.street != Street::River {
        if let Ok(nutted) =
            nutted_potential(hand.hole, &hand.board, hand.num_opponents().max(1), NUTTED_THRESHOLD)
        {
            if nutted * (pot + to_call) > to_call {
                debug!(nutted, pot_odds, "implied-odds call");
                return true;
            }
        }
    }
    false
}

/// Search the lattice for a profitable bluff: win the pot when they
/// fold, lose the bet less the nutted-run-out recovery when called.
fn best_bluff_size<P: ResponsePredictor>(hand: &HandState, predictor: &P) -> Option<PolicyAction> {
    let facing = hand.last_wager.is_some();
    let fractions: &[f64] = if facing { &RAISE_FRACTIONS } else { &BET_FRACTIONS };
    let pot = hand.unraked_pot as f64;

    let nutted = if hand.street == Street::River {
        0.0
    } else {
        nutted_potential(hand.hole, &hand.board, hand.num_opponents().max(1), NUTTED_THRESHOLD)
            .unwrap_or(0.0)
    };

    let mut best: Option<(PolicyAction, f64)> = None;
    for &fraction in fractions {
        let action = if facing {
            PolicyAction::Raise { fraction }
        } else {
            PolicyAction::Bet { fraction }
        };
        let amount = chips_in(hand, &action) as f64;
        if amount < MIN_BET as f64 {
            continue;
        }
        let fold_p = predictor.fold_probability(hand, &action);
        // Pot if the bluff gets called; nutted run-outs win it back.
        let pot_after = pot + 2.0 * amount;
        let ev = fold_p * pot - (1.0 - fold_p) * (amount - nutted * pot_after);
        if ev > 0.0 && best.map(|(_, b)| ev > b).unwrap_or(true) {
            best = Some((action, ev));
        }
    }
    best.map(|(action, ev)| {
        debug!(%action, ev, "bluff sizing");
        action
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cards_from_str;
    use crate::state::{ActionKind, SeatMap};

    /// Predictor with fixed fold and check-through probabilities.
    struct Stub {
        fold: f64,
        check_through: f64,
    }

    impl ResponsePredictor for Stub {
        fn fold_probability(&self, _hand: &HandState, _action: &PolicyAction) -> f64 {
            self.fold
        }
        fn check_through(&self, _hand: &HandState) -> f64 {
            self.check_through
        }
    }

    fn heads_up_river(hole: &str, board: &str) -> HandState {
        let cards = cards_from_str(hole).unwrap();
        // Hero on the button, in position: closes the action.
        let mut hand = HandState::new([cards[0], cards[1]], SeatMap::from_button(0).unwrap());
        let bb = hand.seats.player(Seat::BigBlind);
        for pn in 1..6 {
            if pn != bb {
                hand.players.remove(pn);
            }
        }
        hand.add_action(0, ActionKind::Raise, 2.5);
        hand.add_action(bb, ActionKind::Call, 2.5);
        hand.roll_street(Street::Flop);
        hand.roll_street(Street::Turn);
        hand.roll_street(Street::River);
        hand.board = cards_from_str(board).unwrap();
        hand
    }

    /// Heads-up river, near-nut strength, unbet pot: the policy bets
    /// and picks the lattice size that extracts the most.
    #[test]
    fn test_river_nuts_bets_top_of_lattice() {
        // Nut flush on a four-spade board.
        let hand = heads_up_river("AsKs", "Qs7s2s9hJd");
        // Villain never folds: bigger is always better, so the search
        // lands on the top of the lattice.
        let predictor = Stub {
            fold: 0.0,
            check_through: 1.0,
        };
        let action = decide(&hand, &predictor);
        let PolicyAction::Bet { fraction } = action else {
            panic!("expected a value bet, got {action}");
        };
        assert_eq!(1.50, fraction);
    }

    #[test]
    fn test_river_air_facing_bet_folds_when_bluff_unprofitable() {
        // Busted draw, no showdown value.
        let mut hand = heads_up_river("5h4h", "Qs7s2s9hJd");
        let bb = hand.seats.player(Seat::BigBlind);
        hand.add_action(bb, ActionKind::Bet, 5.0);
        // Villain never folds: bluffing is lighting money on fire.
        let predictor = Stub {
            fold: 0.0,
            check_through: 0.0,
        };
        assert_eq!(PolicyAction::Fold, decide(&hand, &predictor));
    }

    #[test]
    fn test_river_air_bluffs_when_folds_are_likely() {
        let hand = heads_up_river("5h4h", "Qs7s2s9hJd");
        let predictor = Stub {
            fold: 0.9,
            check_through: 1.0,
        };
        let action = decide(&hand, &predictor);
        assert!(
            action.is_aggressive(),
            "90% fold equity should produce a bluff, got {action}"
        );
    }

    #[test]
    fn test_strong_hand_checks_to_induce_out_of_position() {
        // Hero out of position heads up against the button.
        let cards = cards_from_str("AsKs").unwrap();
        let mut hand = HandState::new([cards[0], cards[1]], SeatMap::from_button(3).unwrap());
        let bu = hand.seats.player(Seat::Button);
        for pn in 0..6 {
            if pn != 0 && pn != bu {
                hand.players.remove(pn);
            }
        }
        hand.roll_street(Street::River);
        hand.board = cards_from_str("Qs7s2s9hJd").unwrap();

        // A bet behind is almost certain if hero checks.
        let predictor = Stub {
            fold: 0.5,
            check_through: 0.1,
        };
        assert_eq!(PolicyAction::Check, decide(&hand, &predictor));
    }

    #[test]
    fn test_medium_strength_calls_a_small_bet() {
        // Top pair good kicker on a dry board.
        let mut hand = heads_up_river("AhQd", "Qs7d2c9hJc");
        let bb = hand.seats.player(Seat::BigBlind);
        hand.add_action(bb, ActionKind::Bet, 2.0);
        let predictor = Stub {
            fold: 0.0,
            check_through: 0.0,
        };
        assert_eq!(PolicyAction::Call, decide(&hand, &predictor));
    }
}
