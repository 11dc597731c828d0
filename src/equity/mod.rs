//! Exhaustive equity enumeration against uniformly random opponent
//! holdings.
//!
//! Everything here is a pure function of cards. The opponent-combo
//! loop dominates the cost (C(45,2) = 990 combos on the flop, each
//! with a one-card look-ahead), so it runs on the rayon pool.

use rayon::prelude::*;
use thiserror::Error;
use tracing::trace;

use crate::core::{Card, CardCombos, CardSet, Deck, Rank, Rankable};

/// Strength threshold above which a run-out counts as nutted.
pub const NUTTED_THRESHOLD: f64 = 0.955;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquityError {
    #[error("only {unseen} unseen cards remain; enumeration needs at least {needed}")]
    DegenerateInput { unseen: usize, needed: usize },

    #[error("duplicate card across hole and board: {0}")]
    DuplicateCard(Card),

    #[error("board of {0} cards is not a street")]
    BadBoardLength(usize),
}

/// Raw enumeration results for one hero holding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandMetrics {
    /// Probability of holding the best hand right now, raised to the
    /// number of opponents.
    pub strength: f64,
    /// Chance of improving to the best hand when currently behind.
    pub positive_potential: f64,
    /// Chance of falling behind when currently ahead.
    pub negative_potential: f64,
}

/// [`HandMetrics`] folded into the two numbers the policy consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStrength {
    pub for_calling: f64,
    pub for_aggression: f64,
}

/// Rank a complete 5-7 card holding.
pub fn hand_rank(cards: &[Card]) -> Rank {
    cards.rank()
}

fn validate(hole: [Card; 2], board: &[Card]) -> Result<CardSet, EquityError> {
    if !matches!(board.len(), 0 | 3 | 4 | 5) {
        return Err(EquityError::BadBoardLength(board.len()));
    }
    let mut known = CardSet::new();
    for card in hole.iter().chain(board.iter()) {
        if known.contains(*card) {
            return Err(EquityError::DuplicateCard(*card));
        }
        known.insert(*card);
    }
    Ok(known)
}

/// Fraction of opponent hole-card combos hero beats right now, ties
/// counting half, raised to the power of `num_opponents`. The `deck`
/// holds every card an opponent could still be dealt from.
pub fn hand_strength(
    hole: [Card; 2],
    board: &[Card],
    num_opponents: usize,
    deck: &[Card],
) -> Result<f64, EquityError> {
    validate(hole, board)?;
    if deck.len() < 2 {
        return Err(EquityError::DegenerateInput {
            unseen: deck.len(),
            needed: 2,
        });
    }

    let hero_cards: CardSet = hole.iter().chain(board.iter()).copied().collect();
    let hero = hero_cards.rank();

    let mut ahead = 0u64;
    let mut tied = 0u64;
    let mut behind = 0u64;
    let board_set: CardSet = board.iter().copied().collect();
    for opp in CardCombos::new(deck, 2) {
        match hero.cmp(&(opp | board_set).rank()) {
            std::cmp::Ordering::Greater => ahead += 1,
            std::cmp::Ordering::Equal => tied += 1,
            std::cmp::Ordering::Less => behind += 1,
        }
    }

    let total = (ahead + tied + behind) as f64;
    let single = (ahead as f64 + tied as f64 / 2.0) / total;
    Ok(single.powi(num_opponents as i32))
}

/// One opponent combo's contribution to strength and potential.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    ahead: u64,
    tied: u64,
    behind: u64,
    /// `hp[now][next]`: 0 = hero ahead, 1 = tied, 2 = behind.
    hp: [[u64; 3]; 3],
}

impl Tally {
    fn merge(mut self, other: Tally) -> Tally {
        self.ahead += other.ahead;
        self.tied += other.tied;
        self.behind += other.behind;
        for (row, orow) in self.hp.iter_mut().zip(other.hp.iter()) {
            for (cell, ocell) in row.iter_mut().zip(orow.iter()) {
                *cell += *ocell;
            }
        }
        self
    }
}

fn outcome_index(hero: Rank, opp: Rank) -> usize {
    match hero.cmp(&opp) {
        std::cmp::Ordering::Greater => 0,
        std::cmp::Ordering::Equal => 1,
        std::cmp::Ordering::Less => 2,
    }
}

/// Enumerate current strength plus one-card-look-ahead potentials
/// against every opponent combo. On the river there is no card to
/// come and both potentials are zero.
pub fn hand_metrics(
    hole: [Card; 2],
    board: &[Card],
    num_opponents: usize,
) -> Result<HandMetrics, EquityError> {
    let known = validate(hole, board)?;
    let deck = Deck::remaining(known);
    if deck.len() < 2 {
        return Err(EquityError::DegenerateInput {
            unseen: deck.len(),
            needed: 2,
        });
    }

    let hero_now: CardSet = hole.iter().chain(board.iter()).copied().collect();
    let hero = hero_now.rank();
    let board_set: CardSet = board.iter().copied().collect();
    let hole_set: CardSet = hole.iter().copied().collect();
    let river = board.len() == 5;

    let combos: Vec<CardSet> = CardCombos::new(&deck, 2).collect();
    let tally = combos
        .par_iter()
        .map(|&opp| {
            let mut t = Tally::default();
            let idx = outcome_index(hero, (opp | board_set).rank());
            match idx {
                0 => t.ahead = 1,
                1 => t.tied = 1,
                _ => t.behind = 1,
            }
            if river {
                return t;
            }
            for &next in &deck {
                if opp.contains(next) {
                    continue;
                }
                let mut next_board = board_set;
                next_board.insert(next);
                let hero_next = (hole_set | next_board).rank();
                let opp_next = (opp | next_board).rank();
                t.hp[idx][outcome_index(hero_next, opp_next)] += 1;
            }
            t
        })
        .reduce(Tally::default, Tally::merge);

    let total = (tally.ahead + tally.tied + tally.behind) as f64;
    let single = (tally.ahead as f64 + tally.tied as f64 / 2.0) / total;
    let strength = single.powi(num_opponents as i32);

    let (positive_potential, negative_potential) = if river {
        (0.0, 0.0)
    } else {
        let sum = |row: [u64; 3]| row.iter().sum::<u64>() as f64;
        let (ahead_sum, tied_sum, behind_sum) =
            (sum(tally.hp[0]), sum(tally.hp[1]), sum(tally.hp[2]));
        let hp = &tally.hp;
        let ppot_denom = behind_sum + tied_sum / 2.0;
        let npot_denom = ahead_sum + tied_sum / 2.0;
        let ppot = if ppot_denom > f64::EPSILON {
            (hp[2][0] as f64 + hp[2][1] as f64 / 2.0 + hp[1][0] as f64 / 2.0) / ppot_denom
        } else {
            0.0
        };
        let npot = if npot_denom > f64::EPSILON {
            (hp[0][2] as f64 + hp[1][2] as f64 / 2.0 + hp[0][1] as f64 / 2.0) / npot_denom
        } else {
            0.0
        };
        (ppot, npot)
    };

    trace!(strength, positive_potential, negative_potential, "metrics");
    Ok(HandMetrics {
        strength,
        positive_potential,
        negative_potential,
    })
}

/// Fold raw metrics into the strengths the policy branches on. Betting
/// credits unrealized outs; calling discounts the chance of being
/// outdrawn.
pub fn effective_strength(metrics: &HandMetrics) -> EffectiveStrength {
    let hs = metrics.strength;
    let for_aggression = hs + (1.0 - hs) * metrics.positive_potential;
    EffectiveStrength {
        for_calling: for_aggression - hs * metrics.negative_potential,
        for_aggression,
    }
}

/// Fraction of complete run-outs on which hero's final hand strength
/// clears `threshold`. Drives implied-odds calls and bluff pricing.
pub fn nutted_potential(
    hole: [Card; 2],
    board: &[Card],
    num_opponents: usize,
    threshold: f64,
) -> Result<f64, EquityError> {
    let known = validate(hole, board)?;
    let deck = Deck::remaining(known);
    let to_come = 5 - board.len();
    if deck.len() < to_come + 2 {
        return Err(EquityError::DegenerateInput {
            unseen: deck.len(),
            needed: to_come + 2,
        });
    }

    let runouts: Vec<CardSet> = CardCombos::new(&deck, to_come).collect();
    let nutted = runouts
        .par_iter()
        .map(|&runout| {
            let mut board: Vec<Card> = board.to_vec();
            board.extend(runout.into_iter());
            let rest: Vec<Card> = deck
                .iter()
                .copied()
                .filter(|c| !runout.contains(*c))
                .collect();
            // Inputs were validated and the run-out leaves >= 2 cards.
            match hand_strength(hole, &board, num_opponents, &rest) {
                Ok(hs) if hs > threshold => 1u64,
                _ => 0u64,
            }
        })
        .sum::<u64>();

    Ok(nutted as f64 / runouts.len() as f64)
}
