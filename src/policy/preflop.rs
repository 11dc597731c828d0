//! Table-driven pre-flop rules. With 50 unseen cards, exhaustive
//! enumeration is intractable pre-flop, so hands are bucketed through
//! the canonical 169-hand abstraction and played from static ranges.
//! A solver oracle hit overrides the table.

use core::fmt;
use std::fmt::Display;

use rand::Rng;
use tracing::debug;

use crate::core::{Card, Value};
use crate::policy::action::PolicyAction;
use crate::policy::traits::{sample_strategy, StrategyOracle};
use crate::state::HandState;

/// Pot fraction for an opening raise.
const OPEN_FRACTION: f64 = 1.0;
/// Pot fraction when re-raising.
const RERAISE_FRACTION: f64 = 1.0;
/// Largest price hero pays to continue with a merely strong hand
/// against a 3-bet, in big blinds.
const STRONG_CALL_CAP: f32 = 12.0;
/// Largest open size playable hands call, in big blinds.
const PLAYABLE_CALL_CAP: f32 = 4.0;
/// Speculative hands only continue for a small price.
const SPECULATIVE_CALL_CAP: f32 = 3.0;

/// One of the 169 strategically distinct two-card starting hands:
/// 13 pairs, 78 suited and 78 offsuit combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreflopClass {
    high: Value,
    low: Value,
    suited: bool,
}

impl PreflopClass {
    /// Values are reordered so `high >= low`; pairs are never suited.
    pub fn new(v1: Value, v2: Value, suited: bool) -> PreflopClass {
        let (high, low) = if v1 >= v2 { (v1, v2) } else { (v2, v1) };
        PreflopClass {
            high,
            low,
            suited: suited && high != low,
        }
    }

    pub fn from_hole(hole: [Card; 2]) -> PreflopClass {
        PreflopClass::new(hole[0].value, hole[1].value, hole[0].suit == hole[1].suit)
    }

    /// Parse "AA", "AKs" or "T9o".
    pub fn from_notation(s: &str) -> Option<PreflopClass> {
        let chars: Vec<char> = s.chars().collect();
        let (v1, v2) = match chars.as_slice() {
            [a, b] | [a, b, _] => (Value::from_char(*a)?, Value::from_char(*b)?),
            _ => return None,
        };
        let suited = match chars.get(2) {
            None => {
                if v1 != v2 {
                    return None;
                }
                false
            }
            Some('s') => {
                if v1 == v2 {
                    return None;
                }
                true
            }
            Some('o') => false,
            Some(_) => return None,
        };
        Some(PreflopClass::new(v1, v2, suited))
    }

    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    pub fn suited(&self) -> bool {
        self.suited
    }

    /// Playability bucket the static ranges key on.
    pub fn tier(&self) -> Tier {
        use Value::*;
        if self.is_pair() {
            return match self.high {
                Ace | King | Queen => Tier::Premium,
                Jack | Ten => Tier::Strong,
                Nine | Eight | Seven => Tier::Playable,
                _ => Tier::Speculative,
            };
        }

        let broadway = self.low >= Ten;
        let gap = self.high as u8 - self.low as u8;
        if self.suited {
            match (self.high, self.low) {
                (Ace, King) => Tier::Premium,
                (Ace, _) if broadway => Tier::Strong,
                (King, Queen) => Tier::Strong,
                (Ace, _) => Tier::Playable,
                _ if broadway => Tier::Playable,
                // Connectors and one-gappers with straight coverage.
                _ if gap == 1 && self.low >= Four => Tier::Speculative,
                _ if gap == 2 && self.low >= Six => Tier::Speculative,
                _ => Tier::Trash,
            }
        } else {
            match (self.high, self.low) {
                (Ace, King) => Tier::Premium,
                (Ace, Queen) => Tier::Strong,
                (Ace, Jack) | (King, Queen) => Tier::Playable,
                _ if broadway => Tier::Speculative,
                _ => Tier::Trash,
            }
        }
    }
}

impl Display for PreflopClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pair() {
            write!(f, "{}{}", self.high.to_char(), self.low.to_char())
        } else {
            let s = if self.suited { 's' } else { 'o' };
            write!(f, "{}{}{}", self.high.to_char(), self.low.to_char(), s)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Premium,
    Strong,
    Playable,
    Speculative,
    Trash,
}

/// Pre-flop recommendation. Static ranges unless the oracle knows the
/// node, in which case its mixed strategy is frequency-sampled.
pub fn decide<O: StrategyOracle, R: Rng>(
    hand: &HandState,
    oracle: &mut O,
    rng: &mut R,
) -> PolicyAction {
    let to_call = hand.amount_to_call(0);

    // Hero already owns the standing wager (the big blind's option
    // over limps): nothing to do but take the free flop.
    if hand.last_wager.map(|w| w.player) == Some(0) && to_call <= 0.0 {
        return PolicyAction::Check;
    }

    if let Some(options) = oracle.lookup(hand) {
        if let Some(action) = sample_strategy(&options, rng) {
            debug!(%action, "oracle strategy");
            return action;
        }
    }

    let tier = PreflopClass::from_hole(hand.hole).tier();
    let action = match hand.preflop_raises {
        0 => match tier {
            Tier::Premium | Tier::Strong | Tier::Playable => PolicyAction::Raise {
                fraction: OPEN_FRACTION,
            },
            Tier::Speculative if to_call <= 1.0 => PolicyAction::Call,
            _ if to_call <= 0.0 => PolicyAction::Check,
            _ => PolicyAction::Fold,
        },
        1 => match tier {
            Tier::Premium => PolicyAction::Raise {
                fraction: RERAISE_FRACTION,
            },
            Tier::Strong => PolicyAction::Call,
            Tier::Playable if to_call <= PLAYABLE_CALL_CAP => PolicyAction::Call,
            Tier::Speculative if to_call <= SPECULATIVE_CALL_CAP => PolicyAction::Call,
            _ => PolicyAction::Fold,
        },
        2 => match tier {
            Tier::Premium => PolicyAction::Raise {
                fraction: RERAISE_FRACTION,
            },
            Tier::Strong if to_call <= STRONG_CALL_CAP => PolicyAction::Call,
            _ => PolicyAction::Fold,
        },
        _ => match tier {
            Tier::Premium => PolicyAction::Shove,
            _ => PolicyAction::Fold,
        },
    };
    debug!(tier = tier_fmt(tier), raises = hand.preflop_raises, %action, "static range");
    action
}

fn tier_fmt(tier: Tier) -> &'static str {
    match tier {
        Tier::Premium => "premium",
        Tier::Strong => "strong",
        Tier::Playable => "playable",
        Tier::Speculative => "speculative",
        Tier::Trash => "trash",
    }
}
