//! Card primitives shared by the tracker, the equity enumerator and the
//! decision policy.

/// Module for `Card`, `Suit` and `Value` with parsing.
mod card;
pub use self::card::{cards_from_str, Card, CardParseError, Suit, Value};

/// Module for the 52-bit card set.
mod card_set;
pub use self::card_set::{CardSet, CardSetIter};

/// Module for deterministic deck material and combination enumeration.
mod deck;
pub use self::deck::{CardCombos, Deck};

/// Module for hand ranking.
mod rank;
pub use self::rank::{Rank, Rankable};
