use core::fmt;
use std::ops::{BitOr, BitOrAssign, BitXor};

use crate::core::Card;

/// A set of cards backed by a 52-bit mask.
///
/// Insertion, removal and membership are all single bit operations,
/// which keeps duplicate detection and remaining-deck computation cheap
/// inside the enumeration loops.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardSet(u64);

const ALL_CARDS_MASK: u64 = (1 << 52) - 1;

impl CardSet {
    /// The empty set.
    pub fn new() -> CardSet {
        CardSet(0)
    }

    /// The set of all 52 cards.
    pub fn full() -> CardSet {
        CardSet(ALL_CARDS_MASK)
    }

    pub fn insert(&mut self, card: Card) {
        self.0 |= 1 << card.index();
    }

    pub fn remove(&mut self, card: Card) {
        self.0 &= !(1 << card.index());
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1 << card.index()) != 0
    }

    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CardSet {
    type Output = CardSet;
    fn bitor(self, rhs: CardSet) -> CardSet {
        CardSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for CardSet {
    fn bitor_assign(&mut self, rhs: CardSet) {
        self.0 |= rhs.0;
    }
}

impl BitXor for CardSet {
    type Output = CardSet;
    fn bitxor(self, rhs: CardSet) -> CardSet {
        CardSet(self.0 ^ rhs.0)
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> CardSet {
        let mut set = CardSet::new();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

impl fmt::Debug for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.into_iter()).finish()
    }
}

/// Iterator over the cards in a `CardSet`, lowest index first.
pub struct CardSetIter(u64);

impl Iterator for CardSetIter {
    type Item = Card;
    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Card::from_index(idx))
    }
}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = CardSetIter;
    fn into_iter(self) -> CardSetIter {
        CardSetIter(self.0)
    }
}

impl IntoIterator for &CardSet {
    type Item = Card;
    type IntoIter = CardSetIter;
    fn into_iter(self) -> CardSetIter {
        CardSetIter(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Suit, Value};

    #[test]
    fn test_insert_contains_remove() {
        let mut set = CardSet::new();
        let card = Card::new(Value::Ace, Suit::Spade);
        assert!(!set.contains(card));
        set.insert(card);
        assert!(set.contains(card));
        assert_eq!(1, set.count());
        set.remove(card);
        assert!(set.is_empty());
    }

    #[test]
    fn test_full_has_every_card() {
        let full = CardSet::full();
        assert_eq!(52, full.count());
        for idx in 0..52 {
            assert!(full.contains(Card::from_index(idx)));
        }
    }

    #[test]
    fn test_iter_matches_inserted() {
        let cards = [
            Card::new(Value::Two, Suit::Club),
            Card::new(Value::King, Suit::Heart),
            Card::new(Value::Nine, Suit::Diamond),
        ];
        let set: CardSet = cards.iter().copied().collect();
        let out: Vec<Card> = set.into_iter().collect();
        assert_eq!(3, out.len());
        for card in cards {
            assert!(out.contains(&card));
        }
    }

    #[test]
    fn test_xor_is_set_difference_from_full() {
        let mut used = CardSet::new();
        used.insert(Card::new(Value::Ace, Suit::Spade));
        used.insert(Card::new(Value::King, Suit::Spade));
        let remaining = CardSet::full() ^ used;
        assert_eq!(50, remaining.count());
        assert!(!remaining.contains(Card::new(Value::Ace, Suit::Spade)));
    }
}
