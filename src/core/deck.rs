use crate::core::{Card, CardSet};

/// The 52-card deck in a fixed, deterministic order.
///
/// Enumeration results must be reproducible run to run, so the deck is
/// always materialized in card-index order rather than shuffled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deck;

impl Deck {
    /// Every card, in index order.
    pub fn all() -> Vec<Card> {
        (0..52).map(Card::from_index).collect()
    }

    /// All cards not present in `known`, in index order.
    pub fn remaining(known: CardSet) -> Vec<Card> {
        (CardSet::full() ^ known).into_iter().collect()
    }
}

/// Iterator over all k-card combinations of a card slice.
///
/// Yields each combination as a [`CardSet`]. A zero-card request yields
/// exactly one empty combination, which lets river run-out enumeration
/// fall through without a special case.
#[derive(Debug)]
pub struct CardCombos<'a> {
    cards: &'a [Card],
    idx: Vec<usize>,
    k: usize,
    started: bool,
    done: bool,
}

impl CardCombos<'_> {
    pub fn new(cards: &[Card], k: usize) -> CardCombos<'_> {
        CardCombos {
            cards,
            idx: (0..k).collect(),
            k,
            started: false,
            done: k > cards.len(),
        }
    }

    fn current(&self) -> CardSet {
        self.idx.iter().map(|&i| self.cards[i]).collect()
    }

    /// Advance to the next index combination. Returns false when exhausted.
    fn advance(&mut self) -> bool {
        let n = self.cards.len();
        let mut i = self.k;
        loop {
            if i == 0 {
                return false;
            }
            i -= 1;
            // The i-th index can go up to n - k + i.
            if self.idx[i] < n - self.k + i {
                self.idx[i] += 1;
                for j in (i + 1)..self.k {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
                return true;
            }
        }
    }
}

impl Iterator for CardCombos<'_> {
    type Item = CardSet;

    fn next(&mut self) -> Option<CardSet> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }
        if self.k == 0 || !self.advance() {
            self.done = true;
            return None;
        }
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cards_from_str;

    #[test]
    fn test_deck_has_52_unique() {
        let all = Deck::all();
        assert_eq!(52, all.len());
        let set: CardSet = all.iter().copied().collect();
        assert_eq!(52, set.count());
    }

    #[test]
    fn test_remaining_excludes_known() {
        let known: CardSet = cards_from_str("AsKd7c").unwrap().into_iter().collect();
        let rest = Deck::remaining(known);
        assert_eq!(49, rest.len());
        for card in cards_from_str("AsKd7c").unwrap() {
            assert!(!rest.contains(&card));
        }
    }

    #[test]
    fn test_combo_counts() {
        let cards = cards_from_str("2c3c4c5c6c").unwrap();
        assert_eq!(10, CardCombos::new(&cards, 2).count());
        assert_eq!(10, CardCombos::new(&cards, 3).count());
        assert_eq!(1, CardCombos::new(&cards, 5).count());
        assert_eq!(0, CardCombos::new(&cards, 6).count());
    }

    #[test]
    fn test_zero_card_combo_yields_one_empty() {
        let cards = cards_from_str("2c3c").unwrap();
        let combos: Vec<CardSet> = CardCombos::new(&cards, 0).collect();
        assert_eq!(1, combos.len());
        assert!(combos[0].is_empty());
    }

    #[test]
    fn test_combos_are_distinct_pairs() {
        let cards = cards_from_str("2c3c4c5c").unwrap();
        let combos: Vec<CardSet> = CardCombos::new(&cards, 2).collect();
        assert_eq!(6, combos.len());
        for combo in &combos {
            assert_eq!(2, combo.count());
        }
        for (i, a) in combos.iter().enumerate() {
            for b in combos.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_full_deck_pair_count() {
        let all = Deck::all();
        // C(52, 2)
        assert_eq!(1326, CardCombos::new(&all, 2).count());
    }
}
