use crate::core::{Card, CardSet};

/// A totally ordered rank for a 5-7 card hand.
///
/// The hand class orders first; the inner `u32` breaks ties within a
/// class. Two hands compare equal exactly when they would chop. The
/// decision engine treats the value as an opaque total order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum Rank {
    HighCard(u32),
    OnePair(u32),
    TwoPair(u32),
    ThreeOfAKind(u32),
    Straight(u32),
    Flush(u32),
    FullHouse(u32),
    FourOfAKind(u32),
    StraightFlush(u32),
}

/// Bit mask for the wheel (Ace, two, three, four, five).
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Find a straight inside a value bitset and return its rank.
/// Wheel is the lowest (0), broadway the highest.
fn rank_straight(value_set: u32) -> Option<u32> {
    // Five consecutive set bits survive the shift-and chain.
    let left =
        value_set & (value_set << 1) & (value_set << 2) & (value_set << 3) & (value_set << 4);
    let idx = left.leading_zeros();
    if idx < 32 {
        Some(32 - 4 - idx)
    } else if value_set & WHEEL == WHEEL {
        Some(0)
    } else {
        None
    }
}

/// Keep only the most significant bit.
fn keep_highest(rank: u32) -> u32 {
    1 << (32 - rank.leading_zeros() - 1)
}

/// Keep the N most significant bits by clearing low ones.
fn keep_n(rank: u32, to_keep: u32) -> u32 {
    let mut result = rank;
    while result.count_ones() > to_keep {
        result &= result - 1;
    }
    result
}

fn find_flush(suit_value_sets: &[u32; 4]) -> Option<usize> {
    suit_value_sets.iter().position(|sv| sv.count_ones() >= 5)
}

/// Anything that can be collapsed to its best five-card hand.
pub trait Rankable {
    fn cards(&self) -> impl Iterator<Item = Card>;

    /// Rank the cards, finding the best five-card hand among them.
    /// Works on 5 to 7 cards.
    fn rank(&self) -> Rank {
        let mut value_to_count: [u8; 13] = [0; 13];
        let mut count_to_value: [u32; 5] = [0; 5];
        let mut suit_value_sets: [u32; 4] = [0; 4];
        let mut value_set: u32 = 0;

        for c in self.cards() {
            let v = c.value as u8;
            let s = c.suit as u8;
            value_set |= 1 << v;
            value_to_count[v as usize] += 1;
            suit_value_sets[s as usize] |= 1 << v;
        }

        for (value, &count) in value_to_count.iter().enumerate() {
            count_to_value[count as usize] |= 1 << value;
        }

        // With at most 7 cards, a flush rules out quads and boats,
        // so the flush branch can return early.
        if let Some(flush_idx) = find_flush(&suit_value_sets) {
            if let Some(rank) = rank_straight(suit_value_sets[flush_idx]) {
                Rank::StraightFlush(rank)
            } else {
                Rank::Flush(keep_n(suit_value_sets[flush_idx], 5))
            }
        } else if count_to_value[4] != 0 {
            let high = keep_highest(value_set ^ count_to_value[4]);
            Rank::FourOfAKind((count_to_value[4] << 13) | high)
        } else if count_to_value[3] != 0 && count_to_value[3].count_ones() == 2 {
            // Two sets make a boat with the higher set on top.
            let set = keep_highest(count_to_value[3]);
            let pair = count_to_value[3] ^ set;
            Rank::FullHouse((set << 13) | pair)
        } else if count_to_value[3] != 0 && count_to_value[2] != 0 {
            let set = count_to_value[3];
            let pair = keep_highest(count_to_value[2]);
            Rank::FullHouse((set << 13) | pair)
        } else if let Some(s_rank) = rank_straight(value_set) {
            Rank::Straight(s_rank)
        } else if count_to_value[3] != 0 {
            let low = keep_n(value_set ^ count_to_value[3], 2);
            Rank::ThreeOfAKind((count_to_value[3] << 13) | low)
        } else if count_to_value[2].count_ones() >= 2 {
            let pairs = keep_n(count_to_value[2], 2);
            let low = keep_highest(value_set ^ pairs);
            Rank::TwoPair((pairs << 13) | low)
        } else if count_to_value[2] == 0 {
            Rank::HighCard(keep_n(value_set, 5))
        } else {
            let pair = count_to_value[2];
            let low = keep_n(value_set ^ pair, 3);
            Rank::OnePair((pair << 13) | low)
        }
    }
}

impl Rankable for Vec<Card> {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for [Card] {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for &[Card] {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for CardSet {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cards_from_str;

    fn rank_of(s: &str) -> Rank {
        cards_from_str(s).unwrap().rank()
    }

    #[test]
    fn test_class_ordering() {
        assert!(Rank::HighCard(u32::MAX) < Rank::OnePair(0));
        assert!(Rank::OnePair(u32::MAX) < Rank::TwoPair(0));
        assert!(Rank::Flush(u32::MAX) < Rank::FullHouse(0));
        assert!(Rank::FourOfAKind(u32::MAX) < Rank::StraightFlush(0));
    }

    #[test]
    fn test_high_card() {
        assert!(matches!(rank_of("Ad8h9cTc5c"), Rank::HighCard(_)));
    }

    #[test]
    fn test_one_pair_beats_lower_pair() {
        assert!(rank_of("AsAhKdQcJs") > rank_of("KsKhAdQcJs"));
    }

    #[test]
    fn test_two_pair_kicker() {
        assert!(rank_of("AsAhKdKcQs") > rank_of("AsAhKdKcJs"));
    }

    #[test]
    fn test_straight_and_wheel() {
        assert_eq!(Rank::Straight(0), rank_of("Ad2c3s4h5s"));
        assert_eq!(Rank::Straight(1), rank_of("2c3s4h5s6d"));
        assert!(rank_of("2c3s4h5s6d") > rank_of("Ad2c3s4h5s"));
    }

    #[test]
    fn test_flush_over_straight() {
        assert!(rank_of("Ad8d9dTd5d") > rank_of("2c3s4h5s6d"));
    }

    #[test]
    fn test_full_house_uses_higher_set() {
        // Two sets in seven cards: the eights play on top.
        let boat = rank_of("As2h2d2c8d8s8c");
        let Rank::FullHouse(bits) = boat else {
            panic!("expected full house, got {:?}", boat);
        };
        assert!((bits >> 13) & (1 << 6) != 0, "eights should be the set");
    }

    #[test]
    fn test_seven_card_best_five() {
        // Straight flush hiding in seven cards.
        assert_eq!(Rank::StraightFlush(9), rank_of("AdKdQdJdTd9d8d"));
        // Wheel straight flush beats an offsuit six-high straight.
        assert_eq!(Rank::StraightFlush(0), rank_of("2d3d4d5d6h7cAd"));
    }

    #[test]
    fn test_quads_kicker() {
        assert!(rank_of("2s2h2d2cKd9h4s") > rank_of("2s2h2d2cQd9h4s"));
    }

    #[test]
    fn test_identical_hands_tie() {
        assert_eq!(rank_of("AsKdQh7c2s"), rank_of("AdKhQs7d2c"));
    }

    #[test]
    fn test_cardset_ranks_like_vec() {
        let cards = cards_from_str("AsAhKdKcQs").unwrap();
        let set: CardSet = cards.iter().copied().collect();
        assert_eq!(cards.rank(), set.rank());
    }
}
