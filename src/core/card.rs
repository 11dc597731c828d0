use core::fmt;
use std::fmt::Display;

use thiserror::Error;

/// Errors from parsing cards out of strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("unknown card value char: {0}")]
    UnknownValue(char),
    #[error("unknown card suit char: {0}")]
    UnknownSuit(char),
    #[error("card string has wrong length: {0}")]
    BadLength(String),
}

/// The suit of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Suit {
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    /// All four suits in index order.
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    pub fn to_char(self) -> char {
        match self {
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Heart => 'h',
            Suit::Spade => 's',
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c {
            'c' => Some(Suit::Club),
            'd' => Some(Suit::Diamond),
            'h' => Some(Suit::Heart),
            's' => Some(Suit::Spade),
            _ => None,
        }
    }
}

/// The value (rank) of a card. `Two` is lowest, `Ace` is highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Value {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Value {
    /// All thirteen values, lowest first.
    pub const ALL: [Value; 13] = [
        Value::Two,
        Value::Three,
        Value::Four,
        Value::Five,
        Value::Six,
        Value::Seven,
        Value::Eight,
        Value::Nine,
        Value::Ten,
        Value::Jack,
        Value::Queen,
        Value::King,
        Value::Ace,
    ];

    pub fn to_char(self) -> char {
        match self {
            Value::Two => '2',
            Value::Three => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
            Value::Ace => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Value> {
        match c {
            '2' => Some(Value::Two),
            '3' => Some(Value::Three),
            '4' => Some(Value::Four),
            '5' => Some(Value::Five),
            '6' => Some(Value::Six),
            '7' => Some(Value::Seven),
            '8' => Some(Value::Eight),
            '9' => Some(Value::Nine),
            'T' => Some(Value::Ten),
            'J' => Some(Value::Jack),
            'Q' => Some(Value::Queen),
            'K' => Some(Value::King),
            'A' => Some(Value::Ace),
            _ => None,
        }
    }

    fn from_u8(v: u8) -> Value {
        Value::ALL[v as usize]
    }
}

/// A single playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    pub fn new(value: Value, suit: Suit) -> Card {
        Card { value, suit }
    }

    /// Dense index in `[0, 52)`. Suit-major so that all clubs come first.
    pub fn index(self) -> usize {
        (self.suit as usize) * 13 + (self.value as usize)
    }

    /// Inverse of [`Card::index`].
    pub fn from_index(idx: usize) -> Card {
        debug_assert!(idx < 52);
        Card {
            value: Value::from_u8((idx % 13) as u8),
            suit: Suit::ALL[idx / 13],
        }
    }

    /// Parse a two-char card string like `"As"` or `"Td"`.
    pub fn try_from_str(s: &str) -> Result<Card, CardParseError> {
        let mut chars = s.chars();
        let (v, su) = match (chars.next(), chars.next(), chars.next()) {
            (Some(v), Some(s), None) => (v, s),
            _ => return Err(CardParseError::BadLength(s.to_string())),
        };
        let value = Value::from_char(v).ok_or(CardParseError::UnknownValue(v))?;
        let suit = Suit::from_char(su).ok_or(CardParseError::UnknownSuit(su))?;
        Ok(Card { value, suit })
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

/// Parse a concatenated card string like `"AsKd"` into cards.
pub fn cards_from_str(s: &str) -> Result<Vec<Card>, CardParseError> {
    if s.len() % 2 != 0 {
        return Err(CardParseError::BadLength(s.to_string()));
    }
    s.as_bytes()
        .chunks(2)
        .map(|pair| Card::try_from_str(std::str::from_utf8(pair).unwrap_or("")))
        .collect()
}
