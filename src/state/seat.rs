use crate::state::errors::SetupError;

/// One of the six fixed table roles in a 6-max game.
///
/// The enum declaration order is pre-flop acting order (lojack first).
/// Post-flop the blinds act first; [`Seat::postflop_rank`] gives that
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Seat {
    Lojack = 0,
    Hijack = 1,
    Cutoff = 2,
    Button = 3,
    SmallBlind = 4,
    BigBlind = 5,
}

impl Seat {
    /// Acting order before the flop.
    pub const PREFLOP_ORDER: [Seat; 6] = [
        Seat::Lojack,
        Seat::Hijack,
        Seat::Cutoff,
        Seat::Button,
        Seat::SmallBlind,
        Seat::BigBlind,
    ];

    /// Acting order on the flop and later, blinds first.
    pub const POSTFLOP_ORDER: [Seat; 6] = [
        Seat::SmallBlind,
        Seat::BigBlind,
        Seat::Lojack,
        Seat::Hijack,
        Seat::Cutoff,
        Seat::Button,
    ];

    /// Position in the pre-flop acting order.
    pub fn preflop_rank(self) -> usize {
        self as usize
    }

    /// Position in the post-flop acting order.
    pub fn postflop_rank(self) -> usize {
        (self as usize + 2) % 6
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Seat::Lojack => "LJ",
            Seat::Hijack => "HJ",
            Seat::Cutoff => "CO",
            Seat::Button => "BU",
            Seat::SmallBlind => "SB",
            Seat::BigBlind => "BB",
        }
    }
}

/// Bijection between the six seats and player numbers.
///
/// Player 0 is always the tracked player (hero); players 1-5 are
/// opponents identified only by where they sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatMap {
    /// Seat for each player number.
    to_seat: [Seat; 6],
    /// Player number for each seat index.
    to_player: [usize; 6],
}

impl SeatMap {
    /// Build from a player-number-indexed seat assignment, validating
    /// that every seat appears exactly once.
    pub fn new(to_seat: [Seat; 6]) -> Result<SeatMap, SetupError> {
        let mut to_player = [usize::MAX; 6];
        for (player, seat) in to_seat.iter().enumerate() {
            let idx = *seat as usize;
            if to_player[idx] != usize::MAX {
                return Err(SetupError::BadSeatAssignment);
            }
            to_player[idx] = player;
        }
        Ok(SeatMap { to_seat, to_player })
    }

    /// Assign seats from the observed button location. Player numbers
    /// increase clockwise, so the small blind is the next player after
    /// the button.
    pub fn from_button(button_player: usize) -> Result<SeatMap, SetupError> {
        if button_player >= 6 {
            return Err(SetupError::NoButton);
        }
        let clockwise = [
            Seat::Button,
            Seat::SmallBlind,
            Seat::BigBlind,
            Seat::Lojack,
            Seat::Hijack,
            Seat::Cutoff,
        ];
        let mut to_seat = [Seat::Lojack; 6];
        for (offset, seat) in clockwise.iter().enumerate() {
            to_seat[(button_player + offset) % 6] = *seat;
        }
        SeatMap::new(to_seat)
    }

    pub fn seat(&self, player: usize) -> Seat {
        self.to_seat[player]
    }

    pub fn player(&self, seat: Seat) -> usize {
        self.to_player[seat as usize]
    }
}

/// A small bitset of player numbers still in the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSet(u8);

impl PlayerSet {
    pub fn empty() -> PlayerSet {
        PlayerSet(0)
    }

    /// All six players.
    pub fn full() -> PlayerSet {
        PlayerSet(0b11_1111)
    }

    pub fn insert(&mut self, player: usize) {
        self.0 |= 1 << player;
    }

    pub fn remove(&mut self, player: usize) {
        self.0 &= !(1 << player);
    }

    pub fn contains(&self, player: usize) -> bool {
        self.0 & (1 << player) != 0
    }

    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Is `other` a subset of this set? Players can only ever leave a
    /// hand, so each new observation must satisfy this against the last.
    pub fn contains_all(&self, other: PlayerSet) -> bool {
        other.0 & !self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let bits = self.0;
        (0..6).filter(move |p| bits & (1 << p) != 0)
    }
}

impl FromIterator<usize> for PlayerSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> PlayerSet {
        let mut set = PlayerSet::empty();
        for p in iter {
            set.insert(p);
        }
        set
    }
}
