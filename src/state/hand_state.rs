use approx::abs_diff_eq;

use crate::core::Card;
use crate::state::action::{Action, ActionKind, ActionRecord};
use crate::state::seat::{PlayerSet, Seat, SeatMap};
use crate::state::street::Street;

/// Tolerance for comparing chip amounts read off noisy observations.
pub(crate) const CHIP_EPSILON: f32 = 0.005;

/// Round to two decimals, the precision the table renders chips at.
pub(crate) fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

/// The most recent voluntary wager on the current street.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wager {
    pub player: usize,
    pub amount: f32,
}

/// The authoritative model of one betting hand, from the moment hero's
/// hole cards are first observed until they disappear.
///
/// All per-seat quantities are stored as arrays indexed by [`Seat`];
/// the seat set is statically bounded so there is nothing to key a map
/// with. Mutation happens exclusively through the
/// [`StateTracker`](crate::state::StateTracker); the decision policy
/// and any solver collaborators read it by shared reference and copy
/// whatever they want to mutate hypothetically.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandState {
    pub hole: [Card; 2],
    /// Cumulative community cards.
    pub board: Vec<Card>,
    pub street: Street,
    /// Running pot before any rake is taken.
    pub unraked_pot: f32,
    /// Pot figure the table currently displays (raked). Read for
    /// consistency checks only.
    pub raked_pot: Option<f32>,
    pub seats: SeatMap,
    /// Players that have not folded.
    pub players: PlayerSet,
    /// Chips committed on the current street, by seat.
    street_invested: [f32; 6],
    /// Chips committed over the whole hand, by seat.
    total_invested: [f32; 6],
    /// Bet/raise counts by seat, seeded at one for the aggression ratio.
    raise_count: [u32; 6],
    /// Check/call counts by seat, seeded at one.
    passive_count: [u32; 6],
    /// Action lines per street.
    pub lines: [Vec<ActionRecord>; 4],
    /// Last voluntary wager this street; None once a street rolls over.
    pub last_wager: Option<Wager>,
    /// Last player to bet or raise, persisting across streets.
    pub last_aggressor: Option<usize>,
    /// Bets and raises on the current street.
    pub street_aggression: u32,
    pub preflop_raises: u32,
    /// Total actions recorded this hand. Used to suppress duplicate
    /// decision points for the same node.
    pub action_count: u32,
    /// Whether the flop was seen with exactly two players.
    pub saw_flop_heads_up: bool,
    /// Minimum of (stack + total investment) over both players when
    /// heads up; None until it can be read.
    pub effective_stack: Option<f32>,
    /// Current stacks by player number. Defaults to 100bb until read.
    pub stacks: [f32; 6],
}

impl HandState {
    /// A fresh hand. Blinds are seeded at 0.5 and 1.0 and the big
    /// blind's forced post stands as the wager to beat.
    pub fn new(hole: [Card; 2], seats: SeatMap) -> HandState {
        let bb = seats.player(Seat::BigBlind);

        let mut street_invested = [0.0; 6];
        street_invested[Seat::SmallBlind as usize] = 0.5;
        street_invested[Seat::BigBlind as usize] = 1.0;

        HandState {
            hole,
            board: Vec::new(),
            street: Street::Preflop,
            unraked_pot: 1.5,
            raked_pot: None,
            seats,
            players: PlayerSet::full(),
            total_invested: street_invested,
            street_invested,
            raise_count: [1; 6],
            passive_count: [1; 6],
            lines: Default::default(),
            last_wager: Some(Wager {
                player: bb,
                amount: 1.0,
            }),
            last_aggressor: None,
            street_aggression: 0,
            preflop_raises: 0,
            action_count: 0,
            saw_flop_heads_up: false,
            effective_stack: None,
            stacks: [100.0; 6],
        }
    }

    pub fn invested_this_street(&self, player: usize) -> f32 {
        self.street_invested[self.seats.seat(player) as usize]
    }

    pub fn invested_total(&self, player: usize) -> f32 {
        self.total_invested[self.seats.seat(player) as usize]
    }

    /// Sum of chips every player would need to even the street out, on
    /// top of the current pot. Used by missed-action reconciliation.
    pub fn sum_street_invested(&self, players: impl Iterator<Item = usize>) -> f32 {
        players.map(|p| self.invested_this_street(p)).sum()
    }

    /// Ratio of aggressive to passive actions for a seat.
    pub fn aggression_factor(&self, seat: Seat) -> f32 {
        self.raise_count[seat as usize] as f32 / self.passive_count[seat as usize] as f32
    }

    pub fn num_opponents(&self) -> usize {
        self.players.count().saturating_sub(1)
    }

    /// Amount hero (or any player) must add to continue, capped by
    /// their stack.
    pub fn amount_to_call(&self, player: usize) -> f32 {
        let owed = self
            .last_wager
            .map(|w| w.amount - self.invested_this_street(player))
            .unwrap_or(0.0)
            .max(0.0);
        owed.min(self.stacks[player])
    }

    pub fn line(&self, street: Street) -> &[ActionRecord] {
        &self.lines[street as usize]
    }

    /// Has this seat any recorded action on the current street?
    pub fn has_acted_this_street(&self, seat: Seat) -> bool {
        self.line(self.street).iter().any(|r| r.seat == seat)
    }

    /// Append an action for `player` and update every derived field:
    /// pot, per-seat investment, aggression counts, last wager and
    /// aggressor. `wager` is the player's total street commitment after
    /// the action (ignored for folds and checks).
    pub fn add_action(&mut self, player: usize, kind: ActionKind, wager: f32) {
        let seat = self.seats.seat(player);
        let idx = seat as usize;
        let prior_wager = self.last_wager.map(|w| w.amount);

        let action = match kind {
            ActionKind::Fold => Action::Fold,
            ActionKind::Check => Action::Check,
            ActionKind::Call => Action::Call { wager },
            ActionKind::Bet => Action::Bet {
                wager,
                pct_pot: wager / self.unraked_pot,
            },
            ActionKind::Raise => {
                let prior = prior_wager.unwrap_or(0.0);
                let pot_after_call =
                    self.unraked_pot + (prior - self.street_invested[idx]);
                Action::Raise {
                    wager,
                    pct_pot: (wager - prior) / pot_after_call,
                    pot_after_call,
                    prior_wager: prior,
                }
            }
        };

        match kind {
            ActionKind::Call | ActionKind::Bet | ActionKind::Raise => {
                // The increment over what this seat already has in.
                let amount = wager - self.street_invested[idx];
                self.unraked_pot += amount;
                self.street_invested[idx] += amount;
                self.total_invested[idx] += amount;

                if kind == ActionKind::Call {
                    self.passive_count[idx] += 1;
                } else {
                    self.raise_count[idx] += 1;
                    self.street_aggression += 1;
                    self.last_aggressor = Some(player);
                    if self.street == Street::Preflop {
                        self.preflop_raises += 1;
                    }
                    self.last_wager = Some(Wager {
                        player,
                        amount: wager,
                    });
                }
            }
            ActionKind::Check => {
                self.passive_count[idx] += 1;
            }
            ActionKind::Fold => {}
        }

        self.lines[self.street as usize].push(ActionRecord { seat, action });
        self.action_count += 1;
    }

    /// Advance to a new street: street investments and the outstanding
    /// wager reset, the aggressor and totals persist.
    pub fn roll_street(&mut self, street: Street) {
        self.street = street;
        self.street_invested = [0.0; 6];
        self.last_wager = None;
        self.street_aggression = 0;
    }

    /// Does the running pot account for every recorded investment?
    pub fn pot_matches_investment(&self) -> bool {
        let total: f32 = self.total_invested.iter().sum();
        abs_diff_eq!(total, self.unraked_pot, epsilon = 0.01)
    }

    /// Compact rendering of the hand's action lines, for logging.
    pub fn line_string(&self) -> String {
        let mut parts = Vec::new();
        for street in Street::ALL {
            let line = self.line(street);
            if line.is_empty() {
                continue;
            }
            let codes: Vec<String> = line
                .iter()
                .map(|r| r.action.kind().code().to_string())
                .collect();
            parts.push(format!("{} {}", street, codes.join("-")));
        }
        parts.join(", ")
    }
}
