use tracing::{debug, trace, warn};

use crate::core::{Card, CardSet};
use crate::state::action::ActionKind;
use crate::state::errors::{
    InvalidObservationError, ReconciliationAmbiguity, SetupError, TrackError,
};
use crate::state::hand_state::{round2, HandState, CHIP_EPSILON};
use crate::state::seat::{Seat, SeatMap};
use crate::state::snapshot::TableSnapshot;
use crate::state::street::Street;

/// Rake fraction taken from every pot.
pub const RAKE: f32 = 0.05;
/// Rake ceiling in big blinds.
pub const RAKE_CAP: f32 = 15.0;

/// Largest unraked pot consistent with a displayed (raked) figure.
/// Either the cap bound or the fractional bound, whichever is tighter.
pub fn estimated_unraked(raked: f32) -> f32 {
    (raked + RAKE_CAP).min(raked / (1.0 - RAKE))
}

fn amounts_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < CHIP_EPSILON
}

/// Rebuilds the action history of a hand from periodic table snapshots.
///
/// The table is only sampled every few seconds, so between two polls
/// several players can act, streets can roll over, and the terminal
/// action of a street is never directly observable. The tracker closes
/// those gaps in two phases per observation: rake reconciliation at a
/// street boundary, then an incremental walk from the previously
/// active player in acting order.
#[derive(Debug, Clone, Default)]
pub struct StateTracker {
    hand: Option<HandState>,
    /// Active player at the previous poll.
    last_active: Option<usize>,
    /// Displayed pot at the previous poll.
    last_pot: Option<f32>,
    last_street: Street,
}

impl StateTracker {
    pub fn new() -> StateTracker {
        StateTracker::default()
    }

    /// The hand currently being tracked, if any.
    pub fn hand(&self) -> Option<&HandState> {
        self.hand.as_ref()
    }

    /// Discard any tracked hand and start fresh from hero's newly
    /// dealt hole cards.
    pub fn initialize_hand(&mut self, hole: [Card; 2], seats: SeatMap) -> Result<(), SetupError> {
        debug!(hole = %format!("{}{}", hole[0], hole[1]), "new hand");
        self.hand = Some(HandState::new(hole, seats));
        // First to act pre-flop; corrected by the first walk anyway.
        self.last_active = Some(seats.player(Seat::Lojack));
        self.last_pot = None;
        self.last_street = Street::Preflop;
        Ok(())
    }

    /// Fold one snapshot into the tracked state. The only mutating
    /// entry point. Errors leave the hand untracked; the next snapshot
    /// carrying hero's cards re-initializes.
    pub fn apply_observation(&mut self, snap: &TableSnapshot) -> Result<(), TrackError> {
        // Hero out of the hand: nothing to track.
        let Some(hole) = snap.hole else {
            return Ok(());
        };

        if self.hand.as_ref().map(|h| h.hole) != Some(hole) {
            // New hole cards mean a new hand. Without a button read we
            // cannot seat anyone yet; wait for the next poll.
            let Some(button) = snap.button else {
                return Ok(());
            };
            self.initialize_hand(hole, SeatMap::from_button(button)?)?;
        }

        match self.track(snap) {
            Ok(()) => Ok(()),
            Err(e) => {
                // A hand the tracker cannot trust is worse than no
                // hand at all.
                warn!(error = %e, "dropping tracked hand");
                self.hand = None;
                Err(e)
            }
        }
    }

    fn track(&mut self, snap: &TableSnapshot) -> Result<(), TrackError> {
        let Some(active) = snap.active_player else {
            return Ok(());
        };
        let last_active = self.last_active;
        let Some(hand) = self.hand.as_mut() else {
            return Ok(());
        };

        Self::validate_cards(hand, snap)?;
        if !hand.players.contains_all(snap.players) {
            let player = snap
                .players
                .iter()
                .find(|&p| !hand.players.contains(p))
                .unwrap_or_default();
            return Err(InvalidObservationError::FoldedPlayerReturned { player }.into());
        }
        if !snap.board.starts_with(&hand.board) {
            return Err(InvalidObservationError::BoardRegressed.into());
        }
        let street = snap.street()?;

        let mut to_check = Self::players_to_check(hand, last_active, false);
        trace!(?to_check, %street, "walk order");

        let rolled = street != hand.street;
        if rolled {
            Self::reconcile_street(hand, last_active, snap, &to_check)?;
            hand.roll_street(street);
            if street == Street::Flop && snap.players.count() == 2 {
                hand.saw_flop_heads_up = true;
            }
        }
        hand.board = snap.board.clone();
        hand.players = snap.players;
        if rolled {
            to_check = Self::players_to_check(hand, last_active, true);
            trace!(?to_check, "walk order at street start");
        }
        hand.raked_pot = snap.pot;

        // Hero acted and a villain got a snap decision in on the same
        // street before this poll: the marker points at the same
        // player but the pot moved, so keep walking past them.
        let snap_decision = Some(active) == last_active
            && street == self.last_street
            && snap.pot != self.last_pot;

        for pn in to_check {
            if pn == active && !snap_decision {
                break;
            }

            if !hand.players.contains(pn) {
                hand.add_action(pn, ActionKind::Fold, 0.0);
                continue;
            }

            let last_wager = hand.last_wager;
            let Some(wager) = snap.wagers[pn] else {
                if hand.invested_this_street(pn) > 0.0 {
                    return Err(InvalidObservationError::UnreadableWager { player: pn }.into());
                }
                if last_wager.is_none() {
                    hand.add_action(pn, ActionKind::Check, 0.0);
                    continue;
                }
                // Facing a wager with no chips out: has not acted yet.
                break;
            };

            match last_wager {
                Some(lw) => {
                    // Sub-blind reads are posting artifacts, and the
                    // standing wager belongs to whoever made it.
                    if wager < 1.0 || (pn == lw.player && amounts_eq(wager, lw.amount)) {
                        break;
                    }
                    if wager < lw.amount - CHIP_EPSILON {
                        return Err(InvalidObservationError::DecreasingWager {
                            player: pn,
                            prior: lw.amount,
                            observed: wager,
                        }
                        .into());
                    }
                    if amounts_eq(wager, lw.amount) {
                        hand.add_action(pn, ActionKind::Call, wager);
                    } else {
                        hand.add_action(pn, ActionKind::Raise, wager);
                    }
                }
                None => {
                    if wager < 1.0 {
                        break;
                    }
                    hand.add_action(pn, ActionKind::Bet, wager);
                }
            }
        }

        Self::update_effective_stack(hand, snap);

        self.last_active = Some(active);
        self.last_pot = snap.pot;
        self.last_street = street;
        Ok(())
    }

    /// Close out the street that just ended. The displayed pot of the
    /// completed street, net of rake, bounds how many chips went in
    /// unseen; checks, folds, calls and at most one hero bet or raise
    /// are inferred to make the books balance.
    fn reconcile_street(
        hand: &mut HandState,
        last_active: Option<usize>,
        snap: &TableSnapshot,
        to_check: &[usize],
    ) -> Result<(), TrackError> {
        let raked = snap
            .prior_street_pot
            .ok_or(InvalidObservationError::MissingStreetPot)?;

        // Pot already accounts for the displayed figure: anyone left
        // to act checked or folded.
        if hand.unraked_pot >= raked {
            for &pn in to_check {
                if snap.players.contains(pn) {
                    if !hand.has_acted_this_street(hand.seats.seat(pn)) {
                        hand.add_action(pn, ActionKind::Check, 0.0);
                    }
                } else {
                    hand.add_action(pn, ActionKind::Fold, 0.0);
                }
            }
            return Ok(());
        }

        let mut remaining = Vec::new();
        let mut actions: [Option<(ActionKind, f32)>; 6] = [None; 6];
        for &pn in to_check {
            if snap.players.contains(pn) {
                remaining.push(pn);
            } else {
                actions[pn] = Some((ActionKind::Fold, 0.0));
            }
        }
        if remaining.is_empty() {
            return Err(ReconciliationAmbiguity::NoRemainingPlayers {
                deficit: raked - hand.unraked_pot,
            }
            .into());
        }

        // Can the deficit be closed by everyone still in calling the
        // recorded wager?
        let mut total = hand.unraked_pot;
        if let Some(lw) = hand.last_wager {
            for &pn in &remaining {
                total += lw.amount - hand.invested_this_street(pn);
            }
        }

        if total >= raked {
            let lw = hand.last_wager.map(|w| w.amount).unwrap_or(0.0);
            for &pn in &remaining {
                if amounts_eq(hand.invested_this_street(pn), lw) {
                    break;
                }
                actions[pn] = Some((ActionKind::Call, lw));
            }
        } else {
            // Only hero can have raised unseen: any villain aggression
            // would have put hero back on the clock. One hero bet or
            // raise then villain calls is the most that fits.
            let front = remaining[0];
            if last_active != Some(front) || to_check.first() != Some(&front) || front != 0 {
                return Err(ReconciliationAmbiguity::UnexpectedFrontRunner { front }.into());
            }

            let est = estimated_unraked(raked);
            let inv_st = hand.sum_street_invested(remaining.iter().copied());
            let wager = round2((est - hand.unraked_pot + inv_st) / remaining.len() as f32);
            debug!(est, wager, "inferring unseen aggression at street close");

            let kind = if hand.last_wager.is_none() {
                ActionKind::Bet
            } else {
                ActionKind::Raise
            };
            actions[front] = Some((kind, wager));
            for &pn in &remaining[1..] {
                actions[pn] = Some((ActionKind::Call, wager));
            }
        }

        // Replay in acting order so the pot arithmetic stays sound.
        for &pn in to_check {
            if let Some((kind, wager)) = actions[pn] {
                hand.add_action(pn, kind, wager);
            }
        }
        Ok(())
    }

    /// Live players in acting order for the current street, rotated so
    /// the first entry is the next player whose action could have been
    /// missed.
    fn players_to_check(hand: &HandState, last_active: Option<usize>, begin_street: bool) -> Vec<usize> {
        let order: &[Seat; 6] = if hand.street == Street::Preflop {
            &Seat::PREFLOP_ORDER
        } else {
            &Seat::POSTFLOP_ORDER
        };

        let mut players: Vec<usize> = order
            .iter()
            .map(|&s| hand.seats.player(s))
            .filter(|&p| hand.players.contains(p))
            .collect();
        if begin_street || players.is_empty() {
            return players;
        }

        // Clockwise around the table, matching player numbering.
        let next_live = |pn: usize| -> Option<usize> {
            (1..6)
                .map(|i| (pn + i) % 6)
                .find(|&p| hand.players.contains(p))
        };

        let anchor = if hand.line(hand.street).is_empty() {
            let first = hand.seats.player(order[0]);
            if hand.players.contains(first) {
                Some(first)
            } else {
                next_live(first)
            }
        } else {
            match last_active {
                Some(p) if hand.players.contains(p) => Some(p),
                Some(p) => next_live(p),
                None => None,
            }
        };

        if let Some(anchor) = anchor {
            if let Some(idx) = players.iter().position(|&p| p == anchor) {
                players.rotate_left(idx);
            }
        }
        players
    }

    fn validate_cards(hand: &HandState, snap: &TableSnapshot) -> Result<(), InvalidObservationError> {
        let mut seen = CardSet::new();
        for card in hand.hole.iter().chain(snap.board.iter()) {
            if seen.contains(*card) {
                return Err(InvalidObservationError::DuplicateCard(*card));
            }
            seen.insert(*card);
        }
        Ok(())
    }

    fn update_effective_stack(hand: &mut HandState, snap: &TableSnapshot) {
        for (pn, stack) in snap.stacks.iter().enumerate() {
            if let Some(s) = stack {
                hand.stacks[pn] = *s;
            }
        }
        if hand.players.count() == 2 {
            let eff = hand
                .players
                .iter()
                .map(|p| hand.stacks[p] + hand.invested_total(p))
                .fold(f32::INFINITY, f32::min);
            hand.effective_stack = Some(eff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cards_from_str;
    use crate::state::action::Action;
    use crate::state::seat::PlayerSet;

    fn hole() -> [Card; 2] {
        let cards = cards_from_str("AsKd").unwrap();
        [cards[0], cards[1]]
    }

    /// Hero on the button: player 1 is SB, player 2 BB, player 3 LJ,
    /// player 4 HJ, player 5 CO.
    fn snapshot() -> TableSnapshot {
        TableSnapshot {
            hole: Some(hole()),
            button: Some(0),
            players: PlayerSet::full(),
            active_player: None,
            board: Vec::new(),
            pot: None,
            wagers: [None; 6],
            prior_street_pot: None,
            stacks: [None; 6],
        }
    }

    fn tracker_with_hand() -> StateTracker {
        let mut tracker = StateTracker::new();
        let mut snap = snapshot();
        snap.active_player = Some(3);
        tracker.apply_observation(&snap).unwrap();
        tracker
    }

    #[test_log::test]
    fn test_no_hole_cards_is_a_noop() {
        let mut tracker = StateTracker::new();
        let mut snap = snapshot();
        snap.hole = None;
        tracker.apply_observation(&snap).unwrap();
        assert!(tracker.hand().is_none());
    }

    #[test_log::test]
    fn test_new_cards_reinitialize() {
        let mut tracker = tracker_with_hand();
        let mut snap = snapshot();
        let cards = cards_from_str("7h7c").unwrap();
        snap.hole = Some([cards[0], cards[1]]);
        snap.active_player = Some(3);
        tracker.apply_observation(&snap).unwrap();
        assert_eq!([cards[0], cards[1]], tracker.hand().unwrap().hole);
        assert_eq!(1.5, tracker.hand().unwrap().unraked_pot);
    }

    #[test_log::test]
    fn test_walk_records_open_and_folds() {
        let mut tracker = tracker_with_hand();

        // LJ (3) folded, HJ (4) raised to 2.5, CO (5) thinking.
        let mut snap = snapshot();
        snap.players.remove(3);
        snap.active_player = Some(5);
        snap.wagers[4] = Some(2.5);
        tracker.apply_observation(&snap).unwrap();

        let hand = tracker.hand().unwrap();
        let line = hand.line(Street::Preflop);
        assert_eq!(2, line.len());
        assert_eq!(Action::Fold, line[0].action);
        assert!(matches!(line[1].action, Action::Raise { wager, .. } if wager == 2.5));
        assert_eq!(Some(2.5), hand.last_wager.map(|w| w.amount));
        assert!((hand.unraked_pot - 4.0).abs() < 1e-6);
        assert!(hand.pot_matches_investment());
    }

    #[test_log::test]
    fn test_identical_snapshot_adds_nothing() {
        let mut tracker = tracker_with_hand();
        let mut snap = snapshot();
        snap.players.remove(3);
        snap.active_player = Some(5);
        snap.wagers[4] = Some(2.5);
        tracker.apply_observation(&snap).unwrap();
        let count = tracker.hand().unwrap().action_count;

        tracker.apply_observation(&snap).unwrap();
        assert_eq!(count, tracker.hand().unwrap().action_count);
    }

    #[test_log::test]
    fn test_walk_stops_at_active_player() {
        let mut tracker = tracker_with_hand();
        // HJ (4) is now active; CO, BU, blinds have readable chips
        // from earlier streets of other hands that must not be
        // attributed past the marker.
        let mut snap = snapshot();
        snap.active_player = Some(4);
        snap.wagers[3] = Some(2.0);
        snap.wagers[5] = Some(6.0);
        tracker.apply_observation(&snap).unwrap();

        let line = tracker.hand().unwrap().line(Street::Preflop);
        assert_eq!(1, line.len());
        assert!(matches!(line[0].action, Action::Raise { wager, .. } if wager == 2.0));
    }

    /// Hero acted and the villain answered before the next poll: the
    /// marker points at hero again on an unchanged street but the pot
    /// moved, so the walk must keep going past the marker.
    #[test_log::test]
    fn test_moved_pot_walks_past_repeated_marker() {
        let mut tracker = tracker_with_hand();

        // Heads up vs BB, flop checked to hero.
        let mut snap = snapshot();
        for pn in [3, 4, 5, 1] {
            snap.players.remove(pn);
        }
        snap.active_player = Some(2);
        snap.wagers[0] = Some(2.5);
        snap.wagers[2] = Some(2.5);
        tracker.apply_observation(&snap).unwrap();

        let mut flop = snap.clone();
        flop.board = cards_from_str("Ah7d2c").unwrap();
        flop.wagers = [None; 6];
        flop.prior_street_pot = Some(5.5 * 0.95);
        flop.pot = Some(5.5 * 0.95);
        flop.active_player = Some(0);
        tracker.apply_observation(&flop).unwrap();

        // Hero bet 3.0, BB snap-raised to 9.0 and hero is back on the
        // clock: same marker, same street, bigger pot.
        let mut again = flop.clone();
        again.wagers[0] = Some(3.0);
        again.wagers[2] = Some(9.0);
        again.pot = Some(17.5 * 0.95);
        tracker.apply_observation(&again).unwrap();

        let hand = tracker.hand().unwrap();
        let flop_line = hand.line(Street::Flop);
        assert_eq!(3, flop_line.len());
        assert_eq!(Action::Check, flop_line[0].action);
        assert_eq!(Seat::Button, flop_line[1].seat);
        assert!(matches!(flop_line[1].action, Action::Bet { wager, .. } if wager == 3.0));
        assert!(matches!(flop_line[2].action, Action::Raise { wager, .. } if wager == 9.0));
        assert_eq!(Some(9.0), hand.last_wager.map(|w| w.amount));
        assert!(hand.pot_matches_investment());
    }

    #[test_log::test]
    fn test_decreasing_wager_is_an_error() {
        let mut tracker = tracker_with_hand();
        let mut snap = snapshot();
        snap.active_player = Some(4);
        snap.wagers[3] = Some(3.0);
        tracker.apply_observation(&snap).unwrap();

        // HJ shows fewer chips than the standing wager.
        snap.active_player = Some(5);
        snap.wagers[4] = Some(2.0);
        let err = tracker.apply_observation(&snap).unwrap_err();
        assert!(matches!(
            err,
            TrackError::InvalidObservation(InvalidObservationError::DecreasingWager { .. })
        ));
        assert!(tracker.hand().is_none());
    }

    /// A player with chips already committed this street shows no
    /// readable wager: nothing past them can be attributed.
    #[test_log::test]
    fn test_unreadable_wager_is_an_error() {
        let mut tracker = tracker_with_hand();

        // LJ opens 2.5, folds to the BB who is thinking.
        let mut snap = snapshot();
        for pn in [4, 5, 0, 1] {
            snap.players.remove(pn);
        }
        snap.active_player = Some(2);
        snap.wagers[3] = Some(2.5);
        tracker.apply_observation(&snap).unwrap();

        // BB acted and LJ is back on the clock, but the BB's chips are
        // occluded. Their blind is already in, so the walk cannot tell
        // a fold-revoking artifact from a real wager.
        snap.active_player = Some(3);
        let err = tracker.apply_observation(&snap).unwrap_err();
        assert!(matches!(
            err,
            TrackError::InvalidObservation(InvalidObservationError::UnreadableWager { player: 2 })
        ));
        assert!(tracker.hand().is_none());
    }

    /// A street closes with a deficit beyond what calls can cover, but
    /// the first player left to act is a villain. Villain aggression
    /// would have put hero back on the clock, so the books cannot be
    /// balanced.
    #[test_log::test]
    fn test_villain_front_runner_is_unresolvable() {
        let mut tracker = tracker_with_hand();

        // LJ opens 2.5, folds to the BB who is thinking.
        let mut snap = snapshot();
        for pn in [4, 5, 0, 1] {
            snap.players.remove(pn);
        }
        snap.active_player = Some(2);
        snap.wagers[3] = Some(2.5);
        tracker.apply_observation(&snap).unwrap();

        // Flop appears with a street pot far beyond a BB call.
        let mut flop = snap.clone();
        flop.board = cards_from_str("Ah7d2c").unwrap();
        flop.active_player = Some(3);
        flop.wagers = [None; 6];
        flop.prior_street_pot = Some(12.0 * 0.95);
        flop.pot = Some(12.0 * 0.95);
        let err = tracker.apply_observation(&flop).unwrap_err();
        assert!(matches!(
            err,
            TrackError::Reconciliation(ReconciliationAmbiguity::UnexpectedFrontRunner { front: 2 })
        ));
    }

    /// Street rolls over with a pot one unseen call short: the call is
    /// attributed to the player facing the wager.
    #[test_log::test]
    fn test_rollover_infers_missed_call() {
        let mut tracker = tracker_with_hand();

        // LJ raises to 2.5, all fold to BB who is thinking.
        let mut snap = snapshot();
        snap.players.remove(4);
        snap.players.remove(5);
        snap.players.remove(0);
        snap.players.remove(1);
        snap.active_player = Some(2);
        snap.wagers[3] = Some(2.5);
        tracker.apply_observation(&snap).unwrap();

        // Next poll the flop is out. BB's call was never observed,
        // and the displayed street pot (5.5 raked at 5%) confirms no
        // further raise.
        let mut flop = snap.clone();
        flop.board = cards_from_str("Ah7d2c").unwrap();
        flop.active_player = Some(2);
        flop.wagers = [None; 6];
        flop.prior_street_pot = Some(5.5 * 0.95);
        flop.pot = Some(5.5 * 0.95);
        tracker.apply_observation(&flop).unwrap();

        let hand = tracker.hand().unwrap();
        assert_eq!(Street::Flop, hand.street);
        // BB's unseen call closed the street.
        let pre = hand.line(Street::Preflop);
        assert!(matches!(
            pre.last().unwrap().action,
            Action::Call { wager } if wager == 2.5
        ));
        assert!((hand.unraked_pot - 5.5).abs() < 0.01);
        assert!(hand.pot_matches_investment());
        assert_eq!(None, hand.last_wager);
    }

    /// Scenario: turn card appears, prior street pot matches what was
    /// already recorded. Only checks are inferred, no phantom bets.
    #[test_log::test]
    fn test_rollover_checks_through() {
        let mut tracker = tracker_with_hand();

        // Heads up vs BB by the flop: LJ/HJ/CO/SB gone, BB called 2.5.
        let mut snap = snapshot();
        for pn in [3, 4, 5, 1] {
            snap.players.remove(pn);
        }
        snap.active_player = Some(2);
        snap.wagers[0] = Some(2.5);
        snap.wagers[2] = Some(2.5);
        tracker.apply_observation(&snap).unwrap();

        let mut flop = snap.clone();
        flop.board = cards_from_str("Ah7d2c").unwrap();
        flop.wagers = [None; 6];
        flop.prior_street_pot = Some(5.5 * 0.95);
        flop.pot = Some(5.5 * 0.95);
        tracker.apply_observation(&flop).unwrap();
        let pot = tracker.hand().unwrap().unraked_pot;

        // Turn appears; nobody bet the flop.
        let mut turn = flop.clone();
        turn.board = cards_from_str("Ah7d2c9s").unwrap();
        tracker.apply_observation(&turn).unwrap();

        let hand = tracker.hand().unwrap();
        assert_eq!(Street::Turn, hand.street);
        let flop_line = hand.line(Street::Flop);
        assert_eq!(2, flop_line.len());
        assert!(flop_line.iter().all(|r| r.action == Action::Check));
        assert_eq!(pot, hand.unraked_pot);
        assert!(hand.pot_matches_investment());
    }

    /// A pot deficit at rollover with nobody left in the hand to
    /// attribute it to is unresolvable.
    #[test_log::test]
    fn test_unresolvable_deficit() {
        let mut tracker = tracker_with_hand();

        let mut snap = snapshot();
        snap.players.remove(4);
        snap.players.remove(5);
        snap.active_player = Some(2);
        snap.wagers[3] = Some(2.5);
        tracker.apply_observation(&snap).unwrap();

        // Flop appears with everyone's cards gone (stale marker still
        // shows an active player), yet the street pot claims far more
        // chips went in than anyone left could have put there.
        let mut flop = snap.clone();
        flop.board = cards_from_str("Ah7d2c").unwrap();
        flop.players = PlayerSet::empty();
        flop.active_player = Some(3);
        flop.wagers = [None; 6];
        flop.prior_street_pot = Some(20.0);
        let err = tracker.apply_observation(&flop).unwrap_err();
        assert!(matches!(
            err,
            TrackError::Reconciliation(ReconciliationAmbiguity::NoRemainingPlayers { .. })
        ));
    }

    /// Hero bet the river after our last poll and a villain called;
    /// the rake bound recovers the sizing.
    #[test_log::test]
    fn test_rollover_infers_hero_aggression() {
        let mut tracker = tracker_with_hand();

        // Heads up, hero in position vs BB. Get to the flop.
        let mut snap = snapshot();
        for pn in [3, 4, 5, 1] {
            snap.players.remove(pn);
        }
        snap.active_player = Some(2);
        snap.wagers[0] = Some(2.5);
        snap.wagers[2] = Some(2.5);
        tracker.apply_observation(&snap).unwrap();

        let mut flop = snap.clone();
        flop.board = cards_from_str("Ah7d2c").unwrap();
        flop.wagers = [None; 6];
        flop.prior_street_pot = Some(5.5 * 0.95);
        flop.pot = Some(5.5 * 0.95);
        // BB checks, hero is on the clock.
        flop.active_player = Some(0);
        tracker.apply_observation(&flop).unwrap();

        // Next poll the turn is already out and the street pot grew:
        // hero bet unseen and BB called.
        let pre_pot = tracker.hand().unwrap().unraked_pot;
        let mut turn = flop.clone();
        turn.board = cards_from_str("Ah7d2c9s").unwrap();
        turn.active_player = Some(2);
        // Hero bet 2.75, BB called: unraked 11.0.
        let raked = 11.0 * 0.95;
        turn.prior_street_pot = Some(raked);
        turn.pot = Some(raked);
        tracker.apply_observation(&turn).unwrap();

        let hand = tracker.hand().unwrap();
        let flop_line = hand.line(Street::Flop);
        // Check (seen), hero bet (inferred), BB call (inferred).
        assert_eq!(3, flop_line.len());
        let Action::Bet { wager, .. } = flop_line[1].action else {
            panic!("expected inferred hero bet, got {:?}", flop_line[1].action);
        };
        let expected = round2((estimated_unraked(raked) - pre_pot) / 2.0);
        assert!((wager - expected).abs() < 1e-6);
        assert!(matches!(
            flop_line[2].action,
            Action::Call { wager: w } if (w - expected).abs() < 1e-6
        ));
        assert!(hand.pot_matches_investment());
    }

    #[test_log::test]
    fn test_estimated_unraked_bounds() {
        // Small pots: the 5% bound binds.
        assert!((estimated_unraked(9.5) - 10.0).abs() < 1e-6);
        // Huge pots: the cap binds.
        assert!((estimated_unraked(400.0) - 415.0).abs() < 1e-6);
    }

    #[test_log::test]
    fn test_folded_player_cannot_return() {
        let mut tracker = tracker_with_hand();
        let mut snap = snapshot();
        snap.players.remove(3);
        snap.active_player = Some(4);
        tracker.apply_observation(&snap).unwrap();

        snap.players.insert(3);
        let err = tracker.apply_observation(&snap).unwrap_err();
        assert!(matches!(
            err,
            TrackError::InvalidObservation(InvalidObservationError::FoldedPlayerReturned {
                player: 3
            })
        ));
    }
}
