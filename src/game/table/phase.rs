//! Street transitions and the post-hand reset.

use super::{GamePhase, Table};
use crate::game::constants::{FLOP_CARDS, MIN_PLAYERS_TO_START, RIVER_CARDS, TURN_CARDS};
use crate::game::events::TableEvent;

impl Table {
    /// Close the current street and open the next. When a street opens
    /// with at most one player able to act, the board keeps running out
    /// street by street until the showdown.
    pub(crate) fn advance_street(&mut self) {
        loop {
            let (next, to_deal) = match self.phase {
                GamePhase::PreFlop => (GamePhase::Flop, FLOP_CARDS),
                GamePhase::Flop => (GamePhase::Turn, TURN_CARDS),
                GamePhase::Turn => (GamePhase::River, RIVER_CARDS),
                GamePhase::River => {
                    self.resolve_showdown();
                    return;
                }
                GamePhase::Waiting | GamePhase::Showdown => {
                    tracing::warn!(table = %self.table_id, phase = ?self.phase, "advance_street outside a betting round");
                    return;
                }
            };
            match self.phase.transition_to(next) {
                Ok(phase) => self.phase = phase,
                Err(_) => return,
            }

            let cards = self.deck.deal_multiple(to_deal);
            if cards.len() != to_deal {
                tracing::error!(table = %self.table_id, "deck exhausted while dealing the board");
            }
            self.community_cards.extend(cards);

            for pos in 0..self.hand_order.len() {
                self.player_at_mut(pos).reset_for_new_street();
            }
            self.current_bet = 0;
            self.min_raise = self.config.big_blind;
            self.last_raiser = None;
            self.current_turn = None;

            tracing::info!(
                table = %self.table_id,
                phase = ?self.phase,
                board = self.community_cards.len(),
                pot = self.pot,
                "street opened"
            );
            self.broadcast(TableEvent::BettingRoundStarted {
                phase: self.phase,
                community_cards: self.community_cards.clone(),
            });

            if self.is_street_complete() {
                continue;
            }
            let first = self.first_actionable_after_dealer();
            self.set_turn(first);
            return;
        }
    }

    /// End-of-hand tick, fired by the session after the post-hand
    /// delay: clear the table back to waiting and start the next hand
    /// if enough funded players remain.
    pub fn finish_hand(&mut self) {
        if self.phase != GamePhase::Showdown {
            tracing::debug!(table = %self.table_id, phase = ?self.phase, "finish_hand ignored");
            return;
        }
        self.phase = match self.phase.transition_to(GamePhase::Waiting) {
            Ok(phase) => phase,
            Err(_) => return,
        };

        self.hand_order.clear();
        self.community_cards.clear();
        self.current_turn = None;
        self.last_raiser = None;
        self.current_bet = 0;
        for player in &mut self.players {
            player.reset_for_new_hand();
        }
        self.purge_departed();

        if self.seated_with_chips() >= MIN_PLAYERS_TO_START {
            if let Err(err) = self.start_new_hand() {
                tracing::warn!(table = %self.table_id, %err, "could not start next hand");
            }
        } else {
            tracing::info!(table = %self.table_id, "not enough funded players, table idle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{act, table_with_players};
    use super::*;
    use crate::game::player::{PlayerAction, PlayerState};

    #[test]
    fn test_all_in_call_runs_out_the_board() {
        let mut table = table_with_players(2, 1000);
        table.start_game("p1").unwrap();

        // Heads-up: p2 shoves, p1 calls. No further action exists, so
        // the board runs out to showdown on its own.
        act(&mut table, PlayerAction::Bet(1000));
        act(&mut table, PlayerAction::Call);

        assert_eq!(table.phase, GamePhase::Showdown);
        assert_eq!(table.community_cards.len(), 5);
        // The whole 2000 went somewhere.
        let total: i64 = table.players.iter().map(|p| p.stack).sum();
        assert_eq!(total, 2000);
    }

    #[test]
    fn test_one_live_player_against_all_in_runs_out() {
        let mut table = table_with_players(3, 1000);
        let sb = table.find_player("p2").unwrap();
        table.players[sb].stack = 40;
        table.start_game("p1").unwrap();

        // p1 shoves-ish, short p2 calls all-in, p3 folds: only p1 can
        // still act, so every later street completes instantly.
        act(&mut table, PlayerAction::Bet(200));
        act(&mut table, PlayerAction::Call);
        act(&mut table, PlayerAction::Fold);

        assert_eq!(table.phase, GamePhase::Showdown);
        assert_eq!(table.community_cards.len(), 5);
        assert_eq!(table.players[sb].state, PlayerState::AllIn);
    }

    #[test]
    fn test_finish_hand_restarts_when_table_is_funded() {
        let mut table = table_with_players(3, 1000);
        table.start_game("p1").unwrap();
        act(&mut table, PlayerAction::Fold);
        act(&mut table, PlayerAction::Fold);
        assert_eq!(table.phase, GamePhase::Showdown);

        table.finish_hand();
        assert_eq!(table.phase, GamePhase::PreFlop);
        assert_eq!(table.hands_played, 2);
    }

    #[test]
    fn test_finish_hand_goes_idle_below_two_funded() {
        let mut table = table_with_players(2, 1000);
        table.start_game("p1").unwrap();
        // p2 shoves and loses... or wins; force a known outcome by
        // folding instead: p2 folds, then strip p2's chips.
        act(&mut table, PlayerAction::Fold);
        let loser = table.find_player("p2").unwrap();
        table.players[loser].stack = 0;

        table.finish_hand();
        assert_eq!(table.phase, GamePhase::Waiting);
        assert!(table.hand_order.is_empty());
        assert!(table.current_turn_id().is_none());
    }

    #[test]
    fn test_finish_hand_outside_showdown_is_ignored() {
        let mut table = table_with_players(2, 1000);
        table.start_game("p1").unwrap();
        table.finish_hand();
        assert_eq!(table.phase, GamePhase::PreFlop);
    }
}
