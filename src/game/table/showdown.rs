//! Hand resolution: fold-wins and showdowns.

use super::{GamePhase, Table};
use crate::game::events::{Payout, RevealedHand, TableEvent};
use crate::game::hand::{determine_winners, evaluate_hand, HandRank};

impl Table {
    /// Everyone but one player folded: pay the survivor without
    /// evaluating or revealing anything.
    pub(crate) fn resolve_fold_win(&mut self) {
        self.current_turn = None;
        let Some(winner_pos) =
            (0..self.hand_order.len()).find(|&pos| self.player_at(pos).is_in_hand())
        else {
            tracing::error!(table = %self.table_id, "fold-win with no player left in hand");
            return;
        };

        self.phase = match self.phase.transition_to(GamePhase::Showdown) {
            Ok(phase) => phase,
            Err(_) => return,
        };

        let amount = self.pot;
        self.pot = 0;
        let winner = self.player_at_mut(winner_pos);
        winner.stack += amount;
        let winner_id = winner.id.clone();

        tracing::info!(table = %self.table_id, winner = %winner_id, amount, "hand won by fold");
        let community_cards = self.community_cards.clone();
        self.broadcast(TableEvent::HandEnded {
            payouts: vec![Payout {
                player_id: winner_id,
                amount,
                hand_name: None,
            }],
            community_cards,
            revealed_hands: vec![],
        });
    }

    /// River betting closed: evaluate every live hand, split the pot
    /// among the best, reveal the contenders' cards.
    pub(crate) fn resolve_showdown(&mut self) {
        self.current_turn = None;
        self.phase = match self.phase.transition_to(GamePhase::Showdown) {
            Ok(phase) => phase,
            Err(_) => return,
        };

        let contenders: Vec<(usize, HandRank)> = (0..self.hand_order.len())
            .filter(|&pos| self.player_at(pos).is_in_hand())
            .map(|pos| {
                let player = self.player_at(pos);
                (
                    pos,
                    evaluate_hand(&player.hole_cards, &self.community_cards),
                )
            })
            .collect();

        let winners = determine_winners(&contenders);
        if winners.is_empty() {
            tracing::error!(table = %self.table_id, "showdown with no contenders");
            return;
        }

        // Pay in hand order starting left of the button; the integer
        // split remainder goes to the first winner paid.
        let n = self.hand_order.len();
        let paid_order: Vec<usize> = (1..=n)
            .map(|offset| (self.dealer_pos + offset) % n)
            .filter(|pos| winners.contains(pos))
            .collect();

        let share = self.pot / winners.len() as i64;
        let mut remainder = self.pot % winners.len() as i64;
        self.pot = 0;

        let mut payouts = Vec::with_capacity(paid_order.len());
        for &pos in &paid_order {
            let amount = share + remainder;
            remainder = 0;
            let rank = contenders
                .iter()
                .find(|(p, _)| *p == pos)
                .map(|(_, rank)| *rank);
            let winner = self.player_at_mut(pos);
            winner.stack += amount;
            let winner_id = winner.id.clone();
            tracing::info!(
                table = %self.table_id,
                winner = %winner_id,
                amount,
                hand = rank.map(|r| r.category.name()).unwrap_or("unknown"),
                "showdown payout"
            );
            payouts.push(Payout {
                player_id: winner_id,
                amount,
                hand_name: rank.map(|r| r.category.name().to_string()),
            });
        }

        let revealed_hands = contenders
            .iter()
            .map(|(pos, _)| {
                let player = self.player_at(*pos);
                RevealedHand {
                    player_id: player.id.clone(),
                    cards: player.hole_cards.clone(),
                }
            })
            .collect();

        let community_cards = self.community_cards.clone();
        self.broadcast(TableEvent::HandEnded {
            payouts,
            community_cards,
            revealed_hands,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{act, table_with_players, test_config};
    use super::*;
    use crate::game::deck::Card;
    use crate::game::player::PlayerAction;

    fn c(rank: u8, suit: u8) -> Card {
        Card::new(rank, suit)
    }

    /// Checks/calls a heads-up hand down to the river, then rewrites
    /// the cards so the showdown outcome is known.
    fn play_to_scripted_river(table: &mut Table, p1_hole: [Card; 2], p2_hole: [Card; 2]) {
        act(table, PlayerAction::Call);
        act(table, PlayerAction::Check);
        for _ in 0..2 {
            act(table, PlayerAction::Check);
            act(table, PlayerAction::Check);
        }
        assert_eq!(table.phase, GamePhase::River);
        assert_eq!(table.community_cards.len(), 5);

        table.community_cards = vec![c(13, 0), c(9, 1), c(7, 2), c(4, 3), c(2, 0)];
        let p1 = table.find_player("p1").unwrap();
        let p2 = table.find_player("p2").unwrap();
        table.players[p1].hole_cards = p1_hole.to_vec();
        table.players[p2].hole_cards = p2_hole.to_vec();
    }

    #[test]
    fn test_checked_down_pot_goes_to_best_hand() {
        let mut table = table_with_players(2, 1000);
        table.start_game("p1").unwrap();

        // Blinds 10/20, call + check: 40 in the middle entering the flop.
        act(&mut table, PlayerAction::Call);
        assert_eq!(table.pot, 40);
        act(&mut table, PlayerAction::Check);
        assert_eq!(table.phase, GamePhase::Flop);

        for _ in 0..2 {
            act(&mut table, PlayerAction::Check);
            act(&mut table, PlayerAction::Check);
        }
        assert_eq!(table.phase, GamePhase::River);
        table.community_cards = vec![c(13, 0), c(9, 1), c(7, 2), c(4, 3), c(2, 0)];
        let p1 = table.find_player("p1").unwrap();
        let p2 = table.find_player("p2").unwrap();
        // p1 pairs kings, p2 holds ace high.
        table.players[p1].hole_cards = vec![c(13, 3), c(5, 1)];
        table.players[p2].hole_cards = vec![c(14, 0), c(6, 2)];

        act(&mut table, PlayerAction::Check);
        act(&mut table, PlayerAction::Check);

        assert_eq!(table.phase, GamePhase::Showdown);
        assert_eq!(table.players[p1].stack, 1020, "winner up one big blind");
        assert_eq!(table.players[p2].stack, 980, "loser down one big blind");
        assert_eq!(table.pot, 0);
    }

    #[test]
    fn test_showdown_reveals_contenders_and_names_hand() {
        let mut table = table_with_players(2, 1000);
        table.start_game("p1").unwrap();
        play_to_scripted_river(
            &mut table,
            [c(13, 3), c(5, 1)],
            [c(14, 0), c(6, 2)],
        );
        table.take_events();

        act(&mut table, PlayerAction::Check);
        act(&mut table, PlayerAction::Check);

        let events = table.take_events();
        let hand_ended = events
            .iter()
            .find_map(|o| match &o.event {
                TableEvent::HandEnded {
                    payouts,
                    revealed_hands,
                    ..
                } => Some((payouts, revealed_hands)),
                _ => None,
            })
            .expect("HandEnded not emitted");

        let (payouts, revealed) = hand_ended;
        assert_eq!(payouts.len(), 1);
        assert_eq!(payouts[0].player_id, "p1");
        assert_eq!(payouts[0].amount, 40);
        assert_eq!(payouts[0].hand_name.as_deref(), Some("Pair"));
        assert_eq!(revealed.len(), 2, "both live hands revealed");
    }

    #[test]
    fn test_split_pot_remainder_goes_left_of_button() {
        // Odd pot: small blind 5 folds, leaving 45 for two tied hands.
        let mut config = test_config();
        config.small_blind = 5;
        let mut table = Table::new("t1", &config);
        for i in 1..=3 {
            table
                .join(format!("p{}", i), format!("Player {}", i), 1000)
                .unwrap();
        }
        table.start_game("p1").unwrap();

        // p1 calls 20, p2 (small blind) folds, p3 checks the option.
        act(&mut table, PlayerAction::Call);
        act(&mut table, PlayerAction::Fold);
        act(&mut table, PlayerAction::Check);
        assert_eq!(table.phase, GamePhase::Flop);
        assert_eq!(table.pot, 45);

        while table.phase != GamePhase::River {
            act(&mut table, PlayerAction::Check);
        }
        // Straight on the board, neither live hand improves: exact tie.
        table.community_cards = vec![c(14, 0), c(13, 1), c(12, 2), c(11, 3), c(10, 0)];
        let p1 = table.find_player("p1").unwrap();
        let p3 = table.find_player("p3").unwrap();
        table.players[p1].hole_cards = vec![c(2, 0), c(3, 1)];
        table.players[p3].hole_cards = vec![c(4, 2), c(5, 3)];

        act(&mut table, PlayerAction::Check);
        act(&mut table, PlayerAction::Check);

        assert_eq!(table.phase, GamePhase::Showdown);
        // p3 sits closer to the button's left, so the odd chip is theirs.
        assert_eq!(table.players[p3].stack, 1000 - 20 + 23);
        assert_eq!(table.players[p1].stack, 1000 - 20 + 22);
    }

    #[test]
    fn test_fold_win_reveals_nothing() {
        let mut table = table_with_players(3, 1000);
        table.start_game("p1").unwrap();
        table.take_events();

        act(&mut table, PlayerAction::Fold);
        act(&mut table, PlayerAction::Fold);

        let events = table.take_events();
        let hand_ended = events
            .iter()
            .find_map(|o| match &o.event {
                TableEvent::HandEnded {
                    payouts,
                    revealed_hands,
                    ..
                } => Some((payouts, revealed_hands)),
                _ => None,
            })
            .expect("HandEnded not emitted");

        let (payouts, revealed) = hand_ended;
        assert!(revealed.is_empty(), "fold-win must not reveal cards");
        assert_eq!(payouts.len(), 1);
        assert_eq!(payouts[0].player_id, "p3");
        assert_eq!(payouts[0].amount, 30);
        assert!(payouts[0].hand_name.is_none());
    }

    #[test]
    fn test_all_in_caller_is_payout_eligible() {
        let mut table = table_with_players(2, 1000);
        let short = table.find_player("p2").unwrap();
        table.players[short].stack = 300;
        table.start_game("p1").unwrap();

        // p2 shoves 300, p1 calls; run-out to showdown.
        act(&mut table, PlayerAction::Bet(300));
        act(&mut table, PlayerAction::Call);
        assert_eq!(table.phase, GamePhase::Showdown);

        // Whoever won, the all-in player was eligible: either they hold
        // 0 (lost) or 600 or 300 (won or split).
        let stack = table.players[short].stack;
        assert!(
            stack == 0 || stack == 600 || stack == 300,
            "unexpected stack {}",
            stack
        );
        let total: i64 = table.players.iter().map(|p| p.stack).sum();
        assert_eq!(total, 1300);
    }
}
