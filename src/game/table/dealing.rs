//! Hand start: deck reset, dealer rotation, hole cards.

use super::{GamePhase, Table};
use crate::game::constants::{HOLE_CARDS_PER_PLAYER, MIN_PLAYERS_TO_START};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{Outbound, TableEvent};
use crate::game::player::PlayerState;

impl Table {
    /// Explicit start requested by a seated player.
    pub fn start_game(&mut self, requester: &str) -> GameResult<()> {
        if self.find_player(requester).is_none() {
            return Err(GameError::PlayerNotAtTable {
                player_id: requester.to_string(),
            });
        }
        if self.phase != GamePhase::Waiting {
            return Err(GameError::HandInProgress);
        }
        let funded = self.seated_with_chips();
        if funded < MIN_PLAYERS_TO_START {
            return Err(GameError::NotEnoughPlayers {
                required: MIN_PLAYERS_TO_START,
                seated: funded,
            });
        }
        self.start_new_hand()
    }

    /// Begin a hand: rebuild the rotation, shuffle, deal, post blinds,
    /// hand the first turn to the player after the big blind.
    pub(crate) fn start_new_hand(&mut self) -> GameResult<()> {
        self.hand_order.clear();
        self.purge_departed();

        self.hand_order = self.dealable_players();
        if self.hand_order.len() < MIN_PLAYERS_TO_START {
            return Err(GameError::NotEnoughPlayers {
                required: MIN_PLAYERS_TO_START,
                seated: self.hand_order.len(),
            });
        }

        self.phase = self.phase.transition_to(GamePhase::PreFlop)?;
        self.hands_played += 1;

        // Button stays on the first hand, then rotates one spot per hand.
        self.dealer_pos = if self.hands_played == 1 {
            0
        } else {
            (self.dealer_pos + 1) % self.hand_order.len()
        };

        self.deck.reset_and_shuffle();
        self.community_cards.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
        self.last_raiser = None;

        for pos in 0..self.hand_order.len() {
            let player = self.player_at_mut(pos);
            player.reset_for_new_hand();
            player.state = PlayerState::Active;
        }

        tracing::info!(
            table = %self.table_id,
            hand = self.hands_played,
            players = self.hand_order.len(),
            dealer = %self.player_at(self.dealer_pos).id,
            "starting hand"
        );

        self.deal_hole_cards()?;
        self.post_blinds();

        self.broadcast(TableEvent::BettingRoundStarted {
            phase: GamePhase::PreFlop,
            community_cards: vec![],
        });

        // First action goes to the seat after the big blind; a short
        // stack all-in from the blinds is skipped.
        let big_blind_pos = (self.dealer_pos + 2) % self.hand_order.len();
        if self.is_street_complete() {
            self.advance_street();
        } else {
            let first = self.next_actionable(big_blind_pos);
            self.set_turn(first);
        }
        Ok(())
    }

    fn deal_hole_cards(&mut self) -> GameResult<()> {
        for pos in 0..self.hand_order.len() {
            let cards = self.deck.deal_multiple(HOLE_CARDS_PER_PLAYER);
            if cards.len() != HOLE_CARDS_PER_PLAYER {
                // 6 seats * 2 + 5 board cards cannot exhaust 52.
                tracing::error!(table = %self.table_id, "deck exhausted while dealing hole cards");
                return Err(GameError::InternalError("deck exhausted".to_string()));
            }
            let player = self.player_at_mut(pos);
            player.hole_cards = cards.clone();
            let player_id = player.id.clone();
            self.emit(Outbound::direct(player_id, TableEvent::HoleCards { cards }));
        }
        Ok(())
    }
}
