//! Seating and roster maintenance.

use super::{GamePhase, Table};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{Outbound, TableEvent};
use crate::game::player::{Player, PlayerState};

impl Table {
    /// Seat a new player. Mid-hand joiners wait for the next deal.
    pub fn join(&mut self, player_id: String, name: String, chips: i64) -> GameResult<()> {
        if self.players.len() >= self.config.max_seats {
            return Err(GameError::TableFull);
        }
        // Departed seats count too: they hold the id until the purge
        // between hands, and the roster must never carry it twice.
        if self.players.iter().any(|p| p.id == player_id) {
            return Err(GameError::PlayerAlreadySeated);
        }

        tracing::info!(table = %self.table_id, player = %player_id, %name, chips, "player joined");
        self.players
            .push(Player::new(player_id.clone(), name.clone(), chips));

        let snapshot = self.snapshot(Some(&player_id));
        self.emit(Outbound::direct(
            player_id.clone(),
            TableEvent::Joined { snapshot },
        ));
        self.broadcast(TableEvent::PlayerJoined {
            player_id,
            name,
            stack: chips,
        });
        Ok(())
    }

    /// Remove a player. If they are in the running hand this is an
    /// implicit fold; the seat itself is reclaimed once no hand
    /// references it.
    pub fn leave(&mut self, player_id: &str) {
        let Some(idx) = self.find_player(player_id) else {
            tracing::debug!(table = %self.table_id, player = %player_id, "leave for unknown player");
            return;
        };

        tracing::info!(table = %self.table_id, player = %player_id, "player left");
        self.broadcast(TableEvent::PlayerLeft {
            player_id: player_id.to_string(),
        });

        if self.phase == GamePhase::Waiting {
            self.players.remove(idx);
            return;
        }

        // A hand is running: indices in hand_order must stay valid, so
        // the seat is only marked and reclaimed at the next hand start.
        self.players[idx].departed = true;
        if self.players[idx].is_in_hand() {
            self.force_fold(player_id);
        }
    }

    /// Drop departed seats. Only callable between hands, when nothing
    /// references player indices.
    pub(crate) fn purge_departed(&mut self) {
        debug_assert!(self.hand_order.is_empty() || self.phase == GamePhase::Waiting);
        self.players.retain(|p| !p.departed);
    }

    /// Indices of players eligible to be dealt in: seated, funded, and
    /// not on their way out.
    pub(crate) fn dealable_players(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.departed && p.stack > 0 && p.state == PlayerState::Waiting)
            .map(|(idx, _)| idx)
            .collect()
    }
}
