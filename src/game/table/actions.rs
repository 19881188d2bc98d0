//! The betting engine: validating and applying player actions.
//!
//! Validation is strictly before mutation; a rejected action leaves the
//! table untouched and the error travels back to the offender alone.

use super::{GamePhase, Table};
use crate::game::error::{GameError, GameResult};
use crate::game::events::TableEvent;
use crate::game::player::{PlayerAction, PlayerState};

impl Table {
    /// Apply an action from `player_id`. Only the player on turn may
    /// act, and only while a betting street is open.
    pub fn handle_action(&mut self, player_id: &str, action: PlayerAction) -> GameResult<()> {
        let turn_pos = self.current_turn.ok_or(GameError::CannotAct)?;
        if self.player_at(turn_pos).id != player_id {
            if self.find_player(player_id).is_none() {
                return Err(GameError::PlayerNotAtTable {
                    player_id: player_id.to_string(),
                });
            }
            return Err(GameError::NotYourTurn);
        }
        if !self.player_at(turn_pos).can_act() {
            return Err(GameError::CannotAct);
        }

        let bet_before = self.current_bet;
        let moved = self.apply_action(turn_pos, &action)?;

        // Announce the effect, not the verb: a call for less than the
        // stack-covering amount is an all-in, and anything that tops
        // the previous bet is a raise.
        let actor = self.player_at(turn_pos);
        let kind = if actor.state == PlayerState::AllIn && actor.current_bet < self.current_bet {
            "allIn"
        } else if self.current_bet > bet_before {
            "raise"
        } else {
            action.kind()
        };

        tracing::debug!(
            table = %self.table_id,
            player = %player_id,
            action = kind,
            moved,
            pot = self.pot,
            "action applied"
        );
        self.broadcast(TableEvent::PlayerActed {
            player_id: player_id.to_string(),
            action: kind.to_string(),
            amount: moved,
            pot: self.pot,
        });

        self.advance_action(turn_pos);
        Ok(())
    }

    /// Returns the chips moved into the pot by the action.
    fn apply_action(&mut self, pos: usize, action: &PlayerAction) -> GameResult<i64> {
        match *action {
            PlayerAction::Check => {
                if self.player_at(pos).current_bet != self.current_bet {
                    return Err(GameError::CannotCheck {
                        current_bet: self.current_bet,
                    });
                }
                self.player_at_mut(pos).has_acted_this_round = true;
                Ok(0)
            }
            PlayerAction::Call => {
                let deficit = self.current_bet - self.player_at(pos).current_bet;
                let moved = if deficit > 0 {
                    // Short stacks call all-in for less and stay in
                    // the hand for the payout.
                    self.player_at_mut(pos).place_bet(deficit)
                } else {
                    0
                };
                self.pot += moved;
                self.player_at_mut(pos).has_acted_this_round = true;
                Ok(moved)
            }
            PlayerAction::Bet(amount) => self.apply_bet(pos, amount),
            PlayerAction::Raise(delta) => self.apply_bet(pos, self.current_bet + delta),
            PlayerAction::Fold => {
                self.player_at_mut(pos).fold();
                self.player_at_mut(pos).has_acted_this_round = true;
                Ok(0)
            }
        }
    }

    /// Bet semantics: `amount` is the player's total for this street.
    fn apply_bet(&mut self, pos: usize, amount: i64) -> GameResult<i64> {
        if amount < self.current_bet {
            return Err(GameError::BetTooSmall {
                minimum: self.current_bet,
                attempted: amount,
            });
        }

        let player = self.player_at(pos);
        let needed = amount - player.current_bet;
        let increase = amount - self.current_bet;
        let covers = needed < player.stack;
        // A raise must add at least min_raise on top of the current
        // bet, unless the raiser is all-in for less.
        if increase > 0 && covers && increase < self.min_raise {
            return Err(GameError::RaiseTooSmall {
                min_raise: self.min_raise,
                attempted: increase,
            });
        }

        let moved = self.player_at_mut(pos).place_bet(needed);
        self.pot += moved;
        self.player_at_mut(pos).has_acted_this_round = true;

        let new_total = self.player_at(pos).current_bet;
        if new_total > self.current_bet {
            let raise_size = new_total - self.current_bet;
            self.current_bet = new_total;
            self.last_raiser = Some(self.player_at(pos).id.clone());
            // A full raise re-opens the action; an all-in under-raise
            // still has to be called but resets nothing else.
            if raise_size >= self.min_raise {
                self.min_raise = raise_size.max(self.config.big_blind);
                let raiser_idx = self.hand_order[pos];
                for &idx in &self.hand_order {
                    if idx != raiser_idx && self.players[idx].can_act() {
                        self.players[idx].has_acted_this_round = false;
                    }
                }
            }
        }
        Ok(moved)
    }

    /// Fold a player outside their own volition (timeout, departure).
    /// Folding someone already out of the hand is a no-op.
    pub fn force_fold(&mut self, player_id: &str) {
        let Some(idx) = self.find_player(player_id) else {
            return;
        };
        if !self.players[idx].is_in_hand() {
            return;
        }
        if !matches!(
            self.phase,
            GamePhase::PreFlop | GamePhase::Flop | GamePhase::Turn | GamePhase::River
        ) {
            return;
        }

        tracing::info!(table = %self.table_id, player = %player_id, "forced fold");
        self.players[idx].fold();
        self.players[idx].has_acted_this_round = true;
        self.broadcast(TableEvent::PlayerActed {
            player_id: player_id.to_string(),
            action: "fold".to_string(),
            amount: 0,
            pot: self.pot,
        });

        let was_turn = self
            .current_turn
            .map(|pos| self.hand_order[pos] == idx)
            .unwrap_or(false);

        if self.players_in_hand() <= 1 {
            self.resolve_fold_win();
        } else if was_turn {
            // Safe: was_turn implies current_turn is Some.
            let pos = self.current_turn.unwrap_or_default();
            self.advance_action(pos);
        } else if self.is_street_complete() {
            self.advance_street();
        }
    }

    /// Move on after an action at `from_pos`: resolve a walked pot,
    /// close a finished street, or pass the turn along.
    pub(crate) fn advance_action(&mut self, from_pos: usize) {
        if self.players_in_hand() <= 1 {
            self.resolve_fold_win();
        } else if self.is_street_complete() {
            self.advance_street();
        } else {
            let next = self.next_actionable(from_pos);
            self.set_turn(next);
        }
    }

    /// A street closes when nobody can act, or when every remaining
    /// actor has matched the bet and either everyone has acted since
    /// the last raise or only one actor is left standing.
    pub(crate) fn is_street_complete(&self) -> bool {
        let active = self.actionable_positions();
        if active.is_empty() {
            return true;
        }
        let all_matched = active
            .iter()
            .all(|&pos| self.player_at(pos).current_bet == self.current_bet);
        let all_acted = active
            .iter()
            .all(|&pos| self.player_at(pos).has_acted_this_round);
        all_matched && (all_acted || active.len() == 1)
    }
}
