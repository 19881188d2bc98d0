mod actions;
mod blinds;
mod dealing;
mod phase;
mod player_mgmt;
mod showdown;
pub mod state;

pub use state::{SnapshotPlayer, TableSnapshot};

use super::{
    deck::{Card, Deck},
    error::GameError,
    events::{Outbound, TableEvent},
    player::Player,
};
use crate::config::TableConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    Waiting,  // Waiting for players
    PreFlop,  // Hole cards dealt, pre-flop betting
    Flop,     // 3 community cards, betting
    Turn,     // 4th community card, betting
    River,    // 5th community card, betting
    Showdown, // Reveal and determine winner
}

impl GamePhase {
    /// Returns the set of phases this phase can transition to.
    pub fn valid_transitions(&self) -> &[GamePhase] {
        match self {
            GamePhase::Waiting => &[GamePhase::PreFlop],
            GamePhase::PreFlop => &[GamePhase::Flop, GamePhase::Showdown],
            GamePhase::Flop => &[GamePhase::Turn, GamePhase::Showdown],
            GamePhase::Turn => &[GamePhase::River, GamePhase::Showdown],
            GamePhase::River => &[GamePhase::Showdown],
            GamePhase::Showdown => &[GamePhase::Waiting],
        }
    }

    /// Attempt to transition to a target phase. Returns error if the transition is invalid.
    pub fn transition_to(&self, target: GamePhase) -> Result<GamePhase, GameError> {
        if self.valid_transitions().contains(&target) {
            Ok(target)
        } else {
            tracing::error!(
                "Invalid phase transition: {:?} -> {:?} (valid: {:?})",
                self,
                target,
                self.valid_transitions()
            );
            Err(GameError::InvalidPhaseTransition {
                from: format!("{:?}", self),
                to: format!("{:?}", target),
            })
        }
    }
}

/// A single hold'em table.
///
/// All game logic is synchronous; callers mutate the table through its
/// operation methods and drain the resulting notifications with
/// [`Table::take_events`]. The session wraps one table per task, so no
/// method here needs to be thread-safe.
#[derive(Debug)]
pub struct Table {
    pub table_id: String,
    pub config: TableConfig,
    /// Seated players, in seating order. Indices are stable for the
    /// duration of a hand; removals happen only between hands.
    pub players: Vec<Player>,
    pub phase: GamePhase,
    pub deck: Deck,
    pub community_cards: Vec<Card>,
    pub pot: i64,
    pub current_bet: i64,
    pub min_raise: i64,
    /// Players dealt into the current hand, as indices into `players`.
    pub hand_order: Vec<usize>,
    /// Dealer button, as a position in `hand_order`.
    pub dealer_pos: usize,
    /// Whose turn it is, as a position in `hand_order`.
    pub current_turn: Option<usize>,
    pub last_raiser: Option<String>,
    pub hands_played: u64,
    pending: Vec<Outbound>,
}

impl Table {
    pub fn new(table_id: impl Into<String>, config: &TableConfig) -> Self {
        Self {
            table_id: table_id.into(),
            config: config.clone(),
            players: Vec::new(),
            phase: GamePhase::Waiting,
            deck: Deck::new(),
            community_cards: Vec::new(),
            pot: 0,
            current_bet: 0,
            min_raise: config.big_blind,
            hand_order: Vec::new(),
            dealer_pos: 0,
            current_turn: None,
            last_raiser: None,
            hands_played: 0,
            pending: Vec::new(),
        }
    }

    /// Drain the notifications produced since the last drain, in order.
    pub fn take_events(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn emit(&mut self, outbound: Outbound) {
        self.pending.push(outbound);
    }

    pub(crate) fn broadcast(&mut self, event: TableEvent) {
        self.pending.push(Outbound::broadcast(event));
    }

    pub fn current_turn_id(&self) -> Option<&str> {
        self.current_turn
            .map(|pos| self.players[self.hand_order[pos]].id.as_str())
    }

    pub(crate) fn find_player(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    pub(crate) fn player_at(&self, pos: usize) -> &Player {
        &self.players[self.hand_order[pos]]
    }

    pub(crate) fn player_at_mut(&mut self, pos: usize) -> &mut Player {
        &mut self.players[self.hand_order[pos]]
    }

    /// Next hand position after `after` whose player can still act,
    /// scanning one full rotation. `None` means nobody can act.
    pub(crate) fn next_actionable(&self, after: usize) -> Option<usize> {
        let n = self.hand_order.len();
        if n == 0 {
            return None;
        }
        (1..=n)
            .map(|offset| (after + offset) % n)
            .find(|&pos| self.player_at(pos).can_act())
    }

    /// First position after the dealer that can act; opens each
    /// post-flop street.
    pub(crate) fn first_actionable_after_dealer(&self) -> Option<usize> {
        self.next_actionable(self.dealer_pos)
    }

    /// Hand positions of players who can still take actions.
    pub(crate) fn actionable_positions(&self) -> Vec<usize> {
        (0..self.hand_order.len())
            .filter(|&pos| self.player_at(pos).can_act())
            .collect()
    }

    /// Count of players still contesting the pot (active or all-in).
    pub(crate) fn players_in_hand(&self) -> usize {
        self.hand_order
            .iter()
            .filter(|&&idx| self.players[idx].is_in_hand())
            .count()
    }

    pub(crate) fn seated_with_chips(&self) -> usize {
        self.players
            .iter()
            .filter(|p| !p.departed && p.stack > 0)
            .count()
    }

    /// Assign the turn and announce it. `None` clears the turn without
    /// an announcement.
    pub(crate) fn set_turn(&mut self, pos: Option<usize>) {
        self.current_turn = pos;
        if let Some(pos) = pos {
            let player_id = self.player_at(pos).id.clone();
            tracing::debug!(table = %self.table_id, player = %player_id, "turn assigned");
            let time_limit_ms = self.config.turn_timeout_ms;
            self.broadcast(TableEvent::TurnChanged {
                player_id,
                time_limit_ms,
            });
        }
    }

    /// Sum every seated player's contribution to the current hand.
    /// Always equals `pot`; used by tests and debug assertions.
    pub(crate) fn total_contributions(&self) -> i64 {
        self.players.iter().map(|p| p.total_bet_this_hand).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::PlayerAction;

    pub(crate) fn test_config() -> TableConfig {
        TableConfig {
            small_blind: 10,
            big_blind: 20,
            max_seats: 6,
            starting_chips: 1000,
            turn_timeout_ms: 12_000,
            post_hand_delay_ms: 10_000,
        }
    }

    pub(crate) fn table_with_players(count: usize, chips: i64) -> Table {
        let mut table = Table::new("t1", &test_config());
        for i in 1..=count {
            table
                .join(format!("p{}", i), format!("Player {}", i), chips)
                .unwrap();
        }
        table
    }

    /// Drive the current actor through `action`, returning the actor id.
    pub(crate) fn act(table: &mut Table, action: PlayerAction) -> String {
        let id = table
            .current_turn_id()
            .expect("expected a player to be on turn")
            .to_string();
        table.handle_action(&id, action).unwrap();
        id
    }

    #[test]
    fn test_phase_transition_graph() {
        assert!(GamePhase::Waiting.transition_to(GamePhase::PreFlop).is_ok());
        assert!(GamePhase::PreFlop.transition_to(GamePhase::Flop).is_ok());
        assert!(GamePhase::PreFlop.transition_to(GamePhase::Showdown).is_ok());
        assert!(GamePhase::River.transition_to(GamePhase::Showdown).is_ok());
        assert!(GamePhase::Showdown.transition_to(GamePhase::Waiting).is_ok());

        assert!(GamePhase::Waiting.transition_to(GamePhase::Flop).is_err());
        assert!(GamePhase::Flop.transition_to(GamePhase::PreFlop).is_err());
        assert!(GamePhase::Showdown.transition_to(GamePhase::River).is_err());
    }

    #[test]
    fn test_new_table_is_waiting_and_quiet() {
        let mut table = Table::new("t1", &test_config());
        assert_eq!(table.phase, GamePhase::Waiting);
        assert_eq!(table.pot, 0);
        assert!(table.current_turn_id().is_none());
        assert!(table.take_events().is_empty());
    }

    #[test]
    fn test_take_events_drains() {
        let mut table = table_with_players(2, 1000);
        assert!(!table.take_events().is_empty());
        assert!(table.take_events().is_empty());
    }
}
