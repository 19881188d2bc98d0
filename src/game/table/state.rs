//! Per-viewer snapshot of the table, for late joiners and resyncs.

use super::{GamePhase, Table};
use crate::game::deck::Card;
use crate::game::player::PlayerState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPlayer {
    pub id: String,
    pub name: String,
    pub stack: i64,
    pub current_bet: i64,
    pub state: PlayerState,
    /// How many cards the player holds; the cards themselves are only
    /// present for the viewer's own seat (and for everyone still in
    /// the hand once the showdown is reached).
    pub cards_held: usize,
    pub hole_cards: Option<Vec<Card>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub table_id: String,
    pub phase: GamePhase,
    pub pot: i64,
    pub current_bet: i64,
    pub min_raise: i64,
    pub community_cards: Vec<Card>,
    pub players: Vec<SnapshotPlayer>,
    pub current_turn: Option<String>,
    pub dealer: Option<String>,
}

impl Table {
    /// Build the table state as `viewer` is allowed to see it.
    pub fn snapshot(&self, viewer: Option<&str>) -> TableSnapshot {
        let showdown = self.phase == GamePhase::Showdown;
        let players = self
            .players
            .iter()
            .map(|p| {
                let own = viewer == Some(p.id.as_str());
                let revealed = showdown && p.is_in_hand();
                SnapshotPlayer {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    stack: p.stack,
                    current_bet: p.current_bet,
                    state: p.state.clone(),
                    cards_held: p.hole_cards.len(),
                    hole_cards: if own || revealed {
                        Some(p.hole_cards.clone())
                    } else {
                        None
                    },
                }
            })
            .collect();

        let dealer = if self.hand_order.is_empty() {
            None
        } else {
            Some(self.player_at(self.dealer_pos).id.clone())
        };

        TableSnapshot {
            table_id: self.table_id.clone(),
            phase: self.phase,
            pot: self.pot,
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            community_cards: self.community_cards.clone(),
            players,
            current_turn: self.current_turn_id().map(str::to_string),
            dealer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{act, table_with_players};
    use super::*;
    use crate::game::player::PlayerAction;

    #[test]
    fn test_snapshot_hides_other_players_cards() {
        let mut table = table_with_players(3, 1000);
        table.start_game("p1").unwrap();

        let snapshot = table.snapshot(Some("p2"));
        for player in &snapshot.players {
            assert_eq!(player.cards_held, 2);
            if player.id == "p2" {
                assert_eq!(player.hole_cards.as_ref().map(Vec::len), Some(2));
            } else {
                assert!(player.hole_cards.is_none(), "{} leaked cards", player.id);
            }
        }
    }

    #[test]
    fn test_anonymous_snapshot_sees_no_cards() {
        let mut table = table_with_players(2, 1000);
        table.start_game("p1").unwrap();
        let snapshot = table.snapshot(None);
        assert!(snapshot.players.iter().all(|p| p.hole_cards.is_none()));
        assert_eq!(snapshot.current_turn.as_deref(), table.current_turn_id());
        assert_eq!(snapshot.dealer.as_deref(), Some("p1"));
    }

    #[test]
    fn test_showdown_snapshot_reveals_live_hands() {
        let mut table = table_with_players(2, 1000);
        table.start_game("p1").unwrap();
        act(&mut table, PlayerAction::Bet(1000));
        act(&mut table, PlayerAction::Call);
        assert_eq!(table.phase, GamePhase::Showdown);

        let snapshot = table.snapshot(None);
        assert!(snapshot
            .players
            .iter()
            .all(|p| p.hole_cards.is_some()));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut table = table_with_players(2, 1000);
        table.start_game("p1").unwrap();
        let json = serde_json::to_value(table.snapshot(Some("p1"))).unwrap();
        assert_eq!(json["phase"], "PreFlop");
        assert_eq!(json["pot"], 30);
    }
}
