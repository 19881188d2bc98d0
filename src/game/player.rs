use crate::game::deck::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerState {
    Waiting, // Seated but not dealt into the current hand
    Active,  // Still in the hand
    Folded,  // Folded this hand
    AllIn,   // All chips in the pot
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub stack: i64,
    pub hole_cards: Vec<Card>,
    pub current_bet: i64,
    pub total_bet_this_hand: i64,
    pub state: PlayerState,
    pub has_acted_this_round: bool,
    /// Left the table mid-hand; kept until no hand references them so
    /// pot accounting stays intact, removed at the next hand start.
    pub departed: bool,
}

impl Player {
    pub fn new(id: String, name: String, stack: i64) -> Self {
        Self {
            id,
            name,
            stack,
            hole_cards: vec![],
            current_bet: 0,
            total_bet_this_hand: 0,
            state: PlayerState::Waiting,
            has_acted_this_round: false,
            departed: false,
        }
    }

    /// Move up to `amount` chips into the pot. The move is capped at the
    /// stack; emptying the stack puts the player all-in. Returns the
    /// amount actually moved.
    pub fn place_bet(&mut self, amount: i64) -> i64 {
        let actual = amount.min(self.stack).max(0);
        self.stack -= actual;
        self.current_bet += actual;
        self.total_bet_this_hand += actual;

        if self.stack == 0 && self.state == PlayerState::Active {
            self.state = PlayerState::AllIn;
        }

        actual
    }

    pub fn fold(&mut self) {
        self.state = PlayerState::Folded;
    }

    pub fn reset_for_new_street(&mut self) {
        self.current_bet = 0;
        self.has_acted_this_round = false;
    }

    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bet = 0;
        self.total_bet_this_hand = 0;
        self.has_acted_this_round = false;
        self.state = PlayerState::Waiting;
    }

    pub fn can_act(&self) -> bool {
        self.state == PlayerState::Active
    }

    pub fn is_in_hand(&self) -> bool {
        matches!(self.state, PlayerState::Active | PlayerState::AllIn)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "amount")]
pub enum PlayerAction {
    /// Set the acting player's total bet for this street.
    Bet(i64),
    Call,
    Check,
    /// Increase the current bet by the given delta.
    Raise(i64),
    Fold,
}

impl PlayerAction {
    /// Wire-friendly name of the verb as sent. Announcements derive
    /// the effect instead where it differs (short calls are all-ins,
    /// bets that top the standing bet are raises).
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerAction::Bet(_) => "bet",
            PlayerAction::Call => "call",
            PlayerAction::Check => "check",
            PlayerAction::Raise(_) => "raise",
            PlayerAction::Fold => "fold",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_bet_caps_at_stack() {
        let mut player = Player::new("p1".into(), "Player 1".into(), 100);
        player.state = PlayerState::Active;

        let moved = player.place_bet(250);
        assert_eq!(moved, 100);
        assert_eq!(player.stack, 0);
        assert_eq!(player.current_bet, 100);
        assert_eq!(player.state, PlayerState::AllIn);
    }

    #[test]
    fn test_place_bet_never_goes_negative() {
        let mut player = Player::new("p1".into(), "Player 1".into(), 50);
        player.state = PlayerState::Active;
        player.place_bet(50);
        let moved = player.place_bet(10);
        assert_eq!(moved, 0);
        assert_eq!(player.stack, 0);
    }

    #[test]
    fn test_reset_for_new_street_keeps_hand_total() {
        let mut player = Player::new("p1".into(), "Player 1".into(), 500);
        player.state = PlayerState::Active;
        player.place_bet(120);
        player.reset_for_new_street();
        assert_eq!(player.current_bet, 0);
        assert_eq!(player.total_bet_this_hand, 120);
        assert!(!player.has_acted_this_round);
    }

    #[test]
    fn test_action_kind() {
        assert_eq!(PlayerAction::Raise(40).kind(), "raise");
        assert_eq!(PlayerAction::Fold.kind(), "fold");
    }
}
