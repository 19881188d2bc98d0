//! Outbound notifications produced by the table.
//!
//! The table never talks to a socket. It appends [`Outbound`] values to
//! an internal queue; the session drains the queue after every mutation
//! and hands each entry to the transport adapter, which owns fan-out.

use crate::game::deck::Card;
use crate::game::table::state::TableSnapshot;
use crate::game::table::GamePhase;
use serde::{Deserialize, Serialize};

/// Who an event is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    All,
    Player(String),
}

/// A routed event ready for delivery.
#[derive(Debug, Clone)]
pub struct Outbound {
    pub to: Recipient,
    pub event: TableEvent,
}

impl Outbound {
    pub fn broadcast(event: TableEvent) -> Self {
        Self {
            to: Recipient::All,
            event,
        }
    }

    pub fn direct(player_id: impl Into<String>, event: TableEvent) -> Self {
        Self {
            to: Recipient::Player(player_id.into()),
            event,
        }
    }
}

/// One winner's share of the pot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub player_id: String,
    pub amount: i64,
    pub hand_name: Option<String>,
}

/// Hole cards revealed at showdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealedHand {
    pub player_id: String,
    pub cards: Vec<Card>,
}

/// Events sent from table to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum TableEvent {
    /// Direct to a joiner: their view of the table.
    Joined { snapshot: TableSnapshot },
    PlayerJoined {
        player_id: String,
        name: String,
        stack: i64,
    },
    PlayerLeft { player_id: String },
    /// Direct to each dealt player.
    HoleCards { cards: Vec<Card> },
    BlindsPosted {
        small_blind_player: String,
        small_blind_amount: i64,
        big_blind_player: String,
        big_blind_amount: i64,
        pot: i64,
    },
    BettingRoundStarted {
        phase: GamePhase,
        community_cards: Vec<Card>,
    },
    TurnChanged {
        player_id: String,
        time_limit_ms: u64,
    },
    PlayerActed {
        player_id: String,
        action: String,
        amount: i64,
        pot: i64,
    },
    HandEnded {
        payouts: Vec<Payout>,
        community_cards: Vec<Card>,
        revealed_hands: Vec<RevealedHand>,
    },
    Error { message: String },
}
