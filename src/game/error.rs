//! Game-related error types.
//!
//! Every rejected action is a typed value returned to the caller; the
//! session relays it to the offending client only and never mutates
//! table state on the way out.

use std::fmt;

/// Errors that can occur during game operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    // Table errors
    TableFull,
    PlayerAlreadySeated,
    PlayerNotAtTable { player_id: String },

    // Action errors
    NotYourTurn,
    CannotAct,
    CannotCheck { current_bet: i64 },
    BetTooSmall { minimum: i64, attempted: i64 },
    RaiseTooSmall { min_raise: i64, attempted: i64 },

    // Lifecycle errors
    NotEnoughPlayers { required: usize, seated: usize },
    HandInProgress,
    InvalidPhaseTransition { from: String, to: String },

    // Generic
    InternalError(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::TableFull => write!(f, "Table is full"),
            GameError::PlayerAlreadySeated => write!(f, "You are already at this table"),
            GameError::PlayerNotAtTable { player_id } => {
                write!(f, "Player not at this table: {}", player_id)
            }

            GameError::NotYourTurn => write!(f, "Not your turn"),
            GameError::CannotAct => write!(f, "You cannot act"),
            GameError::CannotCheck { current_bet } => {
                write!(f, "Cannot check, you need to call {} or fold", current_bet)
            }
            GameError::BetTooSmall { minimum, attempted } => {
                write!(f, "Bet of {} is below the current bet of {}", attempted, minimum)
            }
            GameError::RaiseTooSmall {
                min_raise,
                attempted,
            } => {
                write!(
                    f,
                    "Raise of {} is too small. Minimum raise: {}",
                    attempted, min_raise
                )
            }

            GameError::NotEnoughPlayers { required, seated } => {
                write!(
                    f,
                    "At least {} players required to start (have {})",
                    required, seated
                )
            }
            GameError::HandInProgress => write!(f, "A hand is already in progress"),
            GameError::InvalidPhaseTransition { from, to } => {
                write!(f, "Invalid phase transition: {} -> {}", from, to)
            }

            GameError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
