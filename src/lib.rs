//! Hold'em Table Engine
//!
//! The game-logic core of a real-time multiplayer card table: hand
//! lifecycle, turn sequencing, betting validation, pot accounting, and
//! timeout-driven forced folds. Transport, replication, and accounts are
//! external collaborators that drive a [`session::TableSession`] through
//! its serialized event queue and consume its outbound notifications.

pub mod config;
pub mod game;
pub mod session;

pub use config::TableConfig;
pub use game::{Card, GameError, GamePhase, GameResult, PlayerAction, Table};
pub use session::{SessionHandle, TableSession};
