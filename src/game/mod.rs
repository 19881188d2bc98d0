pub mod constants;
pub mod deck;
pub mod error;
pub mod events;
pub mod hand;
pub mod player;
pub mod table;

pub use deck::{Card, Deck};
pub use error::{GameError, GameResult};
pub use events::{Outbound, Recipient, TableEvent};
pub use hand::{evaluate_hand, determine_winners, HandCategory, HandRank};
pub use player::{Player, PlayerAction, PlayerState};
pub use table::{GamePhase, Table};
