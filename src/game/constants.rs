//! Game-related constants and default configuration values.
//!
//! Centralizing these makes it easy to adjust per-table policy and to
//! tighten timings in tests. Everything here can be overridden through
//! [`crate::config::TableConfig`].

/// Default maximum number of seats at a table.
pub const DEFAULT_MAX_SEATS: usize = 6;

/// Minimum players required to start a hand.
pub const MIN_PLAYERS_TO_START: usize = 2;

/// Default blind sizes (in chips).
pub const DEFAULT_SMALL_BLIND: i64 = 10;
pub const DEFAULT_BIG_BLIND: i64 = 20;

/// Default stack granted to a joiner that does not specify a buy-in.
pub const DEFAULT_STARTING_CHIPS: i64 = 1000;

/// How long the current player may think before a fold is forced.
pub const DEFAULT_TURN_TIMEOUT_MS: u64 = 12_000;

/// Delay between hand resolution and the next automatic hand start.
pub const DEFAULT_POST_HAND_DELAY_MS: u64 = 10_000;

/// Hole cards dealt to each player.
pub const HOLE_CARDS_PER_PLAYER: usize = 2;

/// Community cards per street.
pub const FLOP_CARDS: usize = 3;
pub const TURN_CARDS: usize = 1;
pub const RIVER_CARDS: usize = 1;
