use crate::game::constants::{
    DEFAULT_BIG_BLIND, DEFAULT_MAX_SEATS, DEFAULT_POST_HAND_DELAY_MS, DEFAULT_SMALL_BLIND,
    DEFAULT_STARTING_CHIPS, DEFAULT_TURN_TIMEOUT_MS,
};
use std::env;

/// Table policy supplied by the hosting layer.
///
/// None of these values are hardcoded in the engine; the transport layer
/// may build one per table, or pull overrides from the environment with
/// [`TableConfig::from_env`].
#[derive(Clone, Debug)]
pub struct TableConfig {
    pub small_blind: i64,
    pub big_blind: i64,
    pub max_seats: usize,
    pub starting_chips: i64,
    pub turn_timeout_ms: u64,
    pub post_hand_delay_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            max_seats: DEFAULT_MAX_SEATS,
            starting_chips: DEFAULT_STARTING_CHIPS,
            turn_timeout_ms: DEFAULT_TURN_TIMEOUT_MS,
            post_hand_delay_ms: DEFAULT_POST_HAND_DELAY_MS,
        }
    }
}

impl TableConfig {
    /// Build a config from environment variables, falling back to the
    /// compiled defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            small_blind: env_i64("TABLE_SMALL_BLIND", defaults.small_blind),
            big_blind: env_i64("TABLE_BIG_BLIND", defaults.big_blind),
            max_seats: env_usize("TABLE_MAX_SEATS", defaults.max_seats),
            starting_chips: env_i64("TABLE_STARTING_CHIPS", defaults.starting_chips),
            turn_timeout_ms: env_u64("TABLE_TURN_TIMEOUT_MS", defaults.turn_timeout_ms),
            post_hand_delay_ms: env_u64("TABLE_POST_HAND_DELAY_MS", defaults.post_hand_delay_ms),
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    parse_env(key, default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    parse_env(key, default)
}

fn env_usize(key: &str, default: usize) -> usize {
    parse_env(key, default)
}

fn parse_env<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable {}={:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
