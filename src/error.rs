//! Error types
//!
//! The simulation tick is infallible. Errors only surface at construction
//! (bad configuration), at the input boundary (unknown gesture names) and in
//! leaderboard persistence, which callers log and move past.

use thiserror::Error;

/// Invalid game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A dimension or rate that must be strictly positive is not
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// NaN or infinite value
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    /// Value outside its allowed closed range
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A run needs at least one life
    #[error("initial_lives must be at least 1")]
    NoLives,

    /// Malformed JSON
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Input adapter errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown mobile action: {0:?}")]
    UnknownAction(String),
}

/// Leaderboard persistence errors
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// Backing store unavailable or rejected the write
    #[error("storage error: {0}")]
    Storage(String),

    #[error("failed to encode leaderboard: {0}")]
    Serialize(#[from] serde_json::Error),
}
