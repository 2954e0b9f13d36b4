//! Orb Hop - A side-scrolling circle platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, collisions, game state)
//! - `engine`: Lifecycle controller that drives the simulation once per frame
//! - `input`: Keyboard and touch-gesture adapter
//! - `renderer`: Draw-list construction and Canvas 2D painting
//! - `leaderboard`: Ranked score store
//! - `config`: Injectable world constants

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod leaderboard;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use engine::{Engine, GameObserver};
pub use error::{ConfigError, InputError, LeaderboardError};
pub use input::{InputState, MobileAction};
pub use leaderboard::Leaderboard;

/// Game configuration constants
pub mod consts {
    /// World dimensions (the visible viewport is one world width across)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Physics defaults, in pixels per tick
    pub const GRAVITY: f32 = 0.5;
    pub const FRICTION: f32 = 0.85;
    pub const BOUNCE_VELOCITY: f32 = 8.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const JUMP_POWER: f32 = 12.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_Y: f32 = 400.0;
    pub const INITIAL_LIVES: u32 = 3;

    /// Scoring
    pub const STOMP_POINTS: u64 = 50;
    pub const LEVEL_BONUS: u64 = 100;

    /// How far below the world floor the player may drop before losing a life
    pub const FALL_MARGIN: f32 = 100.0;
    /// Level end sits this many world widths from the origin
    pub const LEVEL_END_WIDTHS: f32 = 3.0;
}
