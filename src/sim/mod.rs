//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{circle_vs_circle, circle_vs_rect, enemy_contact, platform_landing};
pub use level::{LevelLayout, generate_collectibles, generate_enemies, generate_level, generate_platforms};
pub use state::{
    Camera, Collectible, Enemy, EnemyState, GameEvent, GameState, Platform, PlatformKind, Player,
    Rect, RunPhase,
};
pub use tick::{TickInput, advance_level, lose_life, tick};
