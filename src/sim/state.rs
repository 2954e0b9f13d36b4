//! Game state and core simulation types
//!
//! `GameState` is the whole simulation context: run counters, every entity,
//! and the seeded RNG used to generate level content.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{LevelLayout, generate_level};
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Simulation advances every tick
    Active,
    /// Simulation frozen, state stays renderable
    Paused,
    /// Lives exhausted; only a restart leaves this phase
    GameOver,
}

/// State-change notification produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LevelChanged(u32),
    LivesChanged(u32),
    GameOver,
}

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal midline; landings only count from above it
    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Cosmetic platform tag (renderer picks colors from it)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Ground,
    Ledge,
}

/// A static platform. Never mutated after generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

/// The player-controlled circle
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Horizontal speed while a direction is held
    pub speed: f32,
    /// Initial upward speed of a jump
    pub jump_power: f32,
    /// Re-derived every tick from platform contact
    pub on_ground: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.spawn_x, config.spawn_y),
            vel: Vec2::ZERO,
            radius: config.player_radius,
            speed: config.player_speed,
            jump_power: config.jump_power,
            on_ground: false,
        }
    }

    /// Move back to spawn with zero velocity
    pub fn respawn(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
    }
}

/// A pickup worth points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub pos: Vec2,
    pub radius: f32,
    pub value: u64,
    /// Flips to true exactly once
    pub collected: bool,
}

/// Whether an enemy still takes part in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Active,
    Defeated,
}

/// A patrolling ground enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Horizontal velocity; sign flips at the patrol bounds
    pub vx: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub state: EnemyState,
}

impl Enemy {
    pub fn is_active(&self) -> bool {
        self.state == EnemyState::Active
    }

    /// Advance one tick, reflecting at the patrol bounds
    pub fn patrol(&mut self) {
        self.rect.x += self.vx;
        if self.rect.x <= self.min_x || self.rect.x >= self.max_x {
            self.vx = -self.vx;
        }
    }
}

/// Horizontal scroll offset
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Keep the player a third of the way into the view, never left of the origin
    pub fn follow(&mut self, player_x: f32, world_width: f32) {
        self.x = (player_x - world_width / 3.0).max(0.0);
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Level content RNG
    pub rng: Pcg32,
    pub score: u64,
    /// 1-based level number
    pub level: u32,
    pub lives: u32,
    pub phase: RunPhase,
    pub player: Player,
    /// Generation order; index 0 is always the ground
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    pub enemies: Vec<Enemy>,
    pub camera: Camera,
    /// Crossing this x advances the level
    pub level_end_x: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh run at level 1 with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_validated(config, seed))
    }

    /// Fresh run from a config that has already passed `validate`
    pub(crate) fn with_validated(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            level: 1,
            lives: config.initial_lives,
            phase: RunPhase::Active,
            player: Player::new(&config),
            platforms: Vec::new(),
            collectibles: Vec::new(),
            enemies: Vec::new(),
            camera: Camera::default(),
            level_end_x: config.level_end_x(),
            time_ticks: 0,
        };

        state.load_level();
        state
    }

    /// Player spawn point
    pub fn spawn(&self) -> Vec2 {
        Vec2::new(self.config.spawn_x, self.config.spawn_y)
    }

    /// Replace all level content with a fresh layout for `self.level`
    pub fn load_level(&mut self) {
        let LevelLayout {
            platforms,
            collectibles,
            enemies,
        } = generate_level(
            self.level,
            self.config.world_width,
            self.config.world_height,
            &mut self.rng,
        );
        log::debug!(
            "Level {}: {} platforms, {} collectibles, {} enemies",
            self.level,
            platforms.len(),
            collectibles.len(),
            enemies.len()
        );

        self.platforms = platforms;
        self.collectibles = collectibles;
        self.enemies = enemies;
        self.level_end_x = self.config.level_end_x();
    }

    /// Put the player back at spawn and re-center the camera on them
    pub fn respawn_player(&mut self) {
        let spawn = self.spawn();
        self.player.respawn(spawn);
        self.camera.follow(self.player.pos.x, self.config.world_width);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(GameConfig::default(), 7).unwrap();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, RunPhase::Active);
        assert_eq!(state.player.pos, Vec2::new(100.0, 400.0));
        assert_eq!(state.player.radius, 20.0);
        assert!(!state.player.on_ground);
        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.level_end_x, 2400.0);
        assert_eq!(state.platforms.len(), 1 + 13);
        assert_eq!(state.collectibles.len(), 25);
        assert_eq!(state.enemies.len(), 4);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = GameConfig {
            world_height: 0.0,
            ..Default::default()
        };
        assert!(GameState::new(config, 1).is_err());
    }

    #[test]
    fn test_enemy_patrol_reflects() {
        let mut enemy = Enemy {
            rect: Rect::new(598.0, 500.0, 30.0, 30.0),
            vx: 2.0,
            min_x: 400.0,
            max_x: 600.0,
            state: EnemyState::Active,
        };
        enemy.patrol();
        assert_eq!(enemy.rect.x, 600.0);
        assert_eq!(enemy.vx, -2.0);
        enemy.patrol();
        assert_eq!(enemy.rect.x, 598.0);
        assert_eq!(enemy.vx, -2.0);
    }

    #[test]
    fn test_camera_clamped_at_origin() {
        let mut camera = Camera::default();
        camera.follow(100.0, 800.0);
        assert_eq!(camera.x, 0.0);
        camera.follow(1000.0, 900.0);
        assert_eq!(camera.x, 700.0);
    }
}
