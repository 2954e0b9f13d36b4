//! World constants and tuning
//!
//! Persisted separately from scores in LocalStorage. Every field has a
//! default so a partial JSON object is a valid override.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Injectable world and physics configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Physics (per tick) ===
    /// Downward acceleration added to vy every tick
    pub gravity: f32,
    /// Horizontal velocity multiplier when no direction is held
    pub friction: f32,
    /// Upward speed after stomping an enemy
    pub bounce_velocity: f32,
    pub player_speed: f32,
    pub jump_power: f32,

    // === Run ===
    pub initial_lives: u32,

    // === Player ===
    pub player_radius: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            gravity: GRAVITY,
            friction: FRICTION,
            bounce_velocity: BOUNCE_VELOCITY,
            player_speed: PLAYER_SPEED,
            jump_power: JUMP_POWER,

            initial_lives: INITIAL_LIVES,

            player_radius: PLAYER_RADIUS,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
        }
    }
}

impl GameConfig {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "orb_hop_config";

    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check construction-time preconditions
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("player_speed", self.player_speed)?;
        positive("jump_power", self.jump_power)?;
        positive("player_radius", self.player_radius)?;

        finite("gravity", self.gravity)?;
        finite("bounce_velocity", self.bounce_velocity)?;
        finite("spawn_x", self.spawn_x)?;
        finite("spawn_y", self.spawn_y)?;

        finite("friction", self.friction)?;
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::OutOfRange {
                field: "friction",
                value: self.friction,
                min: 0.0,
                max: 1.0,
            });
        }

        if self.initial_lives == 0 {
            return Err(ConfigError::NoLives);
        }

        Ok(())
    }

    /// X coordinate past which the level is complete
    pub fn level_end_x(&self) -> f32 {
        self.world_width * LEVEL_END_WIDTHS
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.level_end_x(), 2400.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{"gravity": 0.7, "initial_lives": 5}"#).unwrap();
        assert_eq!(config.gravity, 0.7);
        assert_eq!(config.initial_lives, 5);
        assert_eq!(config.world_width, WORLD_WIDTH);
        assert_eq!(config.jump_power, JUMP_POWER);
    }

    #[test]
    fn test_rejects_zero_world() {
        let config = GameConfig {
            world_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "world_width", .. })
        ));

        let config = GameConfig {
            world_height: -600.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "world_height", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_friction_and_lives() {
        let config = GameConfig {
            friction: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { .. })));

        let config = GameConfig {
            initial_lives: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoLives)));

        let config = GameConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "gravity" })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(GameConfig::from_json(r#"{"world_width": -1}"#).is_err());
    }
}
