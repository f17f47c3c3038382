//! Session tunables, overridable from a JSON file.
//!
//! Everything defaults to the values in `constants`; a config file only
//! needs to name the fields it changes.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigError;
use crate::systems::movement::MovementParams;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub world_half_extent: f32,
    pub arena_half_extent: f32,
    pub explore_speed: f32,
    pub battle_speed: f32,
    pub dodge_multiplier: f32,
    pub dragon_max_health: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            world_half_extent: WORLD_HALF_EXTENT,
            arena_half_extent: ARENA_HALF_EXTENT,
            explore_speed: EXPLORE_SPEED,
            battle_speed: BATTLE_SPEED,
            dodge_multiplier: DODGE_SPEED_MULTIPLIER,
            dragon_max_health: DRAGON_MAX_HEALTH,
        }
    }
}

impl SimConfig {
    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_half_extent", self.world_half_extent),
            ("arena_half_extent", self.arena_half_extent),
            ("explore_speed", self.explore_speed),
            ("battle_speed", self.battle_speed),
            ("dodge_multiplier", self.dodge_multiplier),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }
        if self.dragon_max_health <= 0 {
            return Err(ConfigError::Invalid {
                field: "dragon_max_health",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    pub fn explore_movement(&self) -> MovementParams {
        MovementParams {
            speed: self.explore_speed,
            half_extent: self.world_half_extent,
        }
    }

    pub fn battle_movement(&self) -> MovementParams {
        MovementParams {
            speed: self.battle_speed,
            half_extent: self.arena_half_extent,
        }
    }
}
