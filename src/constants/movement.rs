//! Movement constants for exploration and battle.

use glam::Vec3;

/// Walking speed while exploring (units per second)
pub const EXPLORE_SPEED: f32 = 6.0;
/// Half-extent of the square exploration world
pub const WORLD_HALF_EXTENT: f32 = 20.0;

/// Movement speed inside the arena (units per second)
pub const BATTLE_SPEED: f32 = 8.0;
/// Speed multiplier while dodging
pub const DODGE_SPEED_MULTIPLIER: f32 = 2.0;
/// Half-extent of the square battle arena
pub const ARENA_HALF_EXTENT: f32 = 12.0;

/// Where the player is placed when a battle starts
pub const ARENA_PLAYER_START: Vec3 = Vec3::new(0.0, 0.0, 8.0);
