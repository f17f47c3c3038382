//! Dragon boss constants.

use glam::Vec3;

/// Default dragon health pool
pub const DRAGON_MAX_HEALTH: i32 = 500;
/// Where the dragon stands in the arena
pub const DRAGON_POSITION: Vec3 = Vec3::new(0.0, 0.0, -8.0);
/// Height projectiles leave the dragon's mouth at
pub const DRAGON_MOUTH_HEIGHT: f32 = 2.0;

/// Shortest cooldown between dragon attacks (seconds)
pub const DRAGON_COOLDOWN_MIN: f32 = 2.0;
/// Longest cooldown between dragon attacks (seconds)
pub const DRAGON_COOLDOWN_MAX: f32 = 4.0;

/// Lowest damage roll of a dragon attack
pub const DRAGON_DAMAGE_MIN: i32 = 20;
/// Highest damage roll of a dragon attack (inclusive)
pub const DRAGON_DAMAGE_MAX: i32 = 29;

/// Flight time of a fireball (seconds)
pub const FIREBALL_DURATION: f32 = 1.5;
/// Flight time of a breath gout (seconds)
pub const BREATH_DURATION: f32 = 2.0;
/// Time until an AOE marker detonates (seconds)
pub const AOE_DURATION: f32 = 3.0;
/// Travel time of a charge shockwave (seconds)
pub const CHARGE_DURATION: f32 = 1.5;
