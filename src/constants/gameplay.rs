//! Core gameplay constants (player stats, XP).

/// Player's default starting health
pub const PLAYER_STARTING_HEALTH: i32 = 100;
/// Player's default starting mana
pub const PLAYER_STARTING_MANA: i32 = 50;

/// Experience needed per level (level = total / this + 1)
pub const XP_PER_LEVEL: u32 = 1000;
/// Max health granted for each level gained
pub const LEVEL_UP_HEALTH_BONUS: i32 = 20;
/// Max mana granted for each level gained
pub const LEVEL_UP_MANA_BONUS: i32 = 10;

/// Level required before the dragon can be challenged
pub const BATTLE_REQUIRED_LEVEL: u32 = 5;
/// Sections that must be unlocked before the dragon can be challenged
pub const BATTLE_REQUIRED_SECTIONS: usize = 4;

/// Seed the headless driver uses when none is given
pub const DEFAULT_DEMO_SEED: u64 = 0x5EED_CAFE;
