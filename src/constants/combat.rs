//! Combat system constants.

/// Minimum seconds between two accepted player attacks
pub const PLAYER_ATTACK_COOLDOWN: f32 = 0.5;
/// How long the attack animation flag stays set (seconds)
pub const PLAYER_ATTACK_ANIMATION: f32 = 0.3;
/// Maximum planar distance at which a player swing reaches the dragon
pub const PLAYER_ATTACK_RANGE: f32 = 8.0;
/// Damage per player level on every landed swing
pub const PLAYER_DAMAGE_PER_LEVEL: i32 = 10;
/// Weapon bonus for the starter weapon
pub const STARTER_WEAPON_BONUS: i32 = 20;
/// Weapon bonus for any crafted weapon
pub const CRAFTED_WEAPON_BONUS: i32 = 50;

/// Invulnerability window after taking a hit (seconds)
pub const INVULNERABILITY_DURATION: f32 = 1.0;

/// A projectile only connects once it has covered this share of its flight
pub const PROJECTILE_HIT_PROGRESS: f32 = 0.8;
/// Planar distance to the aim point under which a projectile connects
pub const PROJECTILE_HIT_DISTANCE: f32 = 1.5;
/// Hit radius checked when an AOE marker expires.
/// Deliberately not the same as `AOE_VISUAL_RADIUS`.
pub const AOE_HIT_RADIUS: f32 = 3.0;
/// Radius the AOE marker is drawn with
pub const AOE_VISUAL_RADIUS: f32 = 4.0;
