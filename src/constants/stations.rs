//! Station layout and reward constants.

/// Distance within which the player counts as standing at a station
pub const STATION_INTERACT_RADIUS: f32 = 3.0;
/// Experience granted by claiming a section reward
pub const SECTION_REWARD_XP: u32 = 1000;
