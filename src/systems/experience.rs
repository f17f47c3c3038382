//! Experience and leveling system.

use crate::components::{Experience, Health, Mana};
use crate::constants::*;

/// Level implied by a cumulative experience total
pub fn level_for_experience(total: u32) -> u32 {
    total / XP_PER_LEVEL + 1
}

/// Calculate XP progress toward next level (0.0 to 1.0)
pub fn xp_progress(exp: &Experience) -> f32 {
    (exp.total % XP_PER_LEVEL) as f32 / XP_PER_LEVEL as f32
}

/// Add XP and re-derive the level. Returns the number of levels gained.
pub fn grant_xp(exp: &mut Experience, amount: u32) -> u32 {
    exp.total = exp.total.saturating_add(amount);
    let new_level = level_for_experience(exp.total);
    let gained = new_level.saturating_sub(exp.level);
    exp.level = new_level.max(exp.level);
    gained
}

/// Apply the stat growth for `levels` level-ups and top both pools up
pub fn apply_level_ups(health: &mut Health, mana: &mut Mana, levels: u32) {
    if levels == 0 {
        return;
    }
    let levels = levels as i32;
    health.max += LEVEL_UP_HEALTH_BONUS * levels;
    mana.max += LEVEL_UP_MANA_BONUS * levels;
    health.current = health.max;
    mana.current = mana.max;
}
