//! Plain-data snapshot of everything the HUD and cards display.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::components::{CombatStatus, Equipment, Experience, Health, Mana, ResourceKind, Resources};
use crate::systems::inventory::check_craft;
use crate::systems::item_defs;
use crate::systems::projectile::{active_attack_count, has_active_attacks};
use crate::systems::sections::{ready_for_battle, Section};
use crate::systems::xp_progress;

use super::game_state::GameState;
use super::GameMode;

/// Everything the HUD bars, cards and craft buttons read in one frame.
///
/// Plain data; rebuilt on every call to `GameEngine::hud`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub mode: GameMode,
    pub time: f64,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub level: u32,
    pub experience: u32,
    /// 0.0..1.0 toward the next level
    pub level_progress: f32,
    pub resources: BTreeMap<ResourceKind, u32>,
    pub equipment: Equipment,
    /// Recipes the player can afford right now
    pub craftable: Vec<&'static str>,
    pub unlocked_sections: Vec<Section>,
    pub claimed_rewards: Vec<Section>,
    pub ready_for_battle: bool,
    pub nearby_station: Option<Section>,
    pub dragon_health: i32,
    pub dragon_max_health: i32,
    pub attacks_in_flight: bool,
    /// Dragon attacks still travelling or waiting to resolve
    pub active_attacks: usize,
    pub attacking: bool,
    pub dodging: bool,
    pub invulnerable: bool,
}

pub(super) fn snapshot(state: &GameState, mode: GameMode, nearby_station: Option<Section>) -> HudSnapshot {
    let world = &state.world;
    let player = state.player_entity;

    let health = world.get::<&Health>(player).map(|h| *h).unwrap_or(Health::new(0));
    let mana = world.get::<&Mana>(player).map(|m| *m).unwrap_or(Mana::new(0));
    let exp = world.get::<&Experience>(player).map(|e| *e).unwrap_or_default();
    let status = world
        .get::<&CombatStatus>(player)
        .map(|s| *s)
        .unwrap_or_default();
    let equipment = world
        .get::<&Equipment>(player)
        .map(|e| *e)
        .unwrap_or_else(|_| Equipment::starter());
    let resources: BTreeMap<ResourceKind, u32> = world
        .get::<&Resources>(player)
        .map(|r| r.iter().collect())
        .unwrap_or_default();
    let dragon = world
        .get::<&Health>(state.dragon_entity)
        .map(|h| *h)
        .unwrap_or(Health::new(0));

    let craftable = item_defs::craftable()
        .filter(|def| check_craft(world, player, def.name).is_ok())
        .map(|def| def.name)
        .collect();

    HudSnapshot {
        mode,
        time: state.game_clock.time,
        health: health.current,
        max_health: health.max,
        mana: mana.current,
        max_mana: mana.max,
        level: exp.level,
        experience: exp.total,
        level_progress: xp_progress(&exp),
        resources,
        equipment,
        craftable,
        unlocked_sections: state.sections.unlocked().to_vec(),
        claimed_rewards: state.sections.claimed().to_vec(),
        ready_for_battle: ready_for_battle(&state.sections, exp.level),
        nearby_station,
        dragon_health: dragon.current,
        dragon_max_health: dragon.max,
        attacks_in_flight: has_active_attacks(world),
        active_attacks: active_attack_count(world),
        attacking: status.attacking,
        dodging: status.dodging,
        invulnerable: status.invulnerable,
    }
}
