//! Game simulation - per-frame advancement for exploration and battle.

use crate::components::{Health, Position};
use crate::events::EventQueue;
use crate::systems::sections::{nearby_station, Section};
use crate::systems::{ai, combat, movement, projectile};
use crate::time_system::Timer;

use hecs::Entity;
use log::trace;

use super::game_state::GameState;

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Fire every timer due at the current clock time, earliest first.
/// Returns how many fired.
pub fn run_timers(state: &mut GameState, events: &mut EventQueue) -> usize {
    let mut fired = 0;
    while let Some(timer) = state.timers.pop_due(state.game_clock.time) {
        trace!("Timer {:?} fired at {:.3}", timer, state.game_clock.time);
        match timer {
            Timer::EndInvulnerability => combat::end_invulnerability(&mut state.world, state.player_entity),
            Timer::EndAttackAnimation => combat::end_attack_animation(&mut state.world, state.player_entity),
            Timer::ExpireAttack(attack) => {
                projectile::expire_attack(
                    &mut state.world,
                    state.player_entity,
                    attack,
                    &state.game_clock,
                    &mut state.timers,
                    events,
                );
            }
        }
        fired += 1;
    }
    fired
}

/// Advance one exploration frame. Returns the station the player stands at.
pub fn step_exploration(state: &mut GameState, dt: f32) -> Option<Section> {
    movement::explore_move(
        &mut state.world,
        state.player_entity,
        state.config.explore_movement(),
        dt,
    );
    let pos = state
        .world
        .get::<&Position>(state.player_entity)
        .ok()?
        .0;
    nearby_station(pos)
}

/// Advance one battle frame: movement, dragon scheduling, projectile travel.
pub fn step_battle(state: &mut GameState, events: &mut EventQueue, dt: f32) {
    movement::battle_move(
        &mut state.world,
        state.player_entity,
        state.config.battle_movement(),
        state.config.dodge_multiplier,
        dt,
    );

    ai::update_dragon(
        &mut state.world,
        state.dragon_entity,
        state.player_entity,
        &state.game_clock,
        &mut state.timers,
        events,
        &mut state.next_attack_id,
        dt,
        &mut state.rng,
    );

    projectile::update_attacks(
        &mut state.world,
        state.player_entity,
        &state.game_clock,
        &mut state.timers,
        events,
    );
}

/// Check the win/lose conditions. The dragon falling wins even if the
/// player dropped on the same frame.
pub fn battle_outcome(state: &GameState) -> Option<BattleOutcome> {
    let depleted = |entity: Entity| {
        state
            .world
            .get::<&Health>(entity)
            .map(|h| h.is_depleted())
            .unwrap_or(false)
    };

    if depleted(state.dragon_entity) {
        Some(BattleOutcome::Victory)
    } else if depleted(state.player_entity) {
        Some(BattleOutcome::Defeat)
    } else {
        None
    }
}
