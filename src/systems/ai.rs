//! Dragon attack scheduling.
//!
//! A fixed round-robin over the four attack patterns with a random cooldown
//! between attacks. The dragon only reacts to the player by aiming at where
//! the player stood when it fired.

use glam::Vec3;
use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use crate::components::{Attack, AttackKind, DragonAi, Position};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::time_system::{GameClock, Timer, TimerQueue};

/// Draw the next cooldown, uniform in [min, max] seconds
pub fn roll_cooldown(rng: &mut impl Rng) -> f32 {
    rng.gen_range(DRAGON_COOLDOWN_MIN..=DRAGON_COOLDOWN_MAX)
}

/// Draw the damage of a new attack
pub fn roll_damage(rng: &mut impl Rng) -> i32 {
    rng.gen_range(DRAGON_DAMAGE_MIN..=DRAGON_DAMAGE_MAX)
}

/// Tick the dragon's cooldown and fire at most one attack.
/// Returns the spawned attack entity, if any.
pub fn update_dragon(
    world: &mut World,
    dragon_entity: Entity,
    player_entity: Entity,
    clock: &GameClock,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
    next_attack_id: &mut u64,
    dt: f32,
    rng: &mut impl Rng,
) -> Option<Entity> {
    let target = world.get::<&Position>(player_entity).ok()?.0;

    let (kind, origin) = {
        let (ai, pos) = world.query_one_mut::<(&mut DragonAi, &Position)>(dragon_entity).ok()?;
        ai.cooldown -= dt;
        if ai.cooldown > 0.0 {
            return None;
        }
        let kind = AttackKind::from_cursor(ai.pattern_cursor);
        ai.pattern_cursor = ai.pattern_cursor.wrapping_add(1);
        ai.cooldown = roll_cooldown(rng);
        (kind, pos.0 + Vec3::new(0.0, DRAGON_MOUTH_HEIGHT, 0.0))
    };

    let id = *next_attack_id;
    *next_attack_id += 1;

    let attack = Attack {
        id,
        kind,
        origin,
        target,
        spawn_time: clock.time,
        duration: kind.duration(),
        damage: roll_damage(rng),
    };

    // AOE markers sit on the aim point; everything else starts at the dragon
    let start = match kind {
        AttackKind::Aoe => target,
        _ => origin,
    };
    let entity = world.spawn((attack, Position(start)));
    timers.schedule_in(clock.time, attack.duration, Timer::ExpireAttack(entity));

    debug!(
        "Dragon fired {} #{} at ({:.1}, {:.1}) for {}",
        kind.name(),
        id,
        target.x,
        target.z,
        attack.damage
    );
    events.push(GameEvent::AttackSpawned { id, kind, target });
    Some(entity)
}
