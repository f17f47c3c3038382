//! Dragon attack lifecycle: projectile travel, hit detection and expiry.
//!
//! The attack lifecycle:
//! 1. Spawned by the dragon scheduler with an expiry timer armed
//! 2. Each frame, travelling attacks are moved along origin -> target
//! 3. A travelling attack past 80% of its flight and within 1.5 units of its
//!    aim point connects once and is despawned immediately
//! 4. When the expiry timer fires, whatever is left is despawned; an AOE
//!    marker checks the live player position against its hit radius first

use hecs::{Entity, World};
use log::trace;

use crate::components::{planar_distance, Attack, HitResolution, Position};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::systems::combat::{damage_player, HitOutcome};
use crate::time_system::{GameClock, TimerQueue};

/// Whether a travelling attack connects this frame
pub fn projectile_connects(attack: &Attack, now: f64) -> bool {
    let progress = attack.progress(now);
    progress > PROJECTILE_HIT_PROGRESS
        && planar_distance(attack.position_at(now), attack.target) < PROJECTILE_HIT_DISTANCE
}

/// Advance every travelling attack and resolve the ones that connect.
/// Returns the attacks that were resolved and despawned this frame.
pub fn update_attacks(
    world: &mut World,
    player_entity: Entity,
    clock: &GameClock,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
) -> Vec<Entity> {
    let now = clock.time;
    let mut connected: Vec<(Entity, Attack)> = Vec::new();

    for (entity, (pos, attack)) in world.query_mut::<(&mut Position, &Attack)>() {
        if attack.kind.resolution() != HitResolution::Projectile {
            continue;
        }
        pos.0 = attack.position_at(now);
        if projectile_connects(attack, now) {
            connected.push((entity, *attack));
        }
    }

    let mut resolved = Vec::with_capacity(connected.len());
    for (entity, attack) in connected {
        damage_player(world, player_entity, attack.kind, attack.damage, clock, timers, events);
        let _ = world.despawn(entity);
        events.push(GameEvent::AttackEnded {
            id: attack.id,
            kind: attack.kind,
        });
        resolved.push(entity);
    }
    resolved
}

/// Handle an attack's expiry timer. Returns the hit outcome if an AOE resolved.
///
/// Attacks that already connected, or were cleared by a battle reset, are
/// gone by the time their timer fires; that is a no-op.
pub fn expire_attack(
    world: &mut World,
    player_entity: Entity,
    attack_entity: Entity,
    clock: &GameClock,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
) -> Option<HitOutcome> {
    let attack = match world.get::<&Attack>(attack_entity) {
        Ok(attack) => *attack,
        Err(_) => {
            trace!("Expiry for {:?} ignored, attack already gone", attack_entity);
            return None;
        }
    };
    let _ = world.despawn(attack_entity);
    events.push(GameEvent::AttackEnded {
        id: attack.id,
        kind: attack.kind,
    });

    if attack.kind.resolution() != HitResolution::AreaOnExpiry {
        return None;
    }

    // Live position, not the snapshot the marker was placed on
    let player_pos = world.get::<&Position>(player_entity).ok()?.0;
    if planar_distance(player_pos, attack.target) < AOE_HIT_RADIUS {
        Some(damage_player(world, player_entity, attack.kind, attack.damage, clock, timers, events))
    } else {
        None
    }
}

/// Despawn every active attack (battle end or reset). Their timers become no-ops.
pub fn clear_attacks(world: &mut World) -> usize {
    let attacks: Vec<Entity> = world.query::<&Attack>().iter().map(|(e, _)| e).collect();
    let count = attacks.len();
    for entity in attacks {
        let _ = world.despawn(entity);
    }
    count
}

/// Check if there are any active attacks in the world
pub fn has_active_attacks(world: &World) -> bool {
    world.query::<&Attack>().iter().next().is_some()
}

/// Number of dragon attacks currently in flight or on the ground
pub fn active_attack_count(world: &World) -> usize {
    world.query::<&Attack>().iter().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AttackKind, CombatStatus, Health, Player};
    use crate::time_system::Timer;
    use glam::Vec3;

    fn spawn_player(world: &mut World, at: Vec3) -> Entity {
        world.spawn((Player, Position(at), Health::new(100), CombatStatus::default()))
    }

    fn spawn_attack(world: &mut World, kind: AttackKind, origin: Vec3, target: Vec3, duration: f32) -> Entity {
        let attack = Attack {
            id: 1,
            kind,
            origin,
            target,
            spawn_time: 0.0,
            duration,
            damage: 25,
        };
        world.spawn((attack, Position(origin)))
    }

    fn health(world: &World, player: Entity) -> i32 {
        world.get::<&Health>(player).unwrap().current
    }

    #[test]
    fn test_fireball_connects_late_in_flight() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::new(0.0, 0.0, 5.0));
        let fireball = spawn_attack(
            &mut world,
            AttackKind::Fireball,
            Vec3::new(0.0, 2.0, -5.0),
            Vec3::new(0.0, 0.0, 5.0),
            FIREBALL_DURATION,
        );
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        // Halfway: still flying
        clock.advance(FIREBALL_DURATION * 0.5);
        assert!(update_attacks(&mut world, player, &clock, &mut timers, &mut events).is_empty());
        assert_eq!(health(&world, player), 100);
        assert!(world.contains(fireball));

        // 95%: 0.5 units from the aim point
        clock.advance(FIREBALL_DURATION * 0.45);
        let resolved = update_attacks(&mut world, player, &clock, &mut timers, &mut events);
        assert_eq!(resolved, vec![fireball]);
        assert_eq!(health(&world, player), 75);
        assert!(!world.contains(fireball));
    }

    #[test]
    fn test_fireball_damages_once() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::ZERO);
        spawn_attack(&mut world, AttackKind::Fireball, Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO, 1.0);
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        clock.advance(0.9);
        update_attacks(&mut world, player, &clock, &mut timers, &mut events);
        // Clear invulnerability so a duplicate resolution would show up
        world.get::<&mut CombatStatus>(player).unwrap().invulnerable = false;
        clock.advance(0.05);
        update_attacks(&mut world, player, &clock, &mut timers, &mut events);
        assert_eq!(health(&world, player), 75);
    }

    #[test]
    fn test_projectile_that_never_frames_in_window_deals_nothing() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::ZERO);
        let fireball = spawn_attack(&mut world, AttackKind::Fireball, Vec3::new(0.0, 0.0, -30.0), Vec3::ZERO, 1.5);
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        // 85%: still 4.5 units out, too far to connect
        clock.advance(1.275);
        assert!(update_attacks(&mut world, player, &clock, &mut timers, &mut events).is_empty());

        // Expiry arrives before another frame lands in the hit window
        clock.advance(0.225);
        let outcome = expire_attack(&mut world, player, fireball, &clock, &mut timers, &mut events);
        assert_eq!(outcome, None);
        assert_eq!(health(&world, player), 100);
        assert!(!world.contains(fireball));
    }

    #[test]
    fn test_aoe_hits_inside_radius() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::new(2.9, 0.0, 0.0));
        let aoe = spawn_attack(&mut world, AttackKind::Aoe, Vec3::ZERO, Vec3::ZERO, AOE_DURATION);
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        clock.advance(AOE_DURATION);
        let outcome = expire_attack(&mut world, player, aoe, &clock, &mut timers, &mut events);
        assert_eq!(outcome, Some(HitOutcome::Damaged(25)));
        assert_eq!(health(&world, player), 75);
        assert_eq!(timers.peek_next().map(|(t, _)| t), Some(Timer::EndInvulnerability));
    }

    #[test]
    fn test_aoe_misses_outside_radius() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::new(0.0, 0.0, 3.1));
        let aoe = spawn_attack(&mut world, AttackKind::Aoe, Vec3::ZERO, Vec3::ZERO, AOE_DURATION);
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        clock.advance(AOE_DURATION);
        let outcome = expire_attack(&mut world, player, aoe, &clock, &mut timers, &mut events);
        assert_eq!(outcome, None);
        assert_eq!(health(&world, player), 100);
    }

    #[test]
    fn test_aoe_uses_live_position_and_ignores_visual_radius() {
        let mut world = World::new();
        // Standing on the centre when it was placed...
        let player = spawn_player(&mut world, Vec3::ZERO);
        let aoe = spawn_attack(&mut world, AttackKind::Aoe, Vec3::ZERO, Vec3::ZERO, AOE_DURATION);
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        // ...but inside the drawn circle and outside the hit radius on expiry
        world.get::<&mut Position>(player).unwrap().0 = Vec3::new(3.5, 0.0, 0.0);
        assert!(3.5 < AOE_VISUAL_RADIUS);

        clock.advance(AOE_DURATION);
        assert_eq!(expire_attack(&mut world, player, aoe, &clock, &mut timers, &mut events), None);
        assert_eq!(health(&world, player), 100);
    }

    #[test]
    fn test_aoe_is_not_resolved_per_frame() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::ZERO);
        let aoe = spawn_attack(&mut world, AttackKind::Aoe, Vec3::ZERO, Vec3::ZERO, AOE_DURATION);
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        clock.advance(AOE_DURATION - 0.1);
        assert!(update_attacks(&mut world, player, &clock, &mut timers, &mut events).is_empty());
        assert!(world.contains(aoe));
        assert_eq!(health(&world, player), 100);
    }

    #[test]
    fn test_expiring_missing_attack_is_noop() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::ZERO);
        let aoe = spawn_attack(&mut world, AttackKind::Aoe, Vec3::ZERO, Vec3::ZERO, AOE_DURATION);
        assert_eq!(clear_attacks(&mut world), 1);
        assert!(!has_active_attacks(&world));

        let clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        assert_eq!(expire_attack(&mut world, player, aoe, &clock, &mut timers, &mut events), None);
        assert!(events.is_empty());
    }
}
