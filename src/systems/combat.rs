//! Combat system functions: damage intake, invulnerability and player swings.

use hecs::{Entity, World};
use log::debug;

use crate::components::{
    AttackKind, CombatStatus, DragonAi, Equipment, Experience, Health, Position,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::systems::item_defs;
use crate::time_system::{GameClock, Timer, TimerQueue};

/// Outcome of a dragon attack reaching the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Damage applied, invulnerability window opened
    Damaged(i32),
    /// Player was invulnerable; the hit is dropped
    Ignored,
}

/// Outcome of a player attack command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Still on cooldown; nothing happened
    Rejected,
    /// Swing accepted but the dragon was out of reach
    Missed,
    /// Swing accepted and landed for this much damage
    Hit(i32),
}

/// Damage a player swing deals: level × 10 plus the weapon bonus
pub fn player_attack_damage(level: u32, weapon: &str) -> i32 {
    level as i32 * PLAYER_DAMAGE_PER_LEVEL + item_defs::weapon_bonus(weapon)
}

/// Apply a dragon hit to the player.
/// Opens a fixed invulnerability window; hits inside the window are ignored.
pub fn damage_player(
    world: &mut World,
    player_entity: Entity,
    source: AttackKind,
    damage: i32,
    clock: &GameClock,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
) -> HitOutcome {
    let Ok((health, status)) = world.query_one_mut::<(&mut Health, &mut CombatStatus)>(player_entity) else {
        return HitOutcome::Ignored;
    };

    if status.invulnerable {
        debug!("{} hit ignored, player invulnerable", source.name());
        events.push(GameEvent::HitIgnored { source });
        return HitOutcome::Ignored;
    }

    health.take_damage(damage);
    status.invulnerable = true;
    timers.schedule_in(clock.time, INVULNERABILITY_DURATION, Timer::EndInvulnerability);

    debug!(
        "{} hit player for {} ({}/{})",
        source.name(),
        damage,
        health.current,
        health.max
    );
    events.push(GameEvent::PlayerHit {
        source,
        damage,
        remaining: health.current,
    });
    HitOutcome::Damaged(damage)
}

/// Close the invulnerability window
pub fn end_invulnerability(world: &mut World, player_entity: Entity) {
    if let Ok(mut status) = world.get::<&mut CombatStatus>(player_entity) {
        status.invulnerable = false;
    }
}

/// Clear the swing animation flag
pub fn end_attack_animation(world: &mut World, player_entity: Entity) {
    if let Ok(mut status) = world.get::<&mut CombatStatus>(player_entity) {
        status.attacking = false;
    }
}

/// Handle a player attack command.
///
/// Accepted only if at least `PLAYER_ATTACK_COOLDOWN` has passed since the
/// previous accepted swing. Damage lands immediately on acceptance when the
/// dragon is within reach; the `attacking` flag only drives the animation.
pub fn player_attack(
    world: &mut World,
    player_entity: Entity,
    dragon_entity: Entity,
    clock: &GameClock,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
) -> AttackOutcome {
    let now = clock.time;

    let (player_pos, damage) = {
        let Ok((pos, status, exp, equipment)) = world
            .query_one_mut::<(&Position, &mut CombatStatus, &Experience, &Equipment)>(player_entity)
        else {
            return AttackOutcome::Rejected;
        };

        if let Some(last) = status.last_attack_time {
            if now - last < f64::from(PLAYER_ATTACK_COOLDOWN) {
                return AttackOutcome::Rejected;
            }
        }

        status.last_attack_time = Some(now);
        status.attacking = true;
        (pos.0, player_attack_damage(exp.level, equipment.weapon))
    };
    timers.schedule_in(now, PLAYER_ATTACK_ANIMATION, Timer::EndAttackAnimation);

    let Ok((dragon_pos, dragon_health, _)) =
        world.query_one_mut::<(&Position, &mut Health, &DragonAi)>(dragon_entity)
    else {
        events.push(GameEvent::PlayerAttacked { hit: false });
        return AttackOutcome::Missed;
    };

    if dragon_pos.planar_distance(player_pos) > PLAYER_ATTACK_RANGE {
        events.push(GameEvent::PlayerAttacked { hit: false });
        return AttackOutcome::Missed;
    }

    dragon_health.take_damage(damage);
    debug!(
        "Player hit dragon for {} ({}/{})",
        damage, dragon_health.current, dragon_health.max
    );
    events.push(GameEvent::PlayerAttacked { hit: true });
    events.push(GameEvent::DragonHit {
        damage,
        remaining: dragon_health.current,
    });
    AttackOutcome::Hit(damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{MovementFlags, Player};
    use crate::systems::item_defs::STARTER_WEAPON;
    use glam::Vec3;

    fn setup(player_at: Vec3) -> (World, Entity, Entity) {
        let mut world = World::new();
        let player = world.spawn((
            Player,
            Position(player_at),
            Health::new(100),
            Experience { total: 4000, level: 5 },
            Equipment::starter(),
            MovementFlags::default(),
            CombatStatus::default(),
        ));
        let dragon = world.spawn((
            Position(Vec3::ZERO),
            Health::new(DRAGON_MAX_HEALTH),
            DragonAi::new(DRAGON_COOLDOWN_MAX),
        ));
        (world, player, dragon)
    }

    #[test]
    fn test_player_attack_damage_formula() {
        assert_eq!(player_attack_damage(5, STARTER_WEAPON), 5 * 10 + STARTER_WEAPON_BONUS);
        assert_eq!(player_attack_damage(3, "Iron Sword"), 30 + CRAFTED_WEAPON_BONUS);
    }

    #[test]
    fn test_second_hit_inside_window_is_ignored() {
        let (mut world, player, _) = setup(Vec3::ZERO);
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        let first = damage_player(&mut world, player, AttackKind::Fireball, 25, &clock, &mut timers, &mut events);
        assert_eq!(first, HitOutcome::Damaged(25));

        clock.advance(0.999);
        let second = damage_player(&mut world, player, AttackKind::Breath, 25, &clock, &mut timers, &mut events);
        assert_eq!(second, HitOutcome::Ignored);
        assert_eq!(world.get::<&Health>(player).unwrap().current, 75);
    }

    #[test]
    fn test_hit_after_window_lands() {
        let (mut world, player, _) = setup(Vec3::ZERO);
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        damage_player(&mut world, player, AttackKind::Fireball, 25, &clock, &mut timers, &mut events);
        clock.advance(INVULNERABILITY_DURATION);
        assert_eq!(timers.pop_due(clock.time), Some(Timer::EndInvulnerability));
        end_invulnerability(&mut world, player);

        let outcome = damage_player(&mut world, player, AttackKind::Aoe, 20, &clock, &mut timers, &mut events);
        assert_eq!(outcome, HitOutcome::Damaged(20));
        assert_eq!(world.get::<&Health>(player).unwrap().current, 55);
    }

    #[test]
    fn test_health_never_negative() {
        let (mut world, player, _) = setup(Vec3::ZERO);
        let clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        damage_player(&mut world, player, AttackKind::Charge, 500, &clock, &mut timers, &mut events);
        let health = world.get::<&Health>(player).unwrap();
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_attack_cooldown_single_damage() {
        let (mut world, player, dragon) = setup(Vec3::new(0.0, 0.0, 5.0));
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        let first = player_attack(&mut world, player, dragon, &clock, &mut timers, &mut events);
        clock.advance(0.3);
        let second = player_attack(&mut world, player, dragon, &clock, &mut timers, &mut events);

        let expected = player_attack_damage(5, STARTER_WEAPON);
        assert_eq!(first, AttackOutcome::Hit(expected));
        assert_eq!(second, AttackOutcome::Rejected);
        assert_eq!(
            world.get::<&Health>(dragon).unwrap().current,
            DRAGON_MAX_HEALTH - expected
        );

        clock.advance(0.25);
        let third = player_attack(&mut world, player, dragon, &clock, &mut timers, &mut events);
        assert_eq!(third, AttackOutcome::Hit(expected));
    }

    #[test]
    fn test_attack_out_of_range_misses_but_starts_cooldown() {
        let (mut world, player, dragon) = setup(Vec3::new(0.0, 0.0, 8.5));
        let clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        let outcome = player_attack(&mut world, player, dragon, &clock, &mut timers, &mut events);
        assert_eq!(outcome, AttackOutcome::Missed);
        assert_eq!(world.get::<&Health>(dragon).unwrap().current, DRAGON_MAX_HEALTH);
        let status = *world.get::<&CombatStatus>(player).unwrap();
        assert!(status.attacking);
        assert_eq!(status.last_attack_time, Some(0.0));
    }

    #[test]
    fn test_attack_animation_flag_clears() {
        let (mut world, player, dragon) = setup(Vec3::new(0.0, 0.0, 1.0));
        let mut clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        player_attack(&mut world, player, dragon, &clock, &mut timers, &mut events);
        clock.advance(PLAYER_ATTACK_ANIMATION);
        assert_eq!(timers.pop_due(clock.time), Some(Timer::EndAttackAnimation));
        end_attack_animation(&mut world, player);
        assert!(!world.get::<&CombatStatus>(player).unwrap().attacking);
    }

    #[test]
    fn test_dragon_health_clamps_at_zero() {
        let (mut world, player, dragon) = setup(Vec3::new(0.0, 0.0, 1.0));
        world.get::<&mut Health>(dragon).unwrap().current = 10;
        let clock = GameClock::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();

        player_attack(&mut world, player, dragon, &clock, &mut timers, &mut events);
        assert_eq!(world.get::<&Health>(dragon).unwrap().current, 0);
    }
}
