//! Player movement system.
//!
//! Exploration walks along one compass direction at a time; the arena allows
//! free two-axis movement with a dodge speed boost. Boundaries are square
//! clamps; there is no other collision.

use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{CombatStatus, MovementFlags, Position};

/// Movement tuning for one game mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementParams {
    /// Units per second
    pub speed: f32,
    /// Half-extent of the square boundary centred on the origin
    pub half_extent: f32,
}

/// Unit direction for exploration: a single compass direction, first held key wins
pub fn explore_direction(flags: &MovementFlags) -> Vec3 {
    if flags.forward {
        Vec3::NEG_Z
    } else if flags.backward {
        Vec3::Z
    } else if flags.left {
        Vec3::NEG_X
    } else if flags.right {
        Vec3::X
    } else {
        Vec3::ZERO
    }
}

/// Direction for battle: held flags combine (not normalised, diagonals are faster)
pub fn battle_direction(flags: &MovementFlags) -> Vec3 {
    let mut dir = Vec3::ZERO;
    if flags.forward {
        dir.z -= 1.0;
    }
    if flags.backward {
        dir.z += 1.0;
    }
    if flags.left {
        dir.x -= 1.0;
    }
    if flags.right {
        dir.x += 1.0;
    }
    dir
}

/// Clamp a ground position into the square boundary
pub fn clamp_to_bounds(pos: Vec3, half_extent: f32) -> Vec3 {
    Vec3::new(
        pos.x.clamp(-half_extent, half_extent),
        pos.y,
        pos.z.clamp(-half_extent, half_extent),
    )
}

/// Move the player one frame in exploration mode
pub fn explore_move(world: &mut World, player_entity: Entity, params: MovementParams, dt: f32) {
    let Ok((pos, flags)) = world.query_one_mut::<(&mut Position, &MovementFlags)>(player_entity) else {
        return;
    };
    let step = explore_direction(flags) * params.speed * dt;
    pos.0 = clamp_to_bounds(pos.0 + step, params.half_extent);
}

/// Move the player one frame in battle mode, doubling speed while dodging
pub fn battle_move(
    world: &mut World,
    player_entity: Entity,
    params: MovementParams,
    dodge_multiplier: f32,
    dt: f32,
) {
    let Ok((pos, flags, status)) =
        world.query_one_mut::<(&mut Position, &MovementFlags, &CombatStatus)>(player_entity)
    else {
        return;
    };
    let speed = if status.dodging {
        params.speed * dodge_multiplier
    } else {
        params.speed
    };
    let step = battle_direction(flags) * speed * dt;
    pos.0 = clamp_to_bounds(pos.0 + step, params.half_extent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn spawn(world: &mut World, flags: MovementFlags, dodging: bool) -> Entity {
        world.spawn((
            Position(Vec3::ZERO),
            flags,
            CombatStatus {
                dodging,
                ..Default::default()
            },
        ))
    }

    fn pos(world: &World, e: Entity) -> Vec3 {
        world.get::<&Position>(e).unwrap().0
    }

    const EXPLORE: MovementParams = MovementParams {
        speed: EXPLORE_SPEED,
        half_extent: WORLD_HALF_EXTENT,
    };
    const BATTLE: MovementParams = MovementParams {
        speed: BATTLE_SPEED,
        half_extent: ARENA_HALF_EXTENT,
    };

    #[test]
    fn test_explore_never_moves_diagonally() {
        let mut world = World::new();
        let flags = MovementFlags {
            forward: true,
            right: true,
            ..Default::default()
        };
        let player = spawn(&mut world, flags, false);
        explore_move(&mut world, player, EXPLORE, 1.0);
        assert_eq!(pos(&world, player), Vec3::new(0.0, 0.0, -EXPLORE_SPEED));
    }

    #[test]
    fn test_explore_direction_precedence() {
        let back_left = MovementFlags {
            backward: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(explore_direction(&back_left), Vec3::Z);
        let left_right = MovementFlags {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(explore_direction(&left_right), Vec3::NEG_X);
    }

    #[test]
    fn test_explore_clamps_to_world() {
        let mut world = World::new();
        let flags = MovementFlags {
            right: true,
            ..Default::default()
        };
        let player = spawn(&mut world, flags, false);
        explore_move(&mut world, player, EXPLORE, 100.0);
        assert_eq!(pos(&world, player).x, WORLD_HALF_EXTENT);
    }

    #[test]
    fn test_battle_combines_axes() {
        let mut world = World::new();
        let flags = MovementFlags {
            forward: true,
            left: true,
            ..Default::default()
        };
        let player = spawn(&mut world, flags, false);
        battle_move(&mut world, player, BATTLE, DODGE_SPEED_MULTIPLIER, 0.5);
        let p = pos(&world, player);
        assert!((p.x + BATTLE_SPEED * 0.5).abs() < 1e-5);
        assert!((p.z + BATTLE_SPEED * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_dodge_doubles_speed() {
        let mut world = World::new();
        let flags = MovementFlags {
            backward: true,
            ..Default::default()
        };
        let player = spawn(&mut world, flags, true);
        battle_move(&mut world, player, BATTLE, DODGE_SPEED_MULTIPLIER, 0.25);
        assert!((pos(&world, player).z - BATTLE_SPEED * 2.0 * 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_battle_clamps_to_arena() {
        let mut world = World::new();
        let flags = MovementFlags {
            backward: true,
            left: true,
            ..Default::default()
        };
        let player = spawn(&mut world, flags, true);
        battle_move(&mut world, player, BATTLE, DODGE_SPEED_MULTIPLIER, 60.0);
        assert_eq!(pos(&world, player), Vec3::new(-ARENA_HALF_EXTENT, 0.0, ARENA_HALF_EXTENT));
    }

    #[test]
    fn test_opposite_keys_cancel_in_battle() {
        let flags = MovementFlags {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(battle_direction(&flags), Vec3::ZERO);
    }
}
