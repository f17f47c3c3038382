//! World initialization - creates the game world and spawns the persistent entities.

use crate::components::{
    CombatStatus, DragonAi, Equipment, Experience, Health, Mana, MovementFlags, Player, Position,
    Resources,
};
use crate::constants::*;

use glam::Vec3;
use hecs::{Entity, World};

/// Spawn the player with the session-start defaults.
pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((
        Player,
        Position(Vec3::ZERO),
        Health::new(PLAYER_STARTING_HEALTH),
        Mana::new(PLAYER_STARTING_MANA),
        Experience::new(),
        Resources::new(),
        Equipment::starter(),
        MovementFlags::default(),
        CombatStatus::default(),
    ))
}

/// Spawn the dragon. It idles until a battle re-arms it.
pub fn spawn_dragon(world: &mut World, max_health: i32, cooldown: f32) -> Entity {
    world.spawn((
        Position(DRAGON_POSITION),
        Health::new(max_health),
        DragonAi::new(cooldown),
    ))
}

/// Create the world with its player and dragon.
pub fn init_world(dragon_max_health: i32, dragon_cooldown: f32) -> (World, Entity, Entity) {
    let mut world = World::new();
    let player = spawn_player(&mut world);
    let dragon = spawn_dragon(&mut world, dragon_max_health, dragon_cooldown);
    (world, player, dragon)
}
