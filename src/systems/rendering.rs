//! Render data collection for the scene-graph collaborator.
//!
//! The renderer owns meshes, lights and the camera; the simulation only
//! tells it what to draw and where.

use glam::Vec3;
use hecs::{Entity, World};
use serde::Serialize;

use crate::components::{Attack, AttackKind, CombatStatus, DragonAi, Health, Player, Position};
use crate::constants::*;
use crate::systems::sections::Section;

/// What a scene node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeKind {
    Player,
    Dragon,
    Station(Section),
    Attack(u64),
}

/// Visual state flags the renderer may animate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeFlags {
    pub attacking: bool,
    pub dodging: bool,
    /// Renderer blinks the node while set
    pub invulnerable: bool,
    /// Station already unlocked
    pub unlocked: bool,
}

/// A single node for the scene graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub node: NodeKind,
    /// Attack pattern for attack nodes
    pub attack: Option<AttackKind>,
    pub position: Vec3,
    /// Uniform scale, or radius for AOE markers
    pub scale: f32,
    pub flags: NodeFlags,
}

/// Collect the player and stations for the exploration scene
pub fn collect_exploration(world: &World, player_entity: Entity, unlocked: &[Section]) -> Vec<SceneNode> {
    let mut nodes: Vec<SceneNode> = Section::ALL
        .iter()
        .map(|section| SceneNode {
            node: NodeKind::Station(*section),
            attack: None,
            position: section.station_position(),
            scale: 1.0,
            flags: NodeFlags {
                unlocked: unlocked.contains(section),
                ..Default::default()
            },
        })
        .collect();

    if let Some(player) = player_node(world, player_entity) {
        nodes.push(player);
    }
    nodes
}

/// Collect the dragon, every active attack and the player for the arena scene
pub fn collect_battle(world: &World, player_entity: Entity) -> Vec<SceneNode> {
    let mut nodes = Vec::new();

    for (_, (pos, _ai, health)) in world.query::<(&Position, &DragonAi, &Health)>().iter() {
        if health.is_depleted() {
            continue;
        }
        nodes.push(SceneNode {
            node: NodeKind::Dragon,
            attack: None,
            position: pos.0,
            scale: 3.0,
            flags: NodeFlags::default(),
        });
    }

    let mut attacks: Vec<(u64, SceneNode)> = world
        .query::<(&Position, &Attack)>()
        .iter()
        .map(|(_, (pos, attack))| {
            let scale = match attack.kind {
                AttackKind::Aoe => AOE_VISUAL_RADIUS,
                AttackKind::Breath => 1.5,
                AttackKind::Fireball | AttackKind::Charge => 1.0,
            };
            let node = SceneNode {
                node: NodeKind::Attack(attack.id),
                attack: Some(attack.kind),
                position: pos.0,
                scale,
                flags: NodeFlags::default(),
            };
            (attack.id, node)
        })
        .collect();
    // Query order is archetype order; keep spawn order for stable output
    attacks.sort_by_key(|(id, _)| *id);
    nodes.extend(attacks.into_iter().map(|(_, node)| node));

    // Player on top
    if let Some(player) = player_node(world, player_entity) {
        nodes.push(player);
    }
    nodes
}

fn player_node(world: &World, player_entity: Entity) -> Option<SceneNode> {
    let mut query = world
        .query_one::<(&Position, &CombatStatus, &Player)>(player_entity)
        .ok()?;
    let (pos, status, _) = query.get()?;
    Some(SceneNode {
        node: NodeKind::Player,
        attack: None,
        position: pos.0,
        scale: 1.0,
        flags: NodeFlags {
            attacking: status.attacking,
            dodging: status.dodging,
            invulnerable: status.invulnerable,
            unlocked: false,
        },
    })
}
