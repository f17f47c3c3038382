//! Game event system for decoupled communication between systems.
//!
//! Systems emit events, the presentation and rendering collaborators consume
//! them. This lets VFX, audio and HUD toasts react without tight coupling.

use glam::Vec3;
use serde::Serialize;

use crate::components::{AttackKind, EquipmentSlot};
use crate::systems::sections::Section;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The dragon launched an attack
    AttackSpawned {
        id: u64,
        kind: AttackKind,
        target: Vec3,
    },
    /// A dragon attack expired or connected and was removed
    AttackEnded { id: u64, kind: AttackKind },
    /// The player took damage
    PlayerHit {
        source: AttackKind,
        damage: i32,
        remaining: i32,
    },
    /// A hit arrived during the invulnerability window
    HitIgnored { source: AttackKind },
    /// The player's swing was accepted
    PlayerAttacked { hit: bool },
    /// The player's swing landed on the dragon
    DragonHit { damage: i32, remaining: i32 },
    /// Player leveled up
    LevelUp { new_level: u32 },
    /// A résumé section was revealed
    SectionUnlocked { section: Section },
    /// A station reward was claimed
    RewardClaimed { section: Section, experience: u32 },
    /// An item was crafted and equipped
    ItemCrafted {
        name: &'static str,
        slot: EquipmentSlot,
    },
    BattleStarted,
    Victory,
    Defeat,
    /// Player chose to retry after a defeat
    BattleReset,
}

/// Simple event queue - events are pushed during update, drained by the collaborator
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
