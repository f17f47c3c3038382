//! Game engine - owns all game state and provides a clean API to the collaborators.
//!
//! The engine handles:
//! - Game state (world, clock, timers, section progress)
//! - Input processing
//! - Simulation advancement
//! - Mode transitions (exploring, battle, victory, defeat)
//!
//! The rendering collaborator only handles:
//! - Calling `tick` once per displayed frame
//! - Forwarding key events to the engine
//! - Drawing what `collect_renderables` returns
//!
//! The presentation collaborator reads `hud` and calls the click handlers.

mod game_state;
mod hud;
pub mod initialization;
mod simulation;

pub use game_state::GameState;
pub use hud::HudSnapshot;
pub use simulation::*;

use crate::components::{
    CombatStatus, DragonAi, EquipmentSlot, Experience, Health, MovementFlags, Position,
};
use crate::config::SimConfig;
use crate::constants::*;
use crate::error::{BattleGateError, CraftError, RewardError};
use crate::events::{EventQueue, GameEvent};
use crate::input::{InputState, Key};
use crate::systems::combat::{self, AttackOutcome};
use crate::systems::rendering::{self, SceneNode};
use crate::systems::sections::{self, Section};
use crate::systems::{ai, inventory, projectile};

use glam::Vec3;
use log::{debug, info};
use serde::Serialize;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Walking between stations
    Exploring,
    /// Fighting the dragon
    Battle,
    /// Dragon defeated; completion message shown
    Victory,
    /// Player defeated; waiting for retry
    Defeat,
}

/// The game engine - owns all game state and simulation logic.
pub struct GameEngine {
    mode: GameMode,

    /// Core game state
    pub state: GameState,

    /// Event queue for game events
    pub events: EventQueue,

    /// Input state tracking
    pub input: InputState,

    /// Station the player currently stands at (exploration only)
    nearby_station: Option<Section>,
}

impl GameEngine {
    /// Create a new engine with the session-start defaults.
    pub fn new(config: SimConfig) -> Self {
        Self {
            mode: GameMode::Exploring,
            state: GameState::new(config),
            events: EventQueue::new(),
            input: InputState::new(),
            nearby_station: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn nearby_station(&self) -> Option<Section> {
        self.nearby_station
    }

    pub fn level(&self) -> u32 {
        self.state
            .world
            .get::<&Experience>(self.state.player_entity)
            .map(|e| e.level)
            .unwrap_or(1)
    }

    pub fn player_position(&self) -> Vec3 {
        self.state
            .world
            .get::<&Position>(self.state.player_entity)
            .map(|p| p.0)
            .unwrap_or(Vec3::ZERO)
    }

    pub fn dragon_position(&self) -> Vec3 {
        self.state
            .world
            .get::<&Position>(self.state.dragon_entity)
            .map(|p| p.0)
            .unwrap_or(DRAGON_POSITION)
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Handle a key press. Returns false for keys the game does not use.
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        let fresh = self.input.press(key);
        self.sync_player_input();

        match (self.mode, key) {
            (GameMode::Exploring, Key::Enter) if fresh => {
                if let Some(section) = self.nearby_station {
                    self.unlock_section(section);
                }
            }
            (GameMode::Battle, Key::Space) => {
                self.player_attack();
            }
            _ => {}
        }
        true
    }

    /// Handle a key release. Returns false for keys the game does not use.
    pub fn key_up(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        self.input.release(key);
        self.sync_player_input();
        true
    }

    /// Mirror held keys into the player's movement and dodge flags
    fn sync_player_input(&mut self) {
        let flags = self.input.movement_flags();
        let dodging = self.mode == GameMode::Battle && self.input.dodge_held();
        if let Ok((movement, status)) = self
            .state
            .world
            .query_one_mut::<(&mut MovementFlags, &mut CombatStatus)>(self.state.player_entity)
        {
            *movement = flags;
            status.dodging = dodging;
        }
    }

    // =========================================================================
    // FRAME
    // =========================================================================

    /// Advance the simulation by one displayed frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.state.game_clock.advance(dt);
        let dt = dt.max(0.0);

        run_timers(&mut self.state, &mut self.events);

        match self.mode {
            GameMode::Exploring => {
                self.nearby_station = step_exploration(&mut self.state, dt);
            }
            GameMode::Battle => {
                // An AOE expiring above may already have decided the fight
                if self.resolve_outcome() {
                    return;
                }
                step_battle(&mut self.state, &mut self.events, dt);
                self.resolve_outcome();
            }
            GameMode::Victory | GameMode::Defeat => {}
        }
    }

    /// Switch to victory/defeat if the battle has been decided
    fn resolve_outcome(&mut self) -> bool {
        let Some(outcome) = battle_outcome(&self.state) else {
            return false;
        };
        let cleared = projectile::clear_attacks(&mut self.state.world);
        debug!("Battle decided, cleared {} attacks", cleared);
        match outcome {
            BattleOutcome::Victory => {
                info!("Dragon defeated at t={:.2}s", self.state.game_clock.time);
                self.mode = GameMode::Victory;
                self.events.push(GameEvent::Victory);
            }
            BattleOutcome::Defeat => {
                info!("Player defeated at t={:.2}s", self.state.game_clock.time);
                self.mode = GameMode::Defeat;
                self.events.push(GameEvent::Defeat);
            }
        }
        self.sync_player_input();
        true
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// Swing at the dragon. Ignored outside a battle.
    pub fn player_attack(&mut self) -> AttackOutcome {
        if self.mode != GameMode::Battle {
            return AttackOutcome::Rejected;
        }
        let outcome = combat::player_attack(
            &mut self.state.world,
            self.state.player_entity,
            self.state.dragon_entity,
            &self.state.game_clock,
            &mut self.state.timers,
            &mut self.events,
        );
        self.resolve_outcome();
        outcome
    }

    /// Reveal a section. Returns false if it was already revealed.
    pub fn unlock_section(&mut self, section: Section) -> bool {
        sections::unlock_section(&mut self.state.sections, section, &mut self.events)
    }

    /// Claim a station reward. Returns the number of levels gained.
    pub fn claim_reward(&mut self, section: Section) -> Result<u32, RewardError> {
        sections::claim_reward(
            &mut self.state.world,
            self.state.player_entity,
            &mut self.state.sections,
            section,
            &mut self.events,
        )
    }

    /// Craft and equip an item by name
    pub fn craft(&mut self, name: &str) -> Result<EquipmentSlot, CraftError> {
        inventory::craft_item(&mut self.state.world, self.state.player_entity, name, &mut self.events)
    }

    /// Whether a craft button should be enabled
    pub fn can_craft(&self, name: &str) -> bool {
        inventory::check_craft(&self.state.world, self.state.player_entity, name).is_ok()
    }

    pub fn ready_for_battle(&self) -> bool {
        sections::ready_for_battle(&self.state.sections, self.level())
    }

    /// Enter the arena. Only possible from exploration once the gate is open.
    pub fn start_battle(&mut self) -> Result<(), BattleGateError> {
        if self.mode != GameMode::Exploring {
            return Err(BattleGateError::AlreadyInBattle);
        }
        sections::battle_gate(&self.state.sections, self.level())?;

        projectile::clear_attacks(&mut self.state.world);
        let cooldown = ai::roll_cooldown(&mut self.state.rng);
        let max_health = self.state.config.dragon_max_health;
        let world = &mut self.state.world;
        if let Ok((health, dragon_ai, pos)) = world
            .query_one_mut::<(&mut Health, &mut DragonAi, &mut Position)>(self.state.dragon_entity)
        {
            *health = Health::new(max_health);
            *dragon_ai = DragonAi::new(cooldown);
            pos.0 = DRAGON_POSITION;
        }
        if let Ok((pos, status)) =
            world.query_one_mut::<(&mut Position, &mut CombatStatus)>(self.state.player_entity)
        {
            pos.0 = ARENA_PLAYER_START;
            status.attacking = false;
            status.invulnerable = false;
        }

        self.mode = GameMode::Battle;
        self.nearby_station = None;
        self.sync_player_input();
        info!("Battle started, first dragon attack in {:.2}s", cooldown);
        self.events.push(GameEvent::BattleStarted);
        Ok(())
    }

    /// Restore both health pools and leave the arena. Only valid after a defeat.
    pub fn retry(&mut self) -> bool {
        if self.mode != GameMode::Defeat {
            return false;
        }
        let world = &mut self.state.world;
        projectile::clear_attacks(world);
        if let Ok(mut health) = world.get::<&mut Health>(self.state.dragon_entity) {
            health.restore();
        }
        if let Ok((health, pos)) =
            world.query_one_mut::<(&mut Health, &mut Position)>(self.state.player_entity)
        {
            health.restore();
            pos.0 = Vec3::ZERO;
        }

        self.mode = GameMode::Exploring;
        self.input.clear();
        self.sync_player_input();
        info!("Battle reset after defeat");
        self.events.push(GameEvent::BattleReset);
        true
    }

    /// Dismiss the completion message and walk the world again.
    pub fn return_to_exploration(&mut self) -> bool {
        if self.mode != GameMode::Victory {
            return false;
        }
        if let Ok(mut pos) = self.state.world.get::<&mut Position>(self.state.player_entity) {
            pos.0 = Vec3::ZERO;
        }
        self.mode = GameMode::Exploring;
        self.input.clear();
        self.sync_player_input();
        true
    }

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// Snapshot for the HUD and cards
    pub fn hud(&self) -> HudSnapshot {
        hud::snapshot(&self.state, self.mode, self.nearby_station)
    }

    /// Scene nodes for the renderer
    pub fn collect_renderables(&self) -> Vec<SceneNode> {
        match self.mode {
            GameMode::Exploring => rendering::collect_exploration(
                &self.state.world,
                self.state.player_entity,
                self.state.sections.unlocked(),
            ),
            GameMode::Battle | GameMode::Victory | GameMode::Defeat => {
                rendering::collect_battle(&self.state.world, self.state.player_entity)
            }
        }
    }

    /// Drain every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }
}
