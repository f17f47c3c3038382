//! Core game state - owns the simulation data.

use crate::config::SimConfig;
use crate::systems::ai::roll_cooldown;
use crate::systems::sections::SectionProgress;
use crate::time_system::{GameClock, TimerQueue};

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::initialization;

/// Core game state - owns all simulation data.
pub struct GameState {
    /// The ECS world
    pub world: World,

    /// Player entity handle
    pub player_entity: Entity,

    /// Dragon entity handle
    pub dragon_entity: Entity,

    /// Session clock
    pub game_clock: GameClock,

    /// Pending one-shot timers
    pub timers: TimerQueue,

    /// Revealed sections and claimed rewards
    pub sections: SectionProgress,

    /// Serial for the next dragon attack
    pub next_attack_id: u64,

    /// Session randomness (cooldowns, damage rolls)
    pub rng: StdRng,

    /// Tunables this session was started with
    pub config: SimConfig,
}

impl GameState {
    /// Create a new game state with the player and dragon spawned.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (world, player_entity, dragon_entity) =
            initialization::init_world(config.dragon_max_health, roll_cooldown(&mut rng));

        Self {
            world,
            player_entity,
            dragon_entity,
            game_clock: GameClock::new(),
            timers: TimerQueue::new(),
            sections: SectionProgress::new(),
            next_attack_id: 1,
            rng,
            config,
        }
    }
}
