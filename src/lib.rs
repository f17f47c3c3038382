//! Simulation core for a gamified portfolio: walk between four section
//! stations, level up, craft gear, then fight the dragon in real time.
//! Rendering and presentation are left to whoever drives [`GameEngine`].
pub mod components;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod systems;
pub mod time_system;

// Re-export commonly used items
pub use config::SimConfig;
pub use engine::{BattleOutcome, GameEngine, GameMode, HudSnapshot};
pub use error::{BattleGateError, ConfigError, CraftError, RewardError};
pub use events::GameEvent;
pub use systems::{AttackOutcome, Section, SceneNode};
