//! Game systems organized by domain.
//!
//! This module contains all game logic systems, split into focused submodules:
//! - `ai`: dragon attack-pattern scheduling
//! - `combat`: damage intake, invulnerability and player swings
//! - `experience`: XP, level derivation and level-up growth
//! - `inventory`: resources and crafting
//! - `item_defs`: the static equipment catalog and recipes
//! - `movement`: exploration and arena movement
//! - `projectile`: attack travel, hit detection and expiry
//! - `rendering`: scene node collection for the renderer
//! - `sections`: stations, section unlocks, rewards and the battle gate

pub mod ai;
pub mod combat;
pub mod experience;
pub mod inventory;
pub mod item_defs;
pub mod movement;
pub mod projectile;
pub mod rendering;
pub mod sections;

// Re-export commonly used items
pub use combat::{AttackOutcome, HitOutcome};
pub use experience::{level_for_experience, xp_progress};
pub use inventory::{check_craft, craft_item};
pub use rendering::{NodeKind, SceneNode};
pub use sections::{ready_for_battle, Section, SectionProgress};
