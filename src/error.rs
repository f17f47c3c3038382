//! Error types for rejected player actions and configuration loading.
//!
//! Gameplay rejections are ordinary values: the caller greys out a button or
//! ignores the key press. None of them leave state half-modified.

use std::path::PathBuf;

use thiserror::Error;

use crate::components::ResourceKind;
use crate::systems::sections::Section;

/// Why a craft attempt changed nothing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraftError {
    #[error("no recipe named `{0}`")]
    UnknownRecipe(String),
    #[error("not enough {}: need {needed}, have {available}", .resource.name())]
    InsufficientResources {
        resource: ResourceKind,
        needed: u32,
        available: u32,
    },
}

/// Why a station reward could not be claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RewardError {
    #[error("the {} section has not been unlocked", .0.title())]
    SectionLocked(Section),
    #[error("the {} reward was already claimed", .0.title())]
    AlreadyClaimed(Section),
}

/// Why the dragon cannot be challenged yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BattleGateError {
    #[error("only {unlocked} of {required} sections unlocked")]
    SectionsMissing { unlocked: usize, required: usize },
    #[error("level {level} is below the required level {required}")]
    LevelTooLow { level: u32, required: u32 },
    #[error("a battle is already running")]
    AlreadyInBattle,
}

/// Failure to load a simulation config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
