//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod combat;
mod dragon;
mod gameplay;
mod movement;
mod stations;

pub use combat::*;
pub use dragon::*;
pub use gameplay::*;
pub use movement::*;
pub use stations::*;
