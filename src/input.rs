//! Input handling and player control.
//!
//! Filters raw key codes down to the keys the game reacts to and tracks
//! which of them are held.

use std::collections::HashSet;

use crate::components::MovementFlags;

/// The keys the game listens to; everything else is dropped at the door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Shift,
}

impl Key {
    /// Map a key code (browser `KeyboardEvent.code` style, or a bare letter) to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        let key = match code {
            "KeyW" | "w" | "W" => Key::W,
            "KeyA" | "a" | "A" => Key::A,
            "KeyS" | "s" | "S" => Key::S,
            "KeyD" | "d" | "D" => Key::D,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Space" | " " => Key::Space,
            "Enter" | "NumpadEnter" => Key::Enter,
            "ShiftLeft" | "ShiftRight" | "Shift" => Key::Shift,
            _ => return None,
        };
        Some(key)
    }
}

/// Input state tracking
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys_held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns false for auto-repeat of a held key.
    pub fn press(&mut self, key: Key) -> bool {
        self.keys_held.insert(key)
    }

    pub fn release(&mut self, key: Key) {
        self.keys_held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    /// Drop every held key when leaving the arena
    pub fn clear(&mut self) {
        self.keys_held.clear();
    }

    /// Movement flags implied by the held keys
    pub fn movement_flags(&self) -> MovementFlags {
        MovementFlags {
            forward: self.is_held(Key::W) || self.is_held(Key::ArrowUp),
            backward: self.is_held(Key::S) || self.is_held(Key::ArrowDown),
            left: self.is_held(Key::A) || self.is_held(Key::ArrowLeft),
            right: self.is_held(Key::D) || self.is_held(Key::ArrowRight),
        }
    }

    pub fn dodge_held(&self) -> bool {
        self.is_held(Key::Shift)
    }
}
