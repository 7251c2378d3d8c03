//! Normalized player input.
//!
//! Raw key events are captured outside the simulation and reduced to the
//! handful of `Key`s the control mapper understands. `InputState` is the set
//! of keys currently held down; the engine owns it and reads a snapshot of it
//! once per tick.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A logical control, independent of the physical key bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// `w` / up arrow.
    Forward,
    /// `s` / down arrow.
    Backward,
    /// `a` / left arrow.
    Left,
    /// `d` / right arrow.
    Right,
    /// `shift`: turns Left/Right into strafing.
    Strafe,
    /// Space bar: fires on release.
    Fire,
}

impl Key {
    /// Map a raw key name (as reported by a browser or terminal) to a control.
    /// Matching is case-insensitive; unknown keys map to `None`.
    pub fn from_name(name: &str) -> Option<Key> {
        if name == " " {
            return Some(Key::Fire);
        }
        match name.trim().to_ascii_lowercase().as_str() {
            "w" | "arrowup" | "up" => Some(Key::Forward),
            "s" | "arrowdown" | "down" => Some(Key::Backward),
            "a" | "arrowleft" | "left" => Some(Key::Left),
            "d" | "arrowright" | "right" => Some(Key::Right),
            "shift" => Some(Key::Strafe),
            "space" | "spacebar" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Keys currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns false if it was already held (key repeat).
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    /// Record a key-up. Returns true if the key had been held.
    pub fn release(&mut self, key: Key) -> bool {
        self.held.remove(&key)
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop every held key (focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}

impl FromIterator<Key> for InputState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}
