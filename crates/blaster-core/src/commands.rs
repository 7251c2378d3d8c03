//! Player commands sent from the driver to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::input::Key;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Held keys ---
    /// A key went down.
    KeyDown { key: Key },
    /// A key came up. Releasing `Fire` fires one projectile.
    KeyUp { key: Key },
    /// Forget every held key (window lost focus).
    ReleaseAllKeys,

    // --- Actions ---
    /// Fire one projectile along the current camera direction.
    Fire,
    /// Put the emitter back at the origin and add a fresh batch of targets.
    Restart,

    // --- Range setup ---
    /// Place a target at an exact position.
    SpawnTarget { x: f64, y: f64, z: f64 },
    /// Place `count` targets at random inside the placement box.
    SpawnRandomTargets { count: u32 },
}
