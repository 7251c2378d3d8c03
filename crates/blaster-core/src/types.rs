//! Fundamental geometric and simulation types.

use std::time::Duration;

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of an entity in world space.
/// y = Up, the ground is the XZ plane, and "forward" is -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Origin pose: zero position, no rotation.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            rotation: DQuat::IDENTITY,
        }
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::from_position(DVec3::new(x, y, z))
    }

    /// Unit vector this transform is facing (local -Z in world space).
    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::NEG_Z
    }

    /// Rotate about the local vertical axis by `angle` radians.
    pub fn rotate_y(&mut self, angle: f64) {
        self.rotation = (self.rotation * DQuat::from_rotation_y(angle)).normalize();
    }

    pub fn translate(&mut self, delta: DVec3) {
        self.position += delta;
    }

    /// Snap back to the origin pose.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Wall-clock time since the engine's clock started.
    pub elapsed: Duration,
}

impl SimTime {
    /// Advance by one tick, stamping the wall-clock reading for it.
    pub fn advance(&mut self, now: Duration) {
        self.tick += 1;
        self.elapsed = now;
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}
