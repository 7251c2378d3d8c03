//! ECS components for hecs entities.
//!
//! Components are plain data. The only behaviour they carry is the
//! self-contained bookkeeping each entity owns (a projectile advancing
//! and ageing, a target being knocked down); everything that touches two
//! entities at once lives in the systems.

use std::time::Duration;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::Transform;
use crate::visual::{ModelId, VisualHandle};

/// The renderable object backing an entity. Exclusively owned; released
/// back to the asset backend when the entity is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visual {
    pub handle: VisualHandle,
    pub model: ModelId,
}

/// A fired dart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Stable id used in events and snapshots.
    pub id: u32,
    /// Displacement per tick. Fixed at creation.
    pub velocity: DVec3,
    /// Clock reading at creation.
    pub spawned_at: Duration,
    /// How long the projectile lives regardless of hits.
    pub lifetime: Duration,
    /// Set on collision; forces removal at the next prune.
    pub killed: bool,
}

impl Projectile {
    pub fn new(id: u32, velocity: DVec3, spawned_at: Duration, lifetime: Duration) -> Self {
        Self {
            id,
            velocity,
            spawned_at,
            lifetime,
            killed: false,
        }
    }

    /// Move one fixed step along the velocity.
    pub fn advance(&self, transform: &mut Transform) {
        transform.position += self.velocity;
    }

    /// True once the lifetime has run out on the wall clock, or once killed.
    pub fn is_expired(&self, now: Duration) -> bool {
        self.killed || now.saturating_sub(self.spawned_at) >= self.lifetime
    }

    pub fn mark_killed(&mut self) {
        self.killed = true;
    }

    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.spawned_at)
    }
}

/// A standing target. Passive: only the collision system changes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Stable id used in events and snapshots.
    pub id: u32,
    pub visible: bool,
}

impl Target {
    pub fn new(id: u32) -> Self {
        Self { id, visible: true }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The player's blaster. Not an ECS entity: there is exactly one, and the
/// control mapper mutates it every tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Emitter {
    pub transform: Transform,
    /// `None` until the emitter model has loaded.
    pub visual: Option<Visual>,
}

impl Emitter {
    /// Whether the emitter model has finished loading.
    pub fn is_initialized(&self) -> bool {
        self.visual.is_some()
    }
}
