//! Events emitted by the simulation for UI feedback and diagnostics.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::visual::ModelId;

/// Which collection an entity belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Projectile,
    Target,
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The emitter model finished loading; firing is now possible.
    EmitterReady,
    /// A projectile was registered.
    ProjectileFired { projectile_id: u32 },
    /// A projectile was pruned after its lifetime ran out or it hit something.
    ProjectileRemoved { projectile_id: u32, killed: bool },
    /// A target was registered.
    TargetSpawned { target_id: u32, position: DVec3 },
    /// A projectile knocked a target down.
    TargetHit { target_id: u32, projectile_id: u32 },
    /// A hidden target was removed and its visual released.
    TargetEvicted { target_id: u32 },
    /// An asset load was rejected; the entity it was for is abandoned.
    AssetLoadFailed { model: ModelId, reason: String },
    /// A registered entity lost its components and was dropped.
    /// `id` is `None` when not even the id survived.
    EntityDropped { kind: EntityKind, id: Option<u32> },
}
