//! Opaque references to renderable objects owned by the rendering side.
//!
//! The simulation never looks inside a visual. It asks the asset backend for
//! one by `ModelId`, holds on to the handle, and gives it back on destroy.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Handle to a loaded renderable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Receipt for an asset load that has not completed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket(pub u64);

/// The models the simulation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    /// The player's blaster; the camera rides on it.
    Emitter,
    /// A foam dart.
    Projectile,
    /// A standing target.
    Target,
}

impl ModelId {
    /// Asset name understood by the loader.
    pub fn asset_name(self) -> &'static str {
        match self {
            ModelId::Emitter => "blasterG",
            ModelId::Projectile => "foamBulletB",
            ModelId::Target => "targetA",
        }
    }

    /// One-time child rotation (axis, radians) that lines the model up with
    /// the simulation's -Z forward convention.
    pub fn orientation_correction(self) -> Option<(DVec3, f64)> {
        match self {
            ModelId::Emitter => None,
            ModelId::Projectile => Some((DVec3::X, -FRAC_PI_2)),
            ModelId::Target => Some((DVec3::Y, FRAC_PI_2)),
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.asset_name())
    }
}
