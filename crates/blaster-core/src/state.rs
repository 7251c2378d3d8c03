//! Frame snapshot: everything the renderer needs, copied out after each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::events::SimEvent;
use crate::types::{SimTime, Transform};
use crate::visual::VisualHandle;

/// Complete visible state handed to the driver after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub emitter: EmitterView,
    /// In firing order.
    pub projectiles: Vec<ProjectileView>,
    /// In spawn order, hidden ones included.
    pub targets: Vec<TargetView>,
    /// Asset loads still outstanding.
    pub pending_loads: u32,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

/// The player's blaster and the camera riding on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmitterView {
    pub visual: Option<VisualHandle>,
    pub transform: Transform,
    /// Camera position in world space.
    pub camera_eye: DVec3,
    /// Unit view direction; also the firing direction.
    pub camera_direction: DVec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub visual: VisualHandle,
    pub transform: Transform,
    pub velocity: DVec3,
    pub age_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: u32,
    pub visual: VisualHandle,
    pub transform: Transform,
    pub visible: bool,
}

/// Running score for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub shots_fired: u32,
    pub targets_hit: u32,
    pub targets_total: u32,
    /// Targets still standing.
    pub targets_remaining: u32,
}
