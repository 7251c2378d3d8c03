//! Snapshot system: copies the world out into a `FrameSnapshot` for the renderer.
//!
//! This system is read-only; it never modifies the world.

use std::time::Duration;

use glam::DVec3;
use hecs::{Entity, World};

use blaster_core::components::{Emitter, Projectile, Target, Visual};
use blaster_core::events::SimEvent;
use blaster_core::state::*;
use blaster_core::types::{SimTime, Transform};

use crate::camera::CameraRig;

/// Running totals kept by the engine between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub shots_fired: u32,
    pub targets_hit: u32,
    pub targets_total: u32,
}

/// Everything the snapshot reads besides the ECS world.
pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub now: Duration,
    pub emitter: &'a Emitter,
    pub camera: &'a CameraRig,
    pub camera_direction: DVec3,
    pub projectiles: &'a [Entity],
    pub targets: &'a [Entity],
    pub pending_loads: usize,
    pub score: ScoreState,
}

/// Build a complete FrameSnapshot from the current world state.
pub fn build_snapshot(world: &World, inputs: SnapshotInputs<'_>, events: Vec<SimEvent>) -> FrameSnapshot {
    let projectiles = build_projectiles(world, inputs.projectiles, inputs.now);
    let targets = build_targets(world, inputs.targets);
    let targets_remaining = targets.iter().filter(|t| t.visible).count() as u32;

    FrameSnapshot {
        time: inputs.time,
        emitter: EmitterView {
            visual: inputs.emitter.visual.map(|v| v.handle),
            transform: inputs.emitter.transform,
            camera_eye: inputs.camera.eye(&inputs.emitter.transform),
            camera_direction: inputs.camera_direction,
        },
        projectiles,
        targets,
        pending_loads: inputs.pending_loads as u32,
        events,
        score: ScoreView {
            shots_fired: inputs.score.shots_fired,
            targets_hit: inputs.score.targets_hit,
            targets_total: inputs.score.targets_total,
            targets_remaining,
        },
    }
}

fn build_projectiles(world: &World, entities: &[Entity], now: Duration) -> Vec<ProjectileView> {
    entities
        .iter()
        .filter_map(|&e| {
            let mut query = world.query_one::<(&Projectile, &Transform, &Visual)>(e).ok()?;
            let (projectile, transform, visual) = query.get()?;
            Some(ProjectileView {
                id: projectile.id,
                visual: visual.handle,
                transform: *transform,
                velocity: projectile.velocity,
                age_ms: projectile.age(now).as_millis() as u64,
            })
        })
        .collect()
}

fn build_targets(world: &World, entities: &[Entity]) -> Vec<TargetView> {
    entities
        .iter()
        .filter_map(|&e| {
            let mut query = world.query_one::<(&Target, &Transform, &Visual)>(e).ok()?;
            let (target, transform, visual) = query.get()?;
            Some(TargetView {
                id: target.id,
                visual: visual.handle,
                transform: *transform,
                visible: target.visible,
            })
        })
        .collect()
}
