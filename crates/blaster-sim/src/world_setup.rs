//! Entity spawn factories for setting up the range.
//!
//! Creates projectile and target entities with their component bundles,
//! and picks positions for randomly placed targets.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use blaster_core::components::{Projectile, Target, Visual};
use blaster_core::constants::OPENING_TARGETS;
use blaster_core::types::Transform;

use crate::config::TargetBounds;

/// Spawn a projectile entity. The transform starts at the muzzle.
pub fn spawn_projectile(
    world: &mut World,
    projectile: Projectile,
    transform: Transform,
    visual: Visual,
) -> Entity {
    world.spawn((projectile, transform, visual))
}

/// Spawn a standing target at `position`.
pub fn spawn_target(world: &mut World, id: u32, position: DVec3, visual: Visual) -> Entity {
    world.spawn((Target::new(id), Transform::from_position(position), visual))
}

/// Draw a random target position: x and z uniform inside the bounds,
/// y fixed at the bounds' height.
pub fn random_target_position(rng: &mut ChaCha8Rng, bounds: &TargetBounds) -> DVec3 {
    let x: f64 = rng.gen_range(bounds.min_x..bounds.max_x);
    let z: f64 = rng.gen_range(bounds.min_z..bounds.max_z);
    DVec3::new(x, bounds.height, z)
}

/// Fixed targets placed in front of the player when the range opens.
pub fn opening_target_positions() -> impl Iterator<Item = DVec3> {
    OPENING_TARGETS.into_iter().map(DVec3::from_array)
}
