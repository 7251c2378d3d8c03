//! Collision system: projectile vs. standing target.
//!
//! A hit is a projectile strictly closer than the hit radius to a visible
//! target. The target is knocked down on the spot; the projectile is only
//! marked killed and is removed by the next tick's prune. By default the
//! projectile keeps checking the remaining targets, so one dart can drop
//! several overlapping targets in the same tick. Entities without a visual
//! take no part; the prune and cleanup passes drop them.

use hecs::{Entity, World};
use tracing::debug;

use blaster_core::components::{Projectile, Target, Visual};
use blaster_core::events::SimEvent;
use blaster_core::spatial::distance;
use blaster_core::types::Transform;

/// Resolve hits between every projectile and every visible target.
/// Returns the number of targets knocked down.
pub fn run(
    world: &mut World,
    projectiles: &[Entity],
    targets: &[Entity],
    hit_radius: f64,
    single_hit_per_projectile: bool,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let mut hits = 0;

    for &projectile_entity in projectiles {
        let (projectile_id, projectile_pos) =
            match world.query_one_mut::<(&Transform, &Projectile, &Visual)>(projectile_entity) {
                Ok((transform, projectile, _)) => (projectile.id, transform.position),
                Err(_) => continue,
            };

        let mut hit_any = false;
        for &target_entity in targets {
            let Ok((transform, target, _)) =
                world.query_one_mut::<(&Transform, &mut Target, &Visual)>(target_entity)
            else {
                continue;
            };
            if !target.is_visible() {
                continue;
            }

            if distance(transform.position, projectile_pos) < hit_radius {
                target.hide();
                hit_any = true;
                hits += 1;
                debug!(target_id = target.id, projectile_id, "target hit");
                events.push(SimEvent::TargetHit {
                    target_id: target.id,
                    projectile_id,
                });
                if single_hit_per_projectile {
                    break;
                }
            }
        }

        if hit_any {
            if let Ok(mut projectile) = world.get::<&mut Projectile>(projectile_entity) {
                projectile.mark_killed();
            }
        }
    }

    hits
}
