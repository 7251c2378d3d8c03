//! Cleanup system: drops broken targets and, when enabled, evicts knocked-down ones.

use hecs::{Entity, World};
use tracing::{debug, warn};

use blaster_core::components::{Target, Visual};
use blaster_core::events::{EntityKind, SimEvent};
use blaster_core::types::Transform;

use crate::assets::VisualBackend;
use crate::systems::projectiles::despawn_with_visual;

/// Remove targets whose components are missing, plus hidden targets when
/// `evict_hidden` is set. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    targets: &mut Vec<Entity>,
    evict_hidden: bool,
    despawn_buffer: &mut Vec<Entity>,
    assets: &mut dyn VisualBackend,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for &entity in targets.iter() {
        match world.query_one_mut::<(&Transform, &Target, &Visual)>(entity) {
            Ok((_, target, _)) => {
                if evict_hidden && !target.is_visible() {
                    debug!(target_id = target.id, "evicting knocked-down target");
                    events.push(SimEvent::TargetEvicted {
                        target_id: target.id,
                    });
                    despawn_buffer.push(entity);
                }
            }
            Err(_) => {
                let id = world.get::<&Target>(entity).ok().map(|t| t.id);
                warn!(?entity, ?id, "target lost its components; dropping it");
                events.push(SimEvent::EntityDropped {
                    kind: EntityKind::Target,
                    id,
                });
                despawn_buffer.push(entity);
            }
        }
    }

    if despawn_buffer.is_empty() {
        return;
    }

    targets.retain(|e| !despawn_buffer.contains(e));
    for entity in despawn_buffer.drain(..) {
        despawn_with_visual(world, entity, assets);
    }
}
