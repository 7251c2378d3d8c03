//! Projectile integration and pruning.
//!
//! Every live projectile takes one fixed step along its velocity, then any
//! projectile that has outlived its lifetime or was killed by a hit last tick
//! is destroyed before collisions run. A dart can never score a hit on the
//! tick after it died.

use std::time::Duration;

use hecs::{Entity, World};
use tracing::warn;

use blaster_core::components::{Projectile, Visual};
use blaster_core::events::{EntityKind, SimEvent};
use blaster_core::types::Transform;

use crate::assets::VisualBackend;

/// Advance all projectiles, then prune the expired ones.
/// `projectiles` keeps firing order.
pub fn run(
    world: &mut World,
    projectiles: &mut Vec<Entity>,
    now: Duration,
    despawn_buffer: &mut Vec<Entity>,
    assets: &mut dyn VisualBackend,
    events: &mut Vec<SimEvent>,
) {
    advance(world, projectiles, assets, events);
    prune(world, projectiles, now, despawn_buffer, assets, events);
}

/// Move every projectile one step. Entries whose components have gone
/// missing are dropped from the collection.
fn advance(
    world: &mut World,
    projectiles: &mut Vec<Entity>,
    assets: &mut dyn VisualBackend,
    events: &mut Vec<SimEvent>,
) {
    projectiles.retain(|&entity| {
        match world.query_one_mut::<(&mut Transform, &Projectile, &Visual)>(entity) {
            Ok((transform, projectile, _)) => {
                projectile.advance(transform);
                true
            }
            Err(_) => {
                drop_broken(world, entity, assets, events);
                false
            }
        }
    });
}

/// Destroy every projectile that is expired or killed.
fn prune(
    world: &mut World,
    projectiles: &mut Vec<Entity>,
    now: Duration,
    despawn_buffer: &mut Vec<Entity>,
    assets: &mut dyn VisualBackend,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for &entity in projectiles.iter() {
        if let Ok(projectile) = world.get::<&Projectile>(entity) {
            if projectile.is_expired(now) {
                despawn_buffer.push(entity);
                events.push(SimEvent::ProjectileRemoved {
                    projectile_id: projectile.id,
                    killed: projectile.killed,
                });
            }
        }
    }

    if despawn_buffer.is_empty() {
        return;
    }

    projectiles.retain(|e| !despawn_buffer.contains(e));
    for entity in despawn_buffer.drain(..) {
        despawn_with_visual(world, entity, assets);
    }
}

/// Remove an entity and hand its visual back to the backend.
pub fn despawn_with_visual(world: &mut World, entity: Entity, assets: &mut dyn VisualBackend) {
    let visual = world.get::<&Visual>(entity).ok().map(|v| *v);
    if let Some(visual) = visual {
        assets.release(visual.handle);
    }
    let _ = world.despawn(entity);
}

fn drop_broken(
    world: &mut World,
    entity: Entity,
    assets: &mut dyn VisualBackend,
    events: &mut Vec<SimEvent>,
) {
    let id = world.get::<&Projectile>(entity).ok().map(|p| p.id);
    warn!(?entity, ?id, "projectile lost its components; dropping it");
    despawn_with_visual(world, entity, assets);
    events.push(SimEvent::EntityDropped {
        kind: EntityKind::Projectile,
        id,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    use blaster_core::visual::ModelId;

    use crate::assets::{HeadlessBackend, LoadRequest};

    fn spawn(
        world: &mut World,
        backend: &mut HeadlessBackend,
        id: u32,
        velocity: DVec3,
        spawned_at: Duration,
    ) -> Entity {
        let LoadRequest::Ready(handle) = backend.load(ModelId::Projectile) else {
            panic!("headless loads are immediate");
        };
        world.spawn((
            Projectile::new(id, velocity, spawned_at, Duration::from_millis(1000)),
            Transform::IDENTITY,
            Visual {
                handle,
                model: ModelId::Projectile,
            },
        ))
    }

    #[test]
    fn test_advance_moves_each_projectile() {
        let mut world = World::new();
        let mut backend = HeadlessBackend::new();
        let a = spawn(&mut world, &mut backend, 0, DVec3::new(0.0, 0.0, -0.5), Duration::ZERO);
        let b = spawn(&mut world, &mut backend, 1, DVec3::new(0.25, 0.0, 0.0), Duration::ZERO);
        let mut projectiles = vec![a, b];
        let mut buffer = Vec::new();
        let mut events = Vec::new();

        for _ in 0..4 {
            run(&mut world, &mut projectiles, Duration::ZERO, &mut buffer, &mut backend, &mut events);
        }

        assert_eq!(world.get::<&Transform>(a).unwrap().position, DVec3::new(0.0, 0.0, -2.0));
        assert_eq!(world.get::<&Transform>(b).unwrap().position, DVec3::new(1.0, 0.0, 0.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_prune_keeps_order_and_releases_visuals() {
        let mut world = World::new();
        let mut backend = HeadlessBackend::new();
        let old = spawn(&mut world, &mut backend, 0, DVec3::ZERO, Duration::ZERO);
        let mid = spawn(&mut world, &mut backend, 1, DVec3::ZERO, Duration::from_millis(300));
        let new = spawn(&mut world, &mut backend, 2, DVec3::ZERO, Duration::from_millis(600));
        world.get::<&mut Projectile>(new).unwrap().mark_killed();

        let mut projectiles = vec![old, mid, new];
        let mut buffer = Vec::new();
        let mut events = Vec::new();
        run(
            &mut world,
            &mut projectiles,
            Duration::from_millis(1000),
            &mut buffer,
            &mut backend,
            &mut events,
        );

        assert_eq!(projectiles, vec![mid]);
        assert!(!world.contains(old));
        assert!(!world.contains(new));
        assert_eq!(backend.live_count(), 1);
        assert_eq!(
            events,
            vec![
                SimEvent::ProjectileRemoved {
                    projectile_id: 0,
                    killed: false
                },
                SimEvent::ProjectileRemoved {
                    projectile_id: 2,
                    killed: true
                },
            ]
        );
    }

    #[test]
    fn test_projectile_without_visual_is_dropped() {
        let mut world = World::new();
        let mut backend = HeadlessBackend::new();
        let good = spawn(&mut world, &mut backend, 0, DVec3::ZERO, Duration::ZERO);
        let bare = spawn(&mut world, &mut backend, 1, DVec3::new(0.0, 0.0, -1.0), Duration::ZERO);
        world.remove_one::<Visual>(bare).unwrap();

        let mut projectiles = vec![good, bare];
        let mut buffer = Vec::new();
        let mut events = Vec::new();
        run(&mut world, &mut projectiles, Duration::ZERO, &mut buffer, &mut backend, &mut events);

        assert_eq!(projectiles, vec![good]);
        assert!(!world.contains(bare));
        assert_eq!(
            events,
            vec![SimEvent::EntityDropped {
                kind: EntityKind::Projectile,
                id: Some(1)
            }]
        );
    }

    #[test]
    fn test_broken_projectile_is_dropped() {
        let mut world = World::new();
        let mut backend = HeadlessBackend::new();
        let good = spawn(&mut world, &mut backend, 0, DVec3::ZERO, Duration::ZERO);
        let broken = spawn(&mut world, &mut backend, 1, DVec3::ZERO, Duration::ZERO);
        world.remove_one::<Transform>(broken).unwrap();

        let mut projectiles = vec![good, broken];
        let mut buffer = Vec::new();
        let mut events = Vec::new();
        run(&mut world, &mut projectiles, Duration::ZERO, &mut buffer, &mut backend, &mut events);

        assert_eq!(projectiles, vec![good]);
        assert!(!world.contains(broken));
        assert_eq!(backend.live_count(), 1, "broken entity's visual released");
        assert_eq!(
            events,
            vec![SimEvent::EntityDropped {
                kind: EntityKind::Projectile,
                id: Some(1)
            }]
        );
    }
}
