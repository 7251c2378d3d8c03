//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the held-key state, the
//! emitter, and the ordered projectile/target collections. It processes
//! player commands, runs all systems once per tick, and produces
//! `FrameSnapshot`s. Completely headless: rendering, asset loading, and the
//! wall clock all come in through the `VisualBackend` and `Clock` seams.

use std::collections::VecDeque;
use std::time::Duration;

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use blaster_core::commands::PlayerCommand;
use blaster_core::components::{Emitter, Projectile, Visual};
use blaster_core::errors::AssetLoadError;
use blaster_core::events::SimEvent;
use blaster_core::input::{InputState, Key};
use blaster_core::state::FrameSnapshot;
use blaster_core::types::SimTime;
use blaster_core::visual::VisualHandle;

use crate::assets::{HeadlessBackend, LoadRequest, LoadStatus, VisualBackend};
use crate::camera::CameraRig;
use crate::clock::{Clock, SystemClock};
use crate::config::SimConfig;
use crate::systems;
use crate::systems::loading::{CompletedLoad, PendingLoad, SpawnRequest};
use crate::systems::snapshot::{ScoreState, SnapshotInputs};
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine<B: VisualBackend = HeadlessBackend> {
    world: World,
    config: SimConfig,
    time: SimTime,
    clock: Box<dyn Clock>,
    assets: B,
    rng: ChaCha8Rng,
    input: InputState,
    emitter: Emitter,
    camera: CameraRig,
    camera_direction: DVec3,
    /// Firing order.
    projectiles: Vec<Entity>,
    /// Spawn order.
    targets: Vec<Entity>,
    pending_loads: Vec<PendingLoad>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    next_entity_id: u32,
    score: ScoreState,
}

impl<B: VisualBackend> SimulationEngine<B> {
    /// Create a new engine timed by the real wall clock.
    pub fn new(config: SimConfig, assets: B) -> Self {
        Self::with_clock(config, assets, SystemClock::new())
    }

    /// Create a new engine with an explicit clock.
    pub fn with_clock(config: SimConfig, assets: B, clock: impl Clock + 'static) -> Self {
        let camera = CameraRig::default();
        let emitter = Emitter::default();
        let camera_direction = camera.direction(&emitter.transform);
        Self {
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            clock: Box::new(clock),
            assets,
            input: InputState::new(),
            emitter,
            camera,
            camera_direction,
            projectiles: Vec::new(),
            targets: Vec::new(),
            pending_loads: Vec::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            next_entity_id: 0,
            score: ScoreState::default(),
        }
    }

    /// Open the range: load the emitter, place the fixed opening targets,
    /// then a random batch.
    pub fn setup(&mut self) {
        info!(seed = self.config.seed, "setting up range");
        self.request_spawn(SpawnRequest::Emitter);
        for position in world_setup::opening_target_positions() {
            self.spawn_target(position.x, position.y, position.z);
        }
        self.spawn_random_targets(self.config.random_target_batch);
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> FrameSnapshot {
        let now = self.clock.now();

        self.resolve_loads();
        self.process_commands();
        self.run_systems(now);
        self.time.advance(now);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                now,
                emitter: &self.emitter,
                camera: &self.camera,
                camera_direction: self.camera_direction,
                projectiles: &self.projectiles,
                targets: &self.targets,
                pending_loads: self.pending_loads.len(),
                score: self.score,
            },
            events,
        )
    }

    /// Place a target. It is registered once its visual has loaded.
    pub fn spawn_target(&mut self, x: f64, y: f64, z: f64) {
        self.request_spawn(SpawnRequest::Target {
            position: DVec3::new(x, y, z),
        });
    }

    /// Place `count` targets at random inside the configured bounds.
    /// Each placement stands alone: one failed load does not stop the rest.
    pub fn spawn_random_targets(&mut self, count: u32) {
        for _ in 0..count {
            let position =
                world_setup::random_target_position(&mut self.rng, &self.config.target_bounds);
            self.spawn_target(position.x, position.y, position.z);
        }
    }

    /// Fire along the current camera direction. Does nothing until the
    /// emitter has loaded.
    pub fn fire_projectile(&mut self) {
        if !self.emitter.is_initialized() {
            debug!("fire ignored: emitter not loaded yet");
            return;
        }

        let direction = self.camera_direction;
        let mut transform = self.emitter.transform;
        transform.position += DVec3::Y * self.config.muzzle_height
            + direction * self.config.muzzle_forward_offset;

        self.request_spawn(SpawnRequest::Projectile {
            transform,
            velocity: direction * self.config.projectile_speed,
        });
    }

    /// Put the emitter back at the origin and add a fresh batch of targets.
    /// Existing targets and projectiles are left alone.
    pub fn restart(&mut self) {
        info!(
            targets = self.targets.len(),
            projectiles = self.projectiles.len(),
            "restarting range"
        );
        self.emitter.transform.reset();
        self.camera_direction = self.camera.direction(&self.emitter.transform);
        self.spawn_random_targets(self.config.random_target_batch);
    }

    // --- Accessors ---

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn camera_direction(&self) -> DVec3 {
        self.camera_direction
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn pending_load_count(&self) -> usize {
        self.pending_loads.len()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn assets(&self) -> &B {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut B {
        &mut self.assets
    }

    /// Mutable world access for tests that need to corrupt entities.
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn projectile_entities(&self) -> &[Entity] {
        &self.projectiles
    }

    #[cfg(test)]
    pub(crate) fn target_entities(&self) -> &[Entity] {
        &self.targets
    }

    // --- Internals ---

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::KeyDown { key } => {
                self.input.press(key);
            }
            PlayerCommand::KeyUp { key } => {
                self.input.release(key);
                if key == Key::Fire {
                    self.fire_projectile();
                }
            }
            PlayerCommand::ReleaseAllKeys => self.input.clear(),
            PlayerCommand::Fire => self.fire_projectile(),
            PlayerCommand::Restart => self.restart(),
            PlayerCommand::SpawnTarget { x, y, z } => self.spawn_target(x, y, z),
            PlayerCommand::SpawnRandomTargets { count } => self.spawn_random_targets(count),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, now: Duration) {
        // 1. Control mapping (only once the emitter exists)
        if self.emitter.is_initialized() {
            self.camera_direction = systems::control::run(
                &self.input,
                &mut self.emitter.transform,
                &self.camera,
                &self.config,
            );
        } else {
            self.camera_direction = self.camera.direction(&self.emitter.transform);
        }
        // 2. Projectile movement + prune
        systems::projectiles::run(
            &mut self.world,
            &mut self.projectiles,
            now,
            &mut self.despawn_buffer,
            &mut self.assets,
            &mut self.events,
        );
        // 3. Collision
        let hits = systems::collision::run(
            &mut self.world,
            &self.projectiles,
            &self.targets,
            self.config.hit_radius,
            self.config.single_hit_per_projectile,
            &mut self.events,
        );
        self.score.targets_hit += hits;
        // 4. Cleanup (broken targets, optional eviction)
        systems::cleanup::run(
            &mut self.world,
            &mut self.targets,
            self.config.evict_hidden_targets,
            &mut self.despawn_buffer,
            &mut self.assets,
            &mut self.events,
        );
    }

    /// Ask the backend for a visual. Immediate results are applied now;
    /// pending ones are parked until a later tick.
    fn request_spawn(&mut self, request: SpawnRequest) {
        match self.assets.load(request.model()) {
            LoadRequest::Ready(handle) => self.complete_spawn(CompletedLoad {
                request,
                result: Ok(handle),
            }),
            LoadRequest::Pending(ticket) => {
                debug!(model = %request.model(), ticket = ticket.0, "asset load pending");
                self.pending_loads.push(PendingLoad { ticket, request });
            }
            LoadRequest::Failed(reason) => self.complete_spawn(CompletedLoad {
                request,
                result: Err(reason),
            }),
        }
    }

    /// Poll parked loads and register whatever finished.
    fn resolve_loads(&mut self) {
        if self.pending_loads.is_empty() {
            return;
        }
        let completed = systems::loading::run(&mut self.pending_loads, &mut self.assets);
        for load in completed {
            self.complete_spawn(load);
        }
    }

    /// Register the entity a settled load was for, or abandon it.
    fn complete_spawn(&mut self, load: CompletedLoad) {
        let model = load.request.model();
        let handle = match load.result {
            Ok(handle) => handle,
            Err(reason) => {
                let error = AssetLoadError::new(model, reason);
                warn!(%error, "abandoning spawn");
                self.events.push(SimEvent::AssetLoadFailed {
                    model: error.model,
                    reason: error.reason,
                });
                return;
            }
        };

        if let Some((axis, angle)) = model.orientation_correction() {
            self.assets.rotate_children(handle, axis, angle);
        }
        let visual = Visual { handle, model };

        match load.request {
            SpawnRequest::Emitter => self.attach_emitter(visual),
            SpawnRequest::Target { position } => {
                let id = self.next_id();
                let entity = world_setup::spawn_target(&mut self.world, id, position, visual);
                self.targets.push(entity);
                self.score.targets_total += 1;
                debug!(target_id = id, ?position, "target spawned");
                self.events.push(SimEvent::TargetSpawned {
                    target_id: id,
                    position,
                });
            }
            SpawnRequest::Projectile {
                transform,
                velocity,
            } => {
                let id = self.next_id();
                let projectile =
                    Projectile::new(id, velocity, self.clock.now(), self.config.projectile_lifetime());
                let entity =
                    world_setup::spawn_projectile(&mut self.world, projectile, transform, visual);
                self.projectiles.push(entity);
                self.score.shots_fired += 1;
                debug!(projectile_id = id, "projectile fired");
                self.events.push(SimEvent::ProjectileFired { projectile_id: id });
            }
        }
    }

    fn attach_emitter(&mut self, visual: Visual) {
        if let Some(previous) = self.emitter.visual.replace(visual) {
            self.release_visual(previous.handle);
        }
        info!(handle = visual.handle.0, "emitter ready");
        self.events.push(SimEvent::EmitterReady);
    }

    fn release_visual(&mut self, handle: VisualHandle) {
        self.assets.release(handle);
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }
}

impl<B: VisualBackend> Drop for SimulationEngine<B> {
    /// Hand every visual back to the backend when the engine goes away.
    /// Pending loads are polled one last time and any that finished are
    /// released too. Loads still in flight after that belong to the backend.
    fn drop(&mut self) {
        for load in self.pending_loads.drain(..) {
            if let LoadStatus::Ready(handle) = self.assets.poll(load.ticket) {
                self.assets.release(handle);
            }
        }
        for entity in self.projectiles.drain(..).chain(self.targets.drain(..)) {
            if let Ok(visual) = self.world.get::<&Visual>(entity) {
                self.assets.release(visual.handle);
            }
        }
        if let Some(visual) = self.emitter.visual.take() {
            self.assets.release(visual.handle);
        }
    }
}

impl<B: VisualBackend> std::fmt::Debug for SimulationEngine<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("time", &self.time)
            .field("emitter", &self.emitter)
            .field("projectiles", &self.projectiles.len())
            .field("targets", &self.targets.len())
            .field("pending_loads", &self.pending_loads.len())
            .finish()
    }
}

/// Convenience for drivers that only need the defaults.
impl SimulationEngine<HeadlessBackend> {
    pub fn headless(config: SimConfig) -> Self {
        Self::new(config, HeadlessBackend::new())
    }
}

