//! The seam between the simulation and whatever loads and draws models.
//!
//! Loading may take a while, so `load` either hands back a visual right away
//! or a ticket the engine polls at the start of each tick. The engine never
//! blocks on a load and never inspects a visual.

use std::collections::{BTreeMap, HashSet};

use glam::{DQuat, DVec3};

use blaster_core::visual::{LoadTicket, ModelId, VisualHandle};

/// Outcome of asking for a model.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadRequest {
    /// Loaded synchronously.
    Ready(VisualHandle),
    /// Still loading; poll the ticket on later ticks.
    Pending(LoadTicket),
    /// Rejected outright.
    Failed(String),
}

/// Progress of a ticketed load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Pending,
    Ready(VisualHandle),
    Failed(String),
}

/// Asset loader plus the handful of handle operations the engine needs.
pub trait VisualBackend {
    /// Start loading a model.
    fn load(&mut self, model: ModelId) -> LoadRequest;

    /// Check on a load started with `load`. Once a ticket reports `Ready` or
    /// `Failed` it is not polled again.
    fn poll(&mut self, ticket: LoadTicket) -> LoadStatus;

    /// Rotate the model's children about `axis`. Called once per visual,
    /// right after it loads, to line the model up with the world axes.
    fn rotate_children(&mut self, handle: VisualHandle, axis: DVec3, angle: f64);

    /// The owning entity is gone; detach and free the visual.
    fn release(&mut self, handle: VisualHandle);
}

/// What the headless backend remembers about a visual.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessVisual {
    pub model: ModelId,
    /// Accumulated child rotation from `rotate_children`.
    pub child_rotation: DQuat,
}

/// In-memory backend with no rendering behind it. Every load completes
/// immediately unless its model has been marked as failing.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    live: BTreeMap<VisualHandle, HeadlessVisual>,
    failing: HashSet<ModelId>,
    released: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future load of `model` fail, as if its asset file were missing.
    pub fn fail_model(&mut self, model: ModelId) {
        self.failing.insert(model);
    }

    pub fn restore_model(&mut self, model: ModelId) {
        self.failing.remove(&model);
    }

    /// Visuals handed out and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_count_of(&self, model: ModelId) -> usize {
        self.live.values().filter(|v| v.model == model).count()
    }

    pub fn released_count(&self) -> u64 {
        self.released
    }

    pub fn visual(&self, handle: VisualHandle) -> Option<&HeadlessVisual> {
        self.live.get(&handle)
    }

    pub fn is_live(&self, handle: VisualHandle) -> bool {
        self.live.contains_key(&handle)
    }
}

impl VisualBackend for HeadlessBackend {
    fn load(&mut self, model: ModelId) -> LoadRequest {
        if self.failing.contains(&model) {
            return LoadRequest::Failed(format!("asset `{}` unavailable", model.asset_name()));
        }
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(
            handle,
            HeadlessVisual {
                model,
                child_rotation: DQuat::IDENTITY,
            },
        );
        LoadRequest::Ready(handle)
    }

    fn poll(&mut self, ticket: LoadTicket) -> LoadStatus {
        // Never issues tickets.
        LoadStatus::Failed(format!("unknown load ticket {}", ticket.0))
    }

    fn rotate_children(&mut self, handle: VisualHandle, axis: DVec3, angle: f64) {
        if let Some(visual) = self.live.get_mut(&handle) {
            visual.child_rotation = visual.child_rotation * DQuat::from_axis_angle(axis, angle);
        }
    }

    fn release(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_some() {
            self.released += 1;
        }
    }
}
