//! Asset load tracking.
//!
//! Entities are only registered once their visual exists. A spawn that has to
//! wait on the backend is parked here as a `PendingLoad` and polled at the
//! start of each tick. Loads finish in whatever order the backend finishes
//! them; each one is handed back exactly once.

use glam::DVec3;

use blaster_core::types::Transform;
use blaster_core::visual::{LoadTicket, ModelId, VisualHandle};

use crate::assets::{LoadStatus, VisualBackend};

/// What to build once the visual is ready. Everything the entity needs is
/// captured at request time, so completion does not depend on world state.
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnRequest {
    Emitter,
    Target { position: DVec3 },
    Projectile { transform: Transform, velocity: DVec3 },
}

impl SpawnRequest {
    pub fn model(&self) -> ModelId {
        match self {
            SpawnRequest::Emitter => ModelId::Emitter,
            SpawnRequest::Target { .. } => ModelId::Target,
            SpawnRequest::Projectile { .. } => ModelId::Projectile,
        }
    }
}

/// A spawn waiting on the backend.
#[derive(Debug, Clone)]
pub struct PendingLoad {
    pub ticket: LoadTicket,
    pub request: SpawnRequest,
}

/// A load that has settled one way or the other.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedLoad {
    pub request: SpawnRequest,
    pub result: Result<VisualHandle, String>,
}

/// Poll every pending load. Settled loads are removed from `pending` and
/// returned in request order; the rest stay parked.
pub fn run(pending: &mut Vec<PendingLoad>, assets: &mut dyn VisualBackend) -> Vec<CompletedLoad> {
    let mut completed = Vec::new();
    pending.retain(|load| match assets.poll(load.ticket) {
        LoadStatus::Pending => true,
        LoadStatus::Ready(handle) => {
            completed.push(CompletedLoad {
                request: load.request.clone(),
                result: Ok(handle),
            });
            false
        }
        LoadStatus::Failed(reason) => {
            completed.push(CompletedLoad {
                request: load.request.clone(),
                result: Err(reason),
            });
            false
        }
    });
    completed
}
