//! A backend whose loads finish only when the test says so.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use glam::DVec3;

use blaster_sim::assets::{LoadRequest, LoadStatus, VisualBackend};
use blaster_sim::core::visual::{LoadTicket, ModelId, VisualHandle};

#[derive(Debug, Default)]
pub struct DeferredBackend {
    next: u64,
    /// Ticket -> model for every load still waiting on the test.
    waiting: BTreeMap<u64, ModelId>,
    settled: HashMap<u64, LoadStatus>,
    pub live: BTreeMap<VisualHandle, ModelId>,
    pub rotations: Vec<(VisualHandle, DVec3, f64)>,
    pub released: Vec<VisualHandle>,
    /// Same releases, readable after the engine owning this backend is gone.
    release_log: Rc<RefCell<Vec<VisualHandle>>>,
    pub polls: u64,
}

impl DeferredBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release_log(&self) -> Rc<RefCell<Vec<VisualHandle>>> {
        Rc::clone(&self.release_log)
    }

    /// Tickets still loading, oldest first.
    pub fn waiting(&self) -> Vec<(LoadTicket, ModelId)> {
        self.waiting
            .iter()
            .map(|(&t, &m)| (LoadTicket(t), m))
            .collect()
    }

    /// Finish the load behind `ticket` with a fresh visual.
    pub fn complete(&mut self, ticket: LoadTicket) -> VisualHandle {
        let model = self
            .waiting
            .remove(&ticket.0)
            .expect("ticket is not waiting");
        let handle = VisualHandle(1000 + ticket.0);
        self.live.insert(handle, model);
        self.settled.insert(ticket.0, LoadStatus::Ready(handle));
        handle
    }

    pub fn fail(&mut self, ticket: LoadTicket, reason: &str) {
        self.waiting
            .remove(&ticket.0)
            .expect("ticket is not waiting");
        self.settled
            .insert(ticket.0, LoadStatus::Failed(reason.to_string()));
    }

    /// Finish every waiting load of `model`, oldest first.
    pub fn complete_all(&mut self, model: ModelId) -> Vec<VisualHandle> {
        let tickets: Vec<LoadTicket> = self
            .waiting()
            .into_iter()
            .filter(|&(_, m)| m == model)
            .map(|(t, _)| t)
            .collect();
        tickets.into_iter().map(|t| self.complete(t)).collect()
    }
}

impl VisualBackend for DeferredBackend {
    fn load(&mut self, model: ModelId) -> LoadRequest {
        let ticket = self.next;
        self.next += 1;
        self.waiting.insert(ticket, model);
        LoadRequest::Pending(LoadTicket(ticket))
    }

    fn poll(&mut self, ticket: LoadTicket) -> LoadStatus {
        self.polls += 1;
        self.settled
            .remove(&ticket.0)
            .unwrap_or(LoadStatus::Pending)
    }

    fn rotate_children(&mut self, handle: VisualHandle, axis: DVec3, angle: f64) {
        self.rotations.push((handle, axis, angle));
    }

    fn release(&mut self, handle: VisualHandle) {
        self.live.remove(&handle);
        self.released.push(handle);
        self.release_log.borrow_mut().push(handle);
    }
}
