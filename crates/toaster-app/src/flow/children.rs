//! The ordered child set of a flow

use std::fmt;

use toaster_core::prelude::*;

use super::{Coordinator, FlowContext, FlowId, FlowKind};
use crate::engine_event::EngineEvent;

/// Child flows in adoption order, at most one per identity
#[derive(Default)]
pub struct ChildFlows {
    flows: Vec<Box<dyn Coordinator>>,
}

impl fmt::Debug for ChildFlows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.flows.iter().map(|flow| (flow.id(), flow.kind())))
            .finish()
    }
}

impl ChildFlows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a flow. Adding an identity already present changes nothing and
    /// returns `false`.
    pub fn add(&mut self, flow: Box<dyn Coordinator>) -> bool {
        if self.contains(flow.id()) {
            trace!("Flow {} already adopted", flow.id());
            return false;
        }
        self.flows.push(flow);
        true
    }

    /// Release a flow. Removing an absent identity is a no-op.
    pub fn remove(&mut self, id: FlowId) -> Option<Box<dyn Coordinator>> {
        let index = self.flows.iter().position(|flow| flow.id() == id)?;
        Some(self.flows.remove(index))
    }

    pub fn contains(&self, id: FlowId) -> bool {
        self.flows.iter().any(|flow| flow.id() == id)
    }

    pub fn get_mut(&mut self, id: FlowId) -> Option<&mut Box<dyn Coordinator>> {
        self.flows.iter_mut().find(|flow| flow.id() == id)
    }

    pub fn ids(&self) -> Vec<FlowId> {
        self.flows.iter().map(|flow| flow.id()).collect()
    }

    /// First live child of the given kind
    pub fn find_kind(&self, kind: FlowKind) -> Option<FlowId> {
        self.flows
            .iter()
            .find(|flow| flow.kind() == kind)
            .map(|flow| flow.id())
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Drop every child (and, through them, every grandchild)
    pub fn clear(&mut self) {
        self.flows.clear();
    }

    /// Adopt `flow` and start it
    pub fn launch(&mut self, flow: Box<dyn Coordinator>, cx: &mut FlowContext<'_>) -> FlowId {
        let id = flow.id();
        let kind = flow.kind();
        if !self.add(flow) {
            return id;
        }
        debug!("Starting {:?} flow {}", kind, id);
        cx.host.emit(EngineEvent::FlowStarted { flow: id, kind });
        if let Some(child) = self.get_mut(id) {
            child.start(cx);
        }
        id
    }
}
