//! The registry that owns every navigation stack

use std::collections::HashMap;

use serde::Serialize;
use toaster_core::prelude::*;

use super::{next_stack_id, Banner, StackId};
use crate::engine_event::EngineEvent;
use crate::flow::FlowId;
use crate::message::Message;
use crate::screens::{Screen, ScreenId, ScreenKind};

/// One navigation stack: pushed screens plus at most one presented stack
#[derive(Debug, Default)]
pub struct NavStack {
    pub(super) screens: Vec<Screen>,
    pub(super) presented: Option<StackId>,
    pub(super) banner: Option<Banner>,
}

impl NavStack {
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn top(&self) -> Option<&Screen> {
        self.screens.last()
    }

    pub fn presented(&self) -> Option<StackId> {
        self.presented
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

/// Owner of all stacks, and through them of all screens
///
/// Transition completions are queued here and handed to the engine only after
/// the current processing step, never run inline.
#[derive(Debug, Default)]
pub struct NavigationHost {
    stacks: HashMap<StackId, NavStack>,
    completions: Vec<Message>,
    events: Vec<EngineEvent>,
}

impl NavigationHost {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────
    // Stacks
    // ─────────────────────────────────────────────────────────

    pub fn create_stack(&mut self) -> StackId {
        let id = next_stack_id();
        self.stacks.insert(id, NavStack::default());
        trace!("Created stack {}", id);
        id
    }

    pub fn contains_stack(&self, id: StackId) -> bool {
        self.stacks.contains_key(&id)
    }

    pub fn stack(&self, id: StackId) -> Option<&NavStack> {
        self.stacks.get(&id)
    }

    pub(super) fn stack_mut(&mut self, id: StackId) -> Option<&mut NavStack> {
        self.stacks.get_mut(&id)
    }

    pub fn stack_count(&self) -> usize {
        self.stacks.len()
    }

    /// The stack presenting `id`, if any
    pub(super) fn presenter_of(&self, id: StackId) -> Option<StackId> {
        self.stacks
            .iter()
            .find(|(_, stack)| stack.presented == Some(id))
            .map(|(presenter, _)| *presenter)
    }

    /// Drop a stack with everything on it and everything it presents
    pub fn release_stack(&mut self, id: StackId) {
        let Some(stack) = self.stacks.remove(&id) else {
            return;
        };
        trace!("Releasing stack {}", id);

        if let Some(presenter) = self.presenter_of(id) {
            if let Some(presenter) = self.stacks.get_mut(&presenter) {
                presenter.presented = None;
            }
        }
        if let Some(presented) = stack.presented {
            self.release_stack(presented);
        }
        for screen in stack.screens.into_iter().rev() {
            self.release_screen(screen);
        }
    }

    /// Drop a screen: its pipelines stop and the stacks it hosts go with it
    pub(super) fn release_screen(&mut self, mut screen: Screen) {
        for child in screen.take_child_stacks() {
            self.release_stack(child);
        }
        self.emit(EngineEvent::ScreenRemoved {
            screen: screen.id(),
            kind: screen.kind(),
        });
        debug!("Released {:?} screen {}", screen.kind(), screen.id());
    }

    // ─────────────────────────────────────────────────────────
    // Screens
    // ─────────────────────────────────────────────────────────

    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.stacks
            .values()
            .flat_map(|stack| stack.screens.iter())
            .find(|screen| screen.id() == id)
    }

    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen> {
        self.stacks
            .values_mut()
            .flat_map(|stack| stack.screens.iter_mut())
            .find(|screen| screen.id() == id)
    }

    /// Which stack a screen sits on
    pub fn stack_of(&self, id: ScreenId) -> Option<StackId> {
        self.stacks
            .iter()
            .find(|(_, stack)| stack.screens.iter().any(|s| s.id() == id))
            .map(|(stack_id, _)| *stack_id)
    }

    pub fn top_screen(&self, stack: StackId) -> Option<&Screen> {
        self.stacks.get(&stack).and_then(|s| s.top())
    }

    /// The screen the user sees on `stack`: follows presentations to the
    /// topmost modal
    pub fn visible_screen(&self, stack: StackId) -> Option<&Screen> {
        let mut current = stack;
        while let Some(presented) = self.stacks.get(&current).and_then(|s| s.presented) {
            current = presented;
        }
        self.top_screen(current)
    }

    /// Screen kinds on a stack, bottom first
    pub fn kinds(&self, stack: StackId) -> Vec<ScreenKind> {
        self.stacks
            .get(&stack)
            .map(|s| s.screens.iter().map(|screen| screen.kind()).collect())
            .unwrap_or_default()
    }

    pub fn screen_count(&self) -> usize {
        self.stacks.values().map(|s| s.screens.len()).sum()
    }

    /// The tab bar is hidden while the top screen asked for it
    pub fn tab_bar_hidden(&self, stack: StackId) -> bool {
        self.top_screen(stack)
            .map(|s| s.hides_tab_bar())
            .unwrap_or(false)
    }

    // ─────────────────────────────────────────────────────────
    // Banners
    // ─────────────────────────────────────────────────────────

    pub fn post_banner(&mut self, stack: StackId, banner: Banner) {
        let Some(target) = self.stacks.get_mut(&stack) else {
            trace!("Banner for released stack {} dropped", stack);
            return;
        };
        target.banner = Some(banner.clone());
        self.emit(EngineEvent::Banner { stack, banner });
    }

    pub fn banner(&self, stack: StackId) -> Option<&Banner> {
        self.stacks.get(&stack).and_then(|s| s.banner.as_ref())
    }

    pub fn dismiss_banner(&mut self, stack: StackId) -> Option<Banner> {
        self.stacks.get_mut(&stack).and_then(|s| s.banner.take())
    }

    // ─────────────────────────────────────────────────────────
    // Completions and events
    // ─────────────────────────────────────────────────────────

    pub(super) fn queue_completion(&mut self, completion: Message) {
        self.completions.push(completion);
    }

    /// Completions of transitions that finished during the last step
    pub fn take_completions(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.completions)
    }

    pub(crate) fn emit(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // ─────────────────────────────────────────────────────────
    // Snapshots
    // ─────────────────────────────────────────────────────────

    pub fn snapshot(&self, stack: StackId) -> Option<StackSnapshot> {
        let nav = self.stacks.get(&stack)?;
        Some(StackSnapshot {
            id: stack,
            screens: nav
                .screens
                .iter()
                .map(|screen| ScreenSnapshot {
                    id: screen.id(),
                    kind: screen.kind(),
                    flow: screen.owner(),
                    hides_tab_bar: screen.hides_tab_bar(),
                    stacks: screen
                        .child_stacks()
                        .iter()
                        .filter_map(|child| self.snapshot(*child))
                        .collect(),
                })
                .collect(),
            presented: nav
                .presented
                .and_then(|p| self.snapshot(p))
                .map(Box::new),
            banner: nav.banner.clone(),
        })
    }
}

/// Serializable view of a stack and everything under it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSnapshot {
    pub id: StackId,
    pub screens: Vec<ScreenSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presented: Option<Box<StackSnapshot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenSnapshot {
    pub id: ScreenId,
    pub kind: ScreenKind,
    pub flow: Option<FlowId>,
    pub hides_tab_bar: bool,
    /// Stacks hosted by the screen (the tab bar's tabs)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stacks: Vec<StackSnapshot>,
}
