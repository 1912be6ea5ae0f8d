//! Stack operations on behalf of one flow

use toaster_core::prelude::*;

use super::{NavigationHost, StackId};
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::screens::Screen;

/// Handle on one navigation stack
///
/// Holds only the stack id, so copying a router never extends a stack's
/// life. Operations are fire-and-forget and never decide anything: the only
/// observable result is the stack's new state, plus the optional completion
/// message queued for after the transition settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Router {
    stack: StackId,
}

impl Router {
    pub fn new(stack: StackId) -> Self {
        Self { stack }
    }

    pub fn stack(&self) -> StackId {
        self.stack
    }

    fn released(&self, host: &NavigationHost, op: &str) -> bool {
        if host.contains_stack(self.stack) {
            false
        } else {
            trace!("{} on released stack {} ignored", op, self.stack);
            true
        }
    }

    /// Replace the whole stack with `screen`
    pub fn set_root(&self, host: &mut NavigationHost, screen: Screen, animated: bool) {
        if self.released(host, "set_root") {
            return;
        }
        let previous = host
            .stack_mut(self.stack)
            .map(|stack| std::mem::take(&mut stack.screens))
            .unwrap_or_default();
        for old in previous.into_iter().rev() {
            host.release_screen(old);
        }
        self.place(host, screen, animated);
    }

    /// [`Router::set_root`], with the tab bar hidden while `screen` is on top
    pub fn set_root_hiding_tab_bar(
        &self,
        host: &mut NavigationHost,
        screen: Screen,
        animated: bool,
    ) {
        self.set_root(host, screen.hiding_tab_bar(), animated);
    }

    pub fn push(&self, host: &mut NavigationHost, screen: Screen, animated: bool) {
        if self.released(host, "push") {
            return;
        }
        self.place(host, screen, animated);
    }

    /// [`Router::push`], with the tab bar hidden while `screen` is on top
    pub fn push_hiding_tab_bar(&self, host: &mut NavigationHost, screen: Screen, animated: bool) {
        self.push(host, screen.hiding_tab_bar(), animated);
    }

    fn place(&self, host: &mut NavigationHost, screen: Screen, animated: bool) {
        let event = EngineEvent::ScreenShown {
            screen: screen.id(),
            kind: screen.kind(),
            stack: self.stack,
            flow: screen.owner(),
            animated,
        };
        if let Some(stack) = host.stack_mut(self.stack) {
            stack.screens.push(screen);
        }
        host.emit(event);
    }

    /// Remove the top screen. A stack never pops its last screen.
    pub fn pop(&self, host: &mut NavigationHost, animated: bool) {
        if self.released(host, "pop") {
            return;
        }
        let popped = host.stack_mut(self.stack).and_then(|stack| {
            if stack.screens.len() > 1 {
                stack.screens.pop()
            } else {
                None
            }
        });
        match popped {
            Some(screen) => {
                trace!("pop (animated: {}) on stack {}", animated, self.stack);
                host.release_screen(screen);
            }
            None => trace!("pop on single-screen stack {} ignored", self.stack),
        }
    }

    /// Remove everything above the root screen
    pub fn pop_to_root(&self, host: &mut NavigationHost, animated: bool) {
        if self.released(host, "pop_to_root") {
            return;
        }
        let popped = host
            .stack_mut(self.stack)
            .map(|stack| {
                let keep = stack.screens.len().min(1);
                stack.screens.split_off(keep)
            })
            .unwrap_or_default();
        trace!(
            "pop_to_root (animated: {}) released {} screen(s) on stack {}",
            animated,
            popped.len(),
            self.stack
        );
        for screen in popped.into_iter().rev() {
            host.release_screen(screen);
        }
    }

    /// Show `screen` modally on a fresh stack over this one
    ///
    /// Returns the router of the new stack. A stack presents one thing at a
    /// time: presenting over an existing presentation is refused, the
    /// screen is dropped and `completion` never fires.
    pub fn present(
        &self,
        host: &mut NavigationHost,
        screen: Screen,
        animated: bool,
        completion: Option<Message>,
    ) -> Option<Router> {
        if self.released(host, "present") {
            return None;
        }
        if let Some(existing) = host.stack(self.stack).and_then(|s| s.presented()) {
            warn!(
                "Stack {} already presents stack {}; present refused",
                self.stack, existing
            );
            host.release_screen(screen);
            return None;
        }

        let modal = Router::new(host.create_stack());
        modal.place(host, screen, animated);
        if let Some(stack) = host.stack_mut(self.stack) {
            stack.presented = Some(modal.stack);
        }
        host.emit(EngineEvent::Presented {
            stack: modal.stack,
            over: self.stack,
        });
        if let Some(completion) = completion {
            host.queue_completion(completion);
        }
        Some(modal)
    }

    /// Dismiss what this stack presents or, when it presents nothing and is
    /// itself presented, dismiss this stack
    ///
    /// `completion` fires after the transition settles, even when there was
    /// nothing to dismiss.
    pub fn dismiss(&self, host: &mut NavigationHost, animated: bool, completion: Option<Message>) {
        if self.released(host, "dismiss") {
            return;
        }
        let target = host
            .stack(self.stack)
            .and_then(|s| s.presented())
            .or_else(|| host.presenter_of(self.stack).map(|_| self.stack));

        match target {
            Some(target) => {
                trace!("dismiss (animated: {}) stack {}", animated, target);
                host.release_stack(target);
                host.emit(EngineEvent::Dismissed { stack: target });
            }
            None => trace!("dismiss on stack {} with nothing presented", self.stack),
        }
        if let Some(completion) = completion {
            host.queue_completion(completion);
        }
    }
}
