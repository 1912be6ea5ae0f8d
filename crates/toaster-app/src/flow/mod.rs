//! Flows: the controllers that decide which screen comes next
//!
//! Every flow owns one [`Router`] and an ordered set of child flows. Screens
//! report [`ScreenIntent`]s to the flow they are bound to; the engine finds
//! that flow by walking the tree from the root with [`deliver`].
//!
//! A flow never calls back into its parent. It finishes by returning
//! [`FlowSignal::Finished`] from its handler, and the parent observes that
//! signal on the way back up, removes the child and applies its own policy
//! (restart, propagate, or just drop the child). A flow whose parent is gone
//! is no longer reachable from the root, so its finish is inert.

mod add_link;
mod app;
mod children;
mod clip;
mod detail_clip;
mod factory;
mod home;
mod login;
mod search;
mod tab_bar;
mod timer;


use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use toaster_core::prelude::*;
use toaster_core::{CredentialStore, Pasteboard};

use crate::engine_event::EngineEvent;
use crate::nav::{Banner, NavigationHost, Router};
use crate::screens::{ScreenFactory, ScreenIntent};

pub use add_link::AddLinkFlow;
pub use app::AppFlow;
pub use children::ChildFlows;
pub use clip::ClipFlow;
pub use detail_clip::DetailClipFlow;
pub use factory::{DefaultFlowFactory, FlowFactory};
pub use home::HomeFlow;
pub use login::LoginFlow;
pub use search::SearchFlow;
pub use tab_bar::TabBarFlow;
pub use timer::{TimerFlow, TIMER_SAVED_MESSAGE};

/// Unique identifier for a flow
pub type FlowId = u64;

static FLOW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a new unique flow ID
pub fn next_flow_id() -> FlowId {
    FLOW_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const LINK_SAVED_MESSAGE: &str = "Link saved";
pub const LINK_SAVE_FAILED_MESSAGE: &str = "Could not save the link";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    App,
    Login,
    TabBar,
    Home,
    Clip,
    DetailClip,
    AddLink,
    Search,
    Timer,
}

/// What a flow tells its parent after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowSignal {
    Continue,
    /// The flow is done; the parent removes it and reacts
    Finished,
}

/// Something addressed to one flow
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// A screen bound to the flow asked for something
    Intent(ScreenIntent),
    /// Finish now, typically from a transition completion
    Finish,
}

/// Everything a flow may touch while handling one event
pub struct FlowContext<'a> {
    pub host: &'a mut NavigationHost,
    pub screens: &'a dyn ScreenFactory,
    pub flows: &'a dyn FlowFactory,
    pub credentials: &'a mut dyn CredentialStore,
    pub pasteboard: &'a mut dyn Pasteboard,
}

/// One navigation flow
pub trait Coordinator: Send {
    fn id(&self) -> FlowId;

    fn kind(&self) -> FlowKind;

    /// The stack this flow drives
    fn router(&self) -> Router;

    /// Show the first screen. Called once, right after the parent adopts the
    /// flow.
    fn start(&mut self, cx: &mut FlowContext<'_>);

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal;

    /// A child finished and has already been removed
    fn child_finished(
        &mut self,
        _child: FlowId,
        _kind: FlowKind,
        _cx: &mut FlowContext<'_>,
    ) -> FlowSignal {
        FlowSignal::Continue
    }

    fn children(&mut self) -> &mut ChildFlows;

    fn on_event(&mut self, event: FlowEvent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match event {
            FlowEvent::Intent(intent) => self.handle(intent, cx),
            FlowEvent::Finish => FlowSignal::Finished,
        }
    }
}

/// Outcome of [`deliver`]
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The target was found; carries the signal of the flow it was
    /// delivered through
    Handled(FlowSignal),
    /// No flow with that id is reachable; the event is handed back
    Missed(FlowEvent),
}

/// Route `event` to the flow `target` somewhere under `flow`
///
/// When a child reports [`FlowSignal::Finished`], the flow holding it
/// removes it (exactly once) and answers with its own
/// [`Coordinator::child_finished`] policy, which travels further up.
pub fn deliver(
    flow: &mut dyn Coordinator,
    target: FlowId,
    event: FlowEvent,
    cx: &mut FlowContext<'_>,
) -> Delivery {
    if flow.id() == target {
        return Delivery::Handled(flow.on_event(event, cx));
    }

    let mut event = event;
    for child_id in flow.children().ids() {
        let Some(child) = flow.children().get_mut(child_id) else {
            continue;
        };
        match deliver(child.as_mut(), target, event, cx) {
            Delivery::Missed(returned) => event = returned,
            Delivery::Handled(FlowSignal::Continue) => {
                return Delivery::Handled(FlowSignal::Continue)
            }
            Delivery::Handled(FlowSignal::Finished) => {
                let Some(child) = flow.children().remove(child_id) else {
                    return Delivery::Handled(FlowSignal::Continue);
                };
                let kind = child.kind();
                drop(child);
                debug!("{:?} flow {} finished under flow {}", kind, child_id, flow.id());
                cx.host.emit(EngineEvent::FlowFinished {
                    flow: child_id,
                    kind,
                });
                return Delivery::Handled(flow.child_finished(child_id, kind, cx));
            }
        }
    }
    Delivery::Missed(event)
}

/// Link capture ended on `router`: pop back on success, stay put on failure.
/// A banner reports the outcome either way.
pub(crate) fn link_saved(router: Router, saved: bool, cx: &mut FlowContext<'_>) {
    if saved {
        router.pop_to_root(cx.host, true);
        cx.host
            .post_banner(router.stack(), Banner::success(LINK_SAVED_MESSAGE));
    } else {
        cx.host
            .post_banner(router.stack(), Banner::failure(LINK_SAVE_FAILED_MESSAGE));
    }
}

/// Log an intent the flow has no transition for
pub(crate) fn unhandled(kind: FlowKind, id: FlowId, intent: &ScreenIntent) -> FlowSignal {
    debug!("{:?} flow {} ignores {:?}", kind, id, intent);
    FlowSignal::Continue
}
