//! The root flow: chooses between signing in and the tab bar

use toaster_core::prelude::*;

use super::{
    link_saved, unhandled, ChildFlows, Coordinator, FlowContext, FlowId, FlowKind, FlowSignal,
};
use crate::nav::Router;
use crate::screens::add_link::AddLinkIntent;
use crate::screens::select_clip::SelectClipIntent;
use crate::screens::ScreenIntent;

/// Owns the session state. Never finishes.
#[derive(Debug)]
pub struct AppFlow {
    id: FlowId,
    router: Router,
    logged_in: bool,
    children: ChildFlows,
}

impl AppFlow {
    pub fn new(router: Router, logged_in: bool) -> Self {
        Self {
            id: super::next_flow_id(),
            router,
            logged_in,
            children: ChildFlows::new(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Tear the signed-in tree down and start over at login
    ///
    /// Returns `false` (and changes nothing) when already signed out.
    pub fn session_expired(&mut self, cx: &mut FlowContext<'_>) -> bool {
        if !self.logged_in {
            trace!("Session expiry while signed out ignored");
            return false;
        }
        info!("Session expired; restarting at login");
        self.router.dismiss(cx.host, false, None);
        self.children.clear();
        self.sign_out(cx);
        self.start(cx);
        true
    }

    /// Offer the link on the pasteboard, if any, for saving
    ///
    /// The pasteboard is taken (and so cleared) on every call. While signed
    /// out the link is dropped.
    pub fn handle_pasteboard(&mut self, cx: &mut FlowContext<'_>) {
        let Some(url) = cx.pasteboard.take_url() else {
            return;
        };
        if !self.logged_in {
            debug!("Dropping pasteboard link while signed out");
            return;
        }
        debug!("Pasteboard link offered for capture: {}", url);
        self.router.pop_to_root(cx.host, false);
        let screen = cx.screens.add_link(false, Some(url)).bound_to(self.id);
        self.router.push(cx.host, screen, true);
    }

    fn sign_out(&mut self, cx: &mut FlowContext<'_>) {
        self.logged_in = false;
        if let Err(e) = cx.credentials.clear() {
            warn!("Failed to clear credentials: {}", e);
        }
    }
}

impl Coordinator for AppFlow {
    fn id(&self) -> FlowId {
        self.id
    }

    fn kind(&self) -> FlowKind {
        FlowKind::App
    }

    fn router(&self) -> Router {
        self.router
    }

    fn start(&mut self, cx: &mut FlowContext<'_>) {
        let flow = if self.logged_in {
            cx.flows.tab_bar(self.router)
        } else {
            cx.flows.login(self.router)
        };
        self.children.launch(flow, cx);
    }

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match intent {
            ScreenIntent::AddLink(AddLinkIntent::LinkInputCompleted(url)) => {
                let screen = cx.screens.select_clip(url, false).bound_to(self.id);
                self.router.push(cx.host, screen, true);
            }
            ScreenIntent::AddLink(AddLinkIntent::PopToRoot)
            | ScreenIntent::SelectClip(SelectClipIntent::PopToRoot) => {
                self.router.pop_to_root(cx.host, false);
            }
            ScreenIntent::SelectClip(SelectClipIntent::SaveFinished(saved)) => {
                link_saved(self.router, saved, cx);
            }
            other => return unhandled(self.kind(), self.id, &other),
        }
        FlowSignal::Continue
    }

    fn child_finished(
        &mut self,
        _child: FlowId,
        kind: FlowKind,
        cx: &mut FlowContext<'_>,
    ) -> FlowSignal {
        match kind {
            FlowKind::Login => {
                self.logged_in = true;
                self.start(cx);
            }
            FlowKind::TabBar => {
                self.sign_out(cx);
                self.start(cx);
            }
            other => trace!("App flow ignores finished {:?} flow", other),
        }
        FlowSignal::Continue
    }

    fn children(&mut self) -> &mut ChildFlows {
        &mut self.children
    }
}
