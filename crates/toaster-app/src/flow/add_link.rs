//! Link capture started from inside a tab

use toaster_core::prelude::*;

use super::{
    unhandled, ChildFlows, Coordinator, FlowContext, FlowEvent, FlowId, FlowKind, FlowSignal,
    LINK_SAVED_MESSAGE, LINK_SAVE_FAILED_MESSAGE,
};
use crate::message::Message;
use crate::nav::{Banner, Router};
use crate::screens::add_link::AddLinkIntent;
use crate::screens::select_clip::SelectClipIntent;
use crate::screens::ScreenIntent;

/// Takes over the parent's stack (tab bar hidden) until the link is saved or
/// abandoned, then finishes from the dismissal completion
#[derive(Debug)]
pub struct AddLinkFlow {
    id: FlowId,
    router: Router,
    navigation_bar_hidden: bool,
    children: ChildFlows,
}

impl AddLinkFlow {
    pub fn new(router: Router, navigation_bar_hidden: bool) -> Self {
        Self {
            id: super::next_flow_id(),
            router,
            navigation_bar_hidden,
            children: ChildFlows::new(),
        }
    }

    /// Leave capture; the flow finishes once the dismissal settles
    fn close(&self, cx: &mut FlowContext<'_>) {
        let completion = Message::Flow {
            flow: self.id,
            event: FlowEvent::Finish,
        };
        self.router.dismiss(cx.host, false, Some(completion));
    }
}

impl Coordinator for AddLinkFlow {
    fn id(&self) -> FlowId {
        self.id
    }

    fn kind(&self) -> FlowKind {
        FlowKind::AddLink
    }

    fn router(&self) -> Router {
        self.router
    }

    fn start(&mut self, cx: &mut FlowContext<'_>) {
        let screen = cx
            .screens
            .add_link(self.navigation_bar_hidden, None)
            .bound_to(self.id);
        self.router.set_root_hiding_tab_bar(cx.host, screen, true);
    }

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match intent {
            ScreenIntent::AddLink(AddLinkIntent::LinkInputCompleted(url)) => {
                let screen = cx
                    .screens
                    .select_clip(url, self.navigation_bar_hidden)
                    .bound_to(self.id);
                self.router.push(cx.host, screen, true);
            }
            ScreenIntent::AddLink(AddLinkIntent::PopToRoot)
            | ScreenIntent::SelectClip(SelectClipIntent::PopToRoot) => self.close(cx),
            ScreenIntent::SelectClip(SelectClipIntent::SaveFinished(true)) => {
                cx.host
                    .post_banner(self.router.stack(), Banner::success(LINK_SAVED_MESSAGE));
                self.close(cx);
            }
            ScreenIntent::SelectClip(SelectClipIntent::SaveFinished(false)) => {
                debug!("Link save failed; staying on clip selection");
                cx.host.post_banner(
                    self.router.stack(),
                    Banner::failure(LINK_SAVE_FAILED_MESSAGE),
                );
            }
            other => return unhandled(self.kind(), self.id, &other),
        }
        FlowSignal::Continue
    }

    fn children(&mut self) -> &mut ChildFlows {
        &mut self.children
    }
}
