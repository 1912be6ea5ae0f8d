use toaster_core::prelude::*;
use toaster_core::ClipScope;

use super::{unhandled, ChildFlows, Coordinator, FlowContext, FlowId, FlowKind, FlowSignal};
use crate::nav::Router;
use crate::screens::detail_clip::DetailClipIntent;
use crate::screens::link_web::LinkWebIntent;
use crate::screens::{ScreenIntent, ScreenKind};

/// One clip's links, pushed onto the parent's stack
///
/// Finishes when its screen is popped.
#[derive(Debug)]
pub struct DetailClipFlow {
    id: FlowId,
    router: Router,
    scope: ClipScope,
    title: String,
    hide_tab_bar: bool,
    children: ChildFlows,
}

impl DetailClipFlow {
    pub fn new(router: Router, scope: ClipScope, title: String, hide_tab_bar: bool) -> Self {
        Self {
            id: super::next_flow_id(),
            router,
            scope,
            title,
            hide_tab_bar,
            children: ChildFlows::new(),
        }
    }
}

impl Coordinator for DetailClipFlow {
    fn id(&self) -> FlowId {
        self.id
    }

    fn kind(&self) -> FlowKind {
        FlowKind::DetailClip
    }

    fn router(&self) -> Router {
        self.router
    }

    fn start(&mut self, cx: &mut FlowContext<'_>) {
        let screen = cx
            .screens
            .detail_clip(self.scope, self.title.clone())
            .bound_to(self.id);
        if self.hide_tab_bar {
            self.router.push_hiding_tab_bar(cx.host, screen, true);
        } else {
            self.router.push(cx.host, screen, true);
        }
    }

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match intent {
            ScreenIntent::DetailClip(DetailClipIntent::LinkSelected {
                url,
                is_read,
                toast_id,
            }) => {
                let screen = cx
                    .screens
                    .link_web(url, Some(is_read), Some(toast_id))
                    .bound_to(self.id);
                self.router.push_hiding_tab_bar(cx.host, screen, true);
                FlowSignal::Continue
            }
            ScreenIntent::LinkWeb(LinkWebIntent::Back) => {
                self.router.pop(cx.host, true);
                FlowSignal::Continue
            }
            ScreenIntent::DetailClip(DetailClipIntent::Back) => {
                // Only our own list screen may be popped; a link page above it stays
                let own_screen_on_top = cx
                    .host
                    .top_screen(self.router.stack())
                    .is_some_and(|s| {
                        s.owner() == Some(self.id) && s.kind() == ScreenKind::DetailClip
                    });
                if !own_screen_on_top {
                    debug!("DetailClip flow {} ignoring back from a covered screen", self.id);
                    return FlowSignal::Continue;
                }
                self.router.pop(cx.host, true);
                FlowSignal::Finished
            }
            other => unhandled(self.kind(), self.id, &other),
        }
    }

    fn children(&mut self) -> &mut ChildFlows {
        &mut self.children
    }
}
