use toaster_core::ClipScope;

use super::{unhandled, ChildFlows, Coordinator, FlowContext, FlowId, FlowKind, FlowSignal};
use crate::nav::Router;
use crate::screens::link_web::LinkWebIntent;
use crate::screens::search::SearchIntent;
use crate::screens::ScreenIntent;

/// The search tab
#[derive(Debug)]
pub struct SearchFlow {
    id: FlowId,
    router: Router,
    children: ChildFlows,
}

impl SearchFlow {
    pub fn new(router: Router) -> Self {
        Self {
            id: super::next_flow_id(),
            router,
            children: ChildFlows::new(),
        }
    }
}

impl Coordinator for SearchFlow {
    fn id(&self) -> FlowId {
        self.id
    }

    fn kind(&self) -> FlowKind {
        FlowKind::Search
    }

    fn router(&self) -> Router {
        self.router
    }

    fn start(&mut self, cx: &mut FlowContext<'_>) {
        let screen = cx.screens.search().bound_to(self.id);
        self.router.set_root(cx.host, screen, false);
    }

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match intent {
            ScreenIntent::Search(SearchIntent::LinkSelected {
                url,
                is_read,
                toast_id,
            }) => {
                let screen = cx
                    .screens
                    .link_web(url, Some(is_read), Some(toast_id))
                    .bound_to(self.id);
                self.router.push_hiding_tab_bar(cx.host, screen, true);
            }
            ScreenIntent::Search(SearchIntent::ClipSelected { clip_id, title }) => {
                let flow = cx.flows.detail_clip(
                    self.router,
                    ClipScope::from_clip_id(clip_id),
                    title,
                    true,
                );
                self.children.launch(flow, cx);
            }
            ScreenIntent::LinkWeb(LinkWebIntent::Back) => self.router.pop(cx.host, true),
            other => return unhandled(self.kind(), self.id, &other),
        }
        FlowSignal::Continue
    }

    fn children(&mut self) -> &mut ChildFlows {
        &mut self.children
    }
}
