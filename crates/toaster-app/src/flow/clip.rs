use toaster_core::ClipScope;

use super::{unhandled, ChildFlows, Coordinator, FlowContext, FlowId, FlowKind, FlowSignal};
use crate::nav::Router;
use crate::screens::clip::ClipIntent;
use crate::screens::edit_clip::EditClipIntent;
use crate::screens::ScreenIntent;

/// The clip tab: the clip list, its editor and clip details
#[derive(Debug)]
pub struct ClipFlow {
    id: FlowId,
    router: Router,
    children: ChildFlows,
}

impl ClipFlow {
    pub fn new(router: Router) -> Self {
        Self {
            id: super::next_flow_id(),
            router,
            children: ChildFlows::new(),
        }
    }
}

impl Coordinator for ClipFlow {
    fn id(&self) -> FlowId {
        self.id
    }

    fn kind(&self) -> FlowKind {
        FlowKind::Clip
    }

    fn router(&self) -> Router {
        self.router
    }

    fn start(&mut self, cx: &mut FlowContext<'_>) {
        let screen = cx.screens.clip().bound_to(self.id);
        self.router.set_root(cx.host, screen, false);
    }

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match intent {
            ScreenIntent::Clip(ClipIntent::EditClipSelected(clips)) => {
                let screen = cx.screens.edit_clip(clips).bound_to(self.id);
                self.router.push_hiding_tab_bar(cx.host, screen, false);
            }
            ScreenIntent::Clip(ClipIntent::ClipItemSelected { clip_id, title }) => {
                let flow = cx.flows.detail_clip(
                    self.router,
                    ClipScope::from_clip_id(clip_id),
                    title,
                    false,
                );
                self.children.launch(flow, cx);
            }
            ScreenIntent::EditClip(EditClipIntent::Back) => self.router.pop(cx.host, true),
            other => return unhandled(self.kind(), self.id, &other),
        }
        FlowSignal::Continue
    }

    fn children(&mut self) -> &mut ChildFlows {
        &mut self.children
    }
}
