use toaster_core::prelude::*;
use toaster_core::ClipScope;

use super::{unhandled, ChildFlows, Coordinator, FlowContext, FlowId, FlowKind, FlowSignal};
use crate::nav::Router;
use crate::screens::home::HomeIntent;
use crate::screens::link_web::LinkWebIntent;
use crate::screens::setting::SettingIntent;
use crate::screens::ScreenIntent;

/// The home tab
#[derive(Debug)]
pub struct HomeFlow {
    id: FlowId,
    router: Router,
    children: ChildFlows,
}

impl HomeFlow {
    pub fn new(router: Router) -> Self {
        Self {
            id: super::next_flow_id(),
            router,
            children: ChildFlows::new(),
        }
    }
}

impl Coordinator for HomeFlow {
    fn id(&self) -> FlowId {
        self.id
    }

    fn kind(&self) -> FlowKind {
        FlowKind::Home
    }

    fn router(&self) -> Router {
        self.router
    }

    fn start(&mut self, cx: &mut FlowContext<'_>) {
        let screen = cx.screens.home().bound_to(self.id);
        self.router.set_root(cx.host, screen, false);
    }

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match intent {
            ScreenIntent::Home(HomeIntent::MyLinkSelected {
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
            ScreenIntent::Home(HomeIntent::OurLinkSelected { url }) => {
                let screen = cx.screens.link_web(url, None, None).bound_to(self.id);
                self.router.push_hiding_tab_bar(cx.host, screen, true);
            }
            ScreenIntent::Home(HomeIntent::SettingSelected) => {
                let screen = cx.screens.setting().bound_to(self.id);
                self.router.push_hiding_tab_bar(cx.host, screen, true);
            }
            ScreenIntent::Home(HomeIntent::ArrowSelected { clip_id, title }) => {
                let flow = cx.flows.detail_clip(
                    self.router,
                    ClipScope::from_clip_id(clip_id),
                    title,
                    true,
                );
                self.children.launch(flow, cx);
            }
            ScreenIntent::Home(HomeIntent::AddLinkSelected) => {
                let flow = cx.flows.add_link(self.router, true);
                self.children.launch(flow, cx);
            }
            ScreenIntent::LinkWeb(LinkWebIntent::Back)
            | ScreenIntent::Setting(SettingIntent::Back) => {
                self.router.pop(cx.host, true);
            }
            ScreenIntent::Setting(SettingIntent::ChangeRoot) => {
                self.router.dismiss(cx.host, true, None);
                return FlowSignal::Finished;
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
        if kind == FlowKind::AddLink {
            debug!("Link capture done; restarting home");
            self.start(cx);
        }
        FlowSignal::Continue
    }

    fn children(&mut self) -> &mut ChildFlows {
        &mut self.children
    }
}
