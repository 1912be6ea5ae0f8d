//! The signed-in container: one stack and one flow per tab

use toaster_core::prelude::*;

use super::{
    link_saved, unhandled, ChildFlows, Coordinator, FlowContext, FlowId, FlowKind, FlowSignal,
};
use crate::nav::{Router, StackId};
use crate::screens::add_link::AddLinkIntent;
use crate::screens::select_clip::SelectClipIntent;
use crate::screens::tab_bar::{Tab, TabBarIntent};
use crate::screens::ScreenIntent;

#[derive(Debug)]
pub struct TabBarFlow {
    id: FlowId,
    router: Router,
    tabs: Vec<(Tab, StackId)>,
    /// Flow started for each tab, by first selection
    tab_flows: Vec<(Tab, FlowId)>,
    children: ChildFlows,
}

impl TabBarFlow {
    pub fn new(router: Router) -> Self {
        Self {
            id: super::next_flow_id(),
            router,
            tabs: Vec::new(),
            tab_flows: Vec::new(),
            children: ChildFlows::new(),
        }
    }

    pub fn tab_stack(&self, tab: Tab) -> Option<StackId> {
        self.tabs
            .iter()
            .find(|(t, _)| *t == tab)
            .map(|(_, stack)| *stack)
    }

    /// Start the tab's flow unless one is already running
    fn start_tab(&mut self, tab: Tab, cx: &mut FlowContext<'_>) {
        let running = self
            .tab_flows
            .iter()
            .any(|(t, id)| *t == tab && self.children.contains(*id));
        if running {
            trace!("{:?} tab flow already running", tab);
            return;
        }
        let Some(stack) = self.tab_stack(tab) else {
            return;
        };

        let router = Router::new(stack);
        let flow = match tab {
            Tab::Home => cx.flows.home(router),
            Tab::Clip => cx.flows.clip(router),
            Tab::Search => cx.flows.search(router),
            Tab::Timer => cx.flows.timer(router),
            Tab::Plus => return,
        };
        let id = self.children.launch(flow, cx);
        self.tab_flows.retain(|(t, _)| *t != tab);
        self.tab_flows.push((tab, id));
    }
}

impl Coordinator for TabBarFlow {
    fn id(&self) -> FlowId {
        self.id
    }

    fn kind(&self) -> FlowKind {
        FlowKind::TabBar
    }

    fn router(&self) -> Router {
        self.router
    }

    fn start(&mut self, cx: &mut FlowContext<'_>) {
        self.tabs = Tab::CONTENT
            .iter()
            .map(|tab| (*tab, cx.host.create_stack()))
            .collect();
        let screen = cx.screens.tab_bar(self.tabs.clone()).bound_to(self.id);
        self.router.set_root(cx.host, screen, false);
        self.start_tab(Tab::Home, cx);
    }

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match intent {
            ScreenIntent::TabBar(TabBarIntent::TabSelected(tab)) => self.start_tab(tab, cx),
            ScreenIntent::TabBar(TabBarIntent::PlusSelected) => {
                let screen = cx.screens.add_link(false, None).bound_to(self.id);
                self.router.push(cx.host, screen, false);
            }
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
        child: FlowId,
        kind: FlowKind,
        _cx: &mut FlowContext<'_>,
    ) -> FlowSignal {
        self.tab_flows.retain(|(_, id)| *id != child);
        match kind {
            FlowKind::Home | FlowKind::Timer => FlowSignal::Finished,
            _ => FlowSignal::Continue,
        }
    }

    fn children(&mut self) -> &mut ChildFlows {
        &mut self.children
    }
}
