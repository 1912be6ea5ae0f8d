//! Flow construction

use toaster_core::ClipScope;

use super::{
    AddLinkFlow, ClipFlow, Coordinator, DetailClipFlow, HomeFlow, LoginFlow, SearchFlow,
    TabBarFlow, TimerFlow,
};
use crate::nav::Router;

/// Builds child flows. Flows come out unstarted; the parent adopts one and
/// then starts it.
pub trait FlowFactory: Send {
    fn login(&self, router: Router) -> Box<dyn Coordinator>;
    fn tab_bar(&self, router: Router) -> Box<dyn Coordinator>;
    fn home(&self, router: Router) -> Box<dyn Coordinator>;
    fn clip(&self, router: Router) -> Box<dyn Coordinator>;
    fn search(&self, router: Router) -> Box<dyn Coordinator>;
    fn timer(&self, router: Router) -> Box<dyn Coordinator>;
    fn add_link(&self, router: Router, navigation_bar_hidden: bool) -> Box<dyn Coordinator>;
    fn detail_clip(
        &self,
        router: Router,
        scope: ClipScope,
        title: String,
        hide_tab_bar: bool,
    ) -> Box<dyn Coordinator>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFlowFactory;

impl FlowFactory for DefaultFlowFactory {
    fn login(&self, router: Router) -> Box<dyn Coordinator> {
        Box::new(LoginFlow::new(router))
    }

    fn tab_bar(&self, router: Router) -> Box<dyn Coordinator> {
        Box::new(TabBarFlow::new(router))
    }

    fn home(&self, router: Router) -> Box<dyn Coordinator> {
        Box::new(HomeFlow::new(router))
    }

    fn clip(&self, router: Router) -> Box<dyn Coordinator> {
        Box::new(ClipFlow::new(router))
    }

    fn search(&self, router: Router) -> Box<dyn Coordinator> {
        Box::new(SearchFlow::new(router))
    }

    fn timer(&self, router: Router) -> Box<dyn Coordinator> {
        Box::new(TimerFlow::new(router))
    }

    fn add_link(&self, router: Router, navigation_bar_hidden: bool) -> Box<dyn Coordinator> {
        Box::new(AddLinkFlow::new(router, navigation_bar_hidden))
    }

    fn detail_clip(
        &self,
        router: Router,
        scope: ClipScope,
        title: String,
        hide_tab_bar: bool,
    ) -> Box<dyn Coordinator> {
        Box::new(DetailClipFlow::new(router, scope, title, hide_tab_bar))
    }
}
