//! Screen construction
//!
//! Flows ask the factory for screens instead of building them, so a test can
//! swap in its own factory and every screen shares one backend and one
//! message channel.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use toaster_core::{Backend, ClipId, ClipList, ClipScope, Timer, ToastId};

use super::tab_bar::{Tab, TabBarView};
use super::{
    add_link, clip, detail_clip, edit_clip, home, link_web, login, next_screen_id, remind,
    remind_select_clip, remind_timer_add, search, select_clip, setting, Outlet, Screen,
    ScreenView,
};
use crate::message::Message;
use crate::nav::StackId;
use crate::reactive::CancelBag;

/// Knobs shared by every screen's view-model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Quiet period before a typed query or clip name is acted on
    pub debounce: Duration,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(200),
        }
    }
}

/// Builds fully wired screens. Screens come out unbound: the flow that
/// places one binds it to itself.
pub trait ScreenFactory: Send {
    fn login(&self) -> Screen;
    /// The tab bar hosting one stack per content tab
    fn tab_bar(&self, tabs: Vec<(Tab, StackId)>) -> Screen;
    fn home(&self) -> Screen;
    fn clip(&self) -> Screen;
    fn edit_clip(&self, clips: ClipList) -> Screen;
    fn add_link(&self, navigation_bar_hidden: bool, prefill: Option<String>) -> Screen;
    fn select_clip(&self, url: String, navigation_bar_hidden: bool) -> Screen;
    fn detail_clip(&self, scope: ClipScope, title: String) -> Screen;
    fn link_web(&self, url: String, is_read: Option<bool>, toast_id: Option<ToastId>) -> Screen;
    fn search(&self) -> Screen;
    fn remind(&self) -> Screen;
    fn remind_select_clip(&self) -> Screen;
    fn remind_timer_add(&self, clip_id: ClipId, editing: Option<Timer>) -> Screen;
    fn setting(&self) -> Screen;
}

/// Factory backed by one shared [`Backend`]
pub struct DefaultScreenFactory<A> {
    api: Arc<A>,
    tx: mpsc::UnboundedSender<Message>,
    config: ScreenConfig,
}

impl<A: Backend> DefaultScreenFactory<A> {
    pub fn new(api: Arc<A>, tx: mpsc::UnboundedSender<Message>, config: ScreenConfig) -> Self {
        Self { api, tx, config }
    }

    fn assemble<V, F>(&self, build: F) -> Screen
    where
        V: Any + Send,
        F: FnOnce(&Outlet, &mut CancelBag) -> (ScreenView, V),
    {
        let id = next_screen_id();
        let outlet = Outlet::new(id, self.tx.clone());
        let mut bag = CancelBag::new();
        let (view, view_model) = build(&outlet, &mut bag);
        Screen::new(id, view, bag).with_view_model(view_model)
    }
}

impl<A: Backend> ScreenFactory for DefaultScreenFactory<A> {
    fn login(&self) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = login::build(self.api.clone(), outlet, bag);
            (ScreenView::Login(view), vm)
        })
    }

    fn tab_bar(&self, tabs: Vec<(Tab, StackId)>) -> Screen {
        let stacks = tabs.iter().map(|(_, stack)| *stack).collect();
        let view = ScreenView::TabBar(TabBarView::new(tabs));
        Screen::new(next_screen_id(), view, CancelBag::new()).hosting(stacks)
    }

    fn home(&self) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = home::build(self.api.clone(), outlet, bag);
            (ScreenView::Home(view), vm)
        })
    }

    fn clip(&self) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = clip::build(self.api.clone(), self.config.debounce, outlet, bag);
            (ScreenView::Clip(view), vm)
        })
    }

    fn edit_clip(&self, clips: ClipList) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) =
                edit_clip::build(self.api.clone(), clips, self.config.debounce, outlet, bag);
            (ScreenView::EditClip(view), vm)
        })
    }

    fn add_link(&self, navigation_bar_hidden: bool, prefill: Option<String>) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = add_link::build(navigation_bar_hidden, prefill, outlet, bag);
            (ScreenView::AddLink(view), vm)
        })
    }

    fn select_clip(&self, url: String, navigation_bar_hidden: bool) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = select_clip::build(
                self.api.clone(),
                url,
                navigation_bar_hidden,
                self.config.debounce,
                outlet,
                bag,
            );
            (ScreenView::SelectClip(view), vm)
        })
    }

    fn detail_clip(&self, scope: ClipScope, title: String) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = detail_clip::build(self.api.clone(), scope, title, outlet, bag);
            (ScreenView::DetailClip(view), vm)
        })
    }

    fn link_web(&self, url: String, is_read: Option<bool>, toast_id: Option<ToastId>) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) =
                link_web::build(self.api.clone(), url, is_read, toast_id, outlet, bag);
            (ScreenView::LinkWeb(view), vm)
        })
    }

    fn search(&self) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = search::build(self.api.clone(), self.config.debounce, outlet, bag);
            (ScreenView::Search(view), vm)
        })
    }

    fn remind(&self) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = remind::build(self.api.clone(), outlet, bag);
            (ScreenView::Remind(view), vm)
        })
    }

    fn remind_select_clip(&self) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = remind_select_clip::build(self.api.clone(), outlet, bag);
            (ScreenView::RemindSelectClip(view), vm)
        })
    }

    fn remind_timer_add(&self, clip_id: ClipId, editing: Option<Timer>) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) =
                remind_timer_add::build(self.api.clone(), clip_id, editing, outlet, bag);
            (ScreenView::RemindTimerAdd(view), vm)
        })
    }

    fn setting(&self) -> Screen {
        self.assemble(|outlet, bag| {
            let (view, vm) = setting::build(self.api.clone(), outlet, bag);
            (ScreenView::Setting(view), vm)
        })
    }
}
