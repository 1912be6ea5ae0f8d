//! Screens: one view plus its view-model
//!
//! A screen's view holds the visual state and the input subjects of its
//! view-model. User actions go into the view ([`Screen::act`]); view-model
//! outputs come back as [`ScreenUpdate`] messages ([`Screen::apply`]). Either
//! may yield a [`ScreenIntent`] for the flow that owns the screen.

pub mod factory;

pub mod add_link;
pub mod clip;
pub mod detail_clip;
pub mod edit_clip;
pub mod home;
pub mod link_web;
pub mod login;
pub mod remind;
pub mod remind_select_clip;
pub mod remind_timer_add;
pub mod search;
pub mod select_clip;
pub mod setting;
pub mod tab_bar;

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use toaster_core::prelude::*;

use crate::flow::FlowId;
use crate::message::Message;
use crate::nav::StackId;
use crate::reactive::{CancelBag, Events};

pub use factory::{DefaultScreenFactory, ScreenConfig, ScreenFactory};

use add_link::{AddLinkAction, AddLinkIntent, AddLinkUpdate, AddLinkView};
use clip::{ClipAction, ClipIntent, ClipUpdate, ClipView};
use detail_clip::{DetailClipAction, DetailClipIntent, DetailClipUpdate, DetailClipView};
use edit_clip::{EditClipAction, EditClipIntent, EditClipUpdate, EditClipView};
use home::{HomeAction, HomeIntent, HomeUpdate, HomeView};
use link_web::{LinkWebAction, LinkWebIntent, LinkWebUpdate, LinkWebView};
use login::{LoginAction, LoginIntent, LoginUpdate, LoginView};
use remind::{RemindAction, RemindIntent, RemindUpdate, RemindView};
use remind_select_clip::{
    RemindSelectClipAction, RemindSelectClipIntent, RemindSelectClipUpdate, RemindSelectClipView,
};
use remind_timer_add::{
    RemindTimerAddAction, RemindTimerAddIntent, RemindTimerAddUpdate, RemindTimerAddView,
};
use search::{SearchAction, SearchIntent, SearchUpdate, SearchView};
use select_clip::{SelectClipAction, SelectClipIntent, SelectClipUpdate, SelectClipView};
use setting::{SettingAction, SettingIntent, SettingUpdate, SettingView};
use tab_bar::{TabBarAction, TabBarIntent, TabBarView};

/// Unique identifier for a screen
pub type ScreenId = u64;

static SCREEN_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a new unique screen ID
pub fn next_screen_id() -> ScreenId {
    SCREEN_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    Login,
    TabBar,
    Home,
    Clip,
    EditClip,
    AddLink,
    SelectClip,
    DetailClip,
    LinkWeb,
    Search,
    Remind,
    RemindSelectClip,
    RemindTimerAdd,
    Setting,
}

// ─────────────────────────────────────────────────────────────────
// Per-screen sum types
// ─────────────────────────────────────────────────────────────────

/// Visual state of a screen
#[derive(Debug)]
pub enum ScreenView {
    Login(LoginView),
    TabBar(TabBarView),
    Home(HomeView),
    Clip(ClipView),
    EditClip(EditClipView),
    AddLink(AddLinkView),
    SelectClip(SelectClipView),
    DetailClip(DetailClipView),
    LinkWeb(LinkWebView),
    Search(SearchView),
    Remind(RemindView),
    RemindSelectClip(RemindSelectClipView),
    RemindTimerAdd(RemindTimerAddView),
    Setting(SettingView),
}

/// Something the user did on a screen
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "action", rename_all = "snake_case")]
pub enum ScreenAction {
    Login(LoginAction),
    TabBar(TabBarAction),
    Home(HomeAction),
    Clip(ClipAction),
    EditClip(EditClipAction),
    AddLink(AddLinkAction),
    SelectClip(SelectClipAction),
    DetailClip(DetailClipAction),
    LinkWeb(LinkWebAction),
    Search(SearchAction),
    Remind(RemindAction),
    RemindSelectClip(RemindSelectClipAction),
    RemindTimerAdd(RemindTimerAddAction),
    Setting(SettingAction),
}

/// A view-model output addressed to its screen
#[derive(Debug, Clone)]
pub enum ScreenUpdate {
    Login(LoginUpdate),
    Home(HomeUpdate),
    Clip(ClipUpdate),
    EditClip(EditClipUpdate),
    AddLink(AddLinkUpdate),
    SelectClip(SelectClipUpdate),
    DetailClip(DetailClipUpdate),
    LinkWeb(LinkWebUpdate),
    Search(SearchUpdate),
    Remind(RemindUpdate),
    RemindSelectClip(RemindSelectClipUpdate),
    RemindTimerAdd(RemindTimerAddUpdate),
    Setting(SettingUpdate),
}

/// What a screen asks of the flow that owns it
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenIntent {
    Login(LoginIntent),
    TabBar(TabBarIntent),
    Home(HomeIntent),
    Clip(ClipIntent),
    EditClip(EditClipIntent),
    AddLink(AddLinkIntent),
    SelectClip(SelectClipIntent),
    DetailClip(DetailClipIntent),
    LinkWeb(LinkWebIntent),
    Search(SearchIntent),
    Remind(RemindIntent),
    RemindSelectClip(RemindSelectClipIntent),
    RemindTimerAdd(RemindTimerAddIntent),
    Setting(SettingIntent),
}

// ─────────────────────────────────────────────────────────────────
// Screen
// ─────────────────────────────────────────────────────────────────

/// A live screen
///
/// Owns its view, its view-model and the bag holding the view-model's
/// pipelines. Dropping the screen stops everything it started.
pub struct Screen {
    id: ScreenId,
    owner: Option<FlowId>,
    hides_tab_bar: bool,
    view: ScreenView,
    child_stacks: Vec<StackId>,
    view_model: Option<Box<dyn Any + Send>>,
    bag: CancelBag,
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("owner", &self.owner)
            .field("hides_tab_bar", &self.hides_tab_bar)
            .field("child_stacks", &self.child_stacks)
            .field("bag", &self.bag)
            .finish_non_exhaustive()
    }
}

impl Screen {
    pub fn new(id: ScreenId, view: ScreenView, bag: CancelBag) -> Self {
        Self {
            id,
            owner: None,
            hides_tab_bar: false,
            view,
            child_stacks: Vec::new(),
            view_model: None,
            bag,
        }
    }

    /// Keep the view-model alive for the screen's lifetime
    pub fn with_view_model<V: Any + Send>(mut self, view_model: V) -> Self {
        self.view_model = Some(Box::new(view_model));
        self
    }

    /// Stacks hosted inside this screen, released along with it
    pub fn hosting(mut self, stacks: Vec<StackId>) -> Self {
        self.child_stacks = stacks;
        self
    }

    /// Bind the intent outlet to a flow. Intents of an unbound screen are
    /// dropped.
    pub fn bound_to(mut self, flow: FlowId) -> Self {
        self.owner = Some(flow);
        self
    }

    pub(crate) fn hiding_tab_bar(mut self) -> Self {
        self.hides_tab_bar = true;
        self
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn owner(&self) -> Option<FlowId> {
        self.owner
    }

    pub fn hides_tab_bar(&self) -> bool {
        self.hides_tab_bar
    }

    pub fn view(&self) -> &ScreenView {
        &self.view
    }

    pub fn view_model<V: Any>(&self) -> Option<&V> {
        self.view_model.as_ref()?.downcast_ref()
    }

    pub fn child_stacks(&self) -> &[StackId] {
        &self.child_stacks
    }

    pub(crate) fn take_child_stacks(&mut self) -> Vec<StackId> {
        std::mem::take(&mut self.child_stacks)
    }

    pub fn kind(&self) -> ScreenKind {
        match &self.view {
            ScreenView::Login(_) => ScreenKind::Login,
            ScreenView::TabBar(_) => ScreenKind::TabBar,
            ScreenView::Home(_) => ScreenKind::Home,
            ScreenView::Clip(_) => ScreenKind::Clip,
            ScreenView::EditClip(_) => ScreenKind::EditClip,
            ScreenView::AddLink(_) => ScreenKind::AddLink,
            ScreenView::SelectClip(_) => ScreenKind::SelectClip,
            ScreenView::DetailClip(_) => ScreenKind::DetailClip,
            ScreenView::LinkWeb(_) => ScreenKind::LinkWeb,
            ScreenView::Search(_) => ScreenKind::Search,
            ScreenView::Remind(_) => ScreenKind::Remind,
            ScreenView::RemindSelectClip(_) => ScreenKind::RemindSelectClip,
            ScreenView::RemindTimerAdd(_) => ScreenKind::RemindTimerAdd,
            ScreenView::Setting(_) => ScreenKind::Setting,
        }
    }

    /// Feed a user action to the view
    pub fn act(&mut self, action: ScreenAction) -> Option<ScreenIntent> {
        use ScreenAction as A;
        use ScreenView as V;

        match (&mut self.view, action) {
            (V::Login(v), A::Login(a)) => v.act(a).map(ScreenIntent::Login),
            (V::TabBar(v), A::TabBar(a)) => v.act(a).map(ScreenIntent::TabBar),
            (V::Home(v), A::Home(a)) => v.act(a).map(ScreenIntent::Home),
            (V::Clip(v), A::Clip(a)) => v.act(a).map(ScreenIntent::Clip),
            (V::EditClip(v), A::EditClip(a)) => v.act(a).map(ScreenIntent::EditClip),
            (V::AddLink(v), A::AddLink(a)) => v.act(a).map(ScreenIntent::AddLink),
            (V::SelectClip(v), A::SelectClip(a)) => v.act(a).map(ScreenIntent::SelectClip),
            (V::DetailClip(v), A::DetailClip(a)) => v.act(a).map(ScreenIntent::DetailClip),
            (V::LinkWeb(v), A::LinkWeb(a)) => v.act(a).map(ScreenIntent::LinkWeb),
            (V::Search(v), A::Search(a)) => v.act(a).map(ScreenIntent::Search),
            (V::Remind(v), A::Remind(a)) => v.act(a).map(ScreenIntent::Remind),
            (V::RemindSelectClip(v), A::RemindSelectClip(a)) => {
                v.act(a).map(ScreenIntent::RemindSelectClip)
            }
            (V::RemindTimerAdd(v), A::RemindTimerAdd(a)) => {
                v.act(a).map(ScreenIntent::RemindTimerAdd)
            }
            (V::Setting(v), A::Setting(a)) => v.act(a).map(ScreenIntent::Setting),
            (_, action) => {
                warn!(
                    "Action {:?} does not apply to {:?} screen {}",
                    action,
                    self.kind(),
                    self.id
                );
                None
            }
        }
    }

    /// Apply a view-model output to the view
    pub fn apply(&mut self, update: ScreenUpdate) -> Option<ScreenIntent> {
        use ScreenUpdate as U;
        use ScreenView as V;

        match (&mut self.view, update) {
            (V::Login(v), U::Login(u)) => v.apply(u).map(ScreenIntent::Login),
            (V::Home(v), U::Home(u)) => {
                v.apply(u);
                None
            }
            (V::Clip(v), U::Clip(u)) => {
                v.apply(u);
                None
            }
            (V::EditClip(v), U::EditClip(u)) => {
                v.apply(u);
                None
            }
            (V::AddLink(v), U::AddLink(u)) => {
                v.apply(u);
                None
            }
            (V::SelectClip(v), U::SelectClip(u)) => v.apply(u).map(ScreenIntent::SelectClip),
            (V::DetailClip(v), U::DetailClip(u)) => {
                v.apply(u);
                None
            }
            (V::LinkWeb(v), U::LinkWeb(u)) => {
                v.apply(u);
                None
            }
            (V::Search(v), U::Search(u)) => {
                v.apply(u);
                None
            }
            (V::Remind(v), U::Remind(u)) => {
                v.apply(u);
                None
            }
            (V::RemindSelectClip(v), U::RemindSelectClip(u)) => {
                v.apply(u);
                None
            }
            (V::RemindTimerAdd(v), U::RemindTimerAdd(u)) => {
                v.apply(u).map(ScreenIntent::RemindTimerAdd)
            }
            (V::Setting(v), U::Setting(u)) => v.apply(u).map(ScreenIntent::Setting),
            (_, update) => {
                debug!("Stale update {:?} for screen {}", update, self.id);
                None
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Outlet
// ─────────────────────────────────────────────────────────────────

/// Carries a screen's view-model outputs back to the engine as messages
#[derive(Debug, Clone)]
pub struct Outlet {
    screen: ScreenId,
    tx: mpsc::UnboundedSender<Message>,
}

impl Outlet {
    pub fn new(screen: ScreenId, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { screen, tx }
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn forward<T: Send + 'static>(
        &self,
        bag: &mut CancelBag,
        events: Events<T>,
        wrap: fn(T) -> ScreenUpdate,
    ) {
        let outlet = self.clone();
        events.for_each(bag, move |value| {
            let message = Message::ScreenUpdate {
                screen: outlet.screen,
                update: wrap(value),
            };
            if outlet.tx.send(message).is_err() {
                trace!("Engine gone; dropping update for screen {}", outlet.screen);
            }
        });
    }

    /// Route the view-model's session expiry to the engine
    pub fn forward_expiry(&self, bag: &mut CancelBag, events: Events<()>) {
        let outlet = self.clone();
        events.for_each(bag, move |()| {
            let _ = outlet.tx.send(Message::SessionExpired {
                screen: outlet.screen,
            });
        });
    }
}
