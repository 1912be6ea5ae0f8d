//! The home tab: summary, recent links and curated links

mod view_model;

use std::sync::Arc;

use serde::Deserialize;
use toaster_core::{
    Backend, ClipId, HomeSummary, RecommendedSite, Toast, ToastId, WeeklyLink, ALL_CLIPS_TITLE,
};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{HomeInput, HomeOutput, HomeViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HomeAction {
    Appear,
    OpenRecent { toast_id: ToastId },
    OpenWeekly { link_id: i64 },
    OpenRecommended { site_id: i64 },
    OpenClip { clip_id: ClipId },
    OpenSetting,
    AddLink,
}

#[derive(Debug, Clone)]
pub enum HomeUpdate {
    Summary(HomeSummary),
    Recent(Vec<Toast>),
    Weekly(Vec<WeeklyLink>),
    Recommended(Vec<RecommendedSite>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeIntent {
    /// One of the user's own links
    MyLinkSelected {
        url: String,
        is_read: bool,
        toast_id: ToastId,
    },
    /// A curated link that does not belong to the user
    OurLinkSelected { url: String },
    SettingSelected,
    ArrowSelected { clip_id: ClipId, title: String },
    AddLinkSelected,
}

#[derive(Debug)]
pub struct HomeView {
    pub summary: Option<HomeSummary>,
    pub recent: Vec<Toast>,
    pub weekly: Vec<WeeklyLink>,
    pub recommended: Vec<RecommendedSite>,
    appear: Subject<()>,
}

impl HomeView {
    pub(crate) fn act(&mut self, action: HomeAction) -> Option<HomeIntent> {
        match action {
            HomeAction::Appear => {
                self.appear.send(());
                None
            }
            HomeAction::OpenRecent { toast_id } => {
                let toast = self.recent.iter().find(|t| t.id == toast_id)?;
                Some(HomeIntent::MyLinkSelected {
                    url: toast.url.clone(),
                    is_read: toast.is_read,
                    toast_id,
                })
            }
            HomeAction::OpenWeekly { link_id } => {
                let link = self.weekly.iter().find(|l| l.id == link_id)?;
                Some(HomeIntent::OurLinkSelected {
                    url: link.url.clone(),
                })
            }
            HomeAction::OpenRecommended { site_id } => {
                let site = self.recommended.iter().find(|s| s.id == site_id)?;
                Some(HomeIntent::OurLinkSelected {
                    url: site.url.clone(),
                })
            }
            HomeAction::OpenClip { clip_id } => {
                let title = self
                    .summary
                    .as_ref()?
                    .clips
                    .iter()
                    .find(|c| c.id == clip_id)
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|| ALL_CLIPS_TITLE.to_string());
                Some(HomeIntent::ArrowSelected { clip_id, title })
            }
            HomeAction::OpenSetting => Some(HomeIntent::SettingSelected),
            HomeAction::AddLink => Some(HomeIntent::AddLinkSelected),
        }
    }

    pub(crate) fn apply(&mut self, update: HomeUpdate) {
        match update {
            HomeUpdate::Summary(summary) => self.summary = Some(summary),
            HomeUpdate::Recent(recent) => self.recent = recent,
            HomeUpdate::Weekly(weekly) => self.weekly = weekly,
            HomeUpdate::Recommended(recommended) => self.recommended = recommended,
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (HomeView, HomeViewModel<A>) {
    let (appear, appear_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = HomeViewModel::new(api, guard);
    let output = view_model.transform(
        HomeInput {
            appear: appear_events,
        },
        bag,
    );

    outlet.forward(bag, output.summary, |s| {
        ScreenUpdate::Home(HomeUpdate::Summary(s))
    });
    outlet.forward(bag, output.recent, |r| {
        ScreenUpdate::Home(HomeUpdate::Recent(r))
    });
    outlet.forward(bag, output.weekly, |w| {
        ScreenUpdate::Home(HomeUpdate::Weekly(w))
    });
    outlet.forward(bag, output.recommended, |r| {
        ScreenUpdate::Home(HomeUpdate::Recommended(r))
    });
    outlet.forward_expiry(bag, expired);

    appear.send(());
    let view = HomeView {
        summary: None,
        recent: Vec::new(),
        weekly: Vec::new(),
        recommended: Vec::new(),
        appear,
    };
    (view, view_model)
}
