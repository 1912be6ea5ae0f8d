//! In-app browser for one link

mod view_model;

use std::sync::Arc;

use serde::Deserialize;
use toaster_core::{Backend, ToastId};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{LinkWebInput, LinkWebOutput, LinkWebViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkWebAction {
    ToggleRead,
    Back,
}

#[derive(Debug, Clone)]
pub enum LinkWebUpdate {
    ReadChanged(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkWebIntent {
    Back,
}

#[derive(Debug)]
pub struct LinkWebView {
    pub url: String,
    /// `None` for links that are not the user's own
    pub is_read: Option<bool>,
    pub toast_id: Option<ToastId>,
    toggle: Subject<()>,
}

impl LinkWebView {
    pub(crate) fn act(&mut self, action: LinkWebAction) -> Option<LinkWebIntent> {
        match action {
            LinkWebAction::ToggleRead => {
                self.toggle.send(());
                None
            }
            LinkWebAction::Back => Some(LinkWebIntent::Back),
        }
    }

    pub(crate) fn apply(&mut self, update: LinkWebUpdate) {
        match update {
            LinkWebUpdate::ReadChanged(is_read) => self.is_read = Some(is_read),
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    url: String,
    is_read: Option<bool>,
    toast_id: Option<ToastId>,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (LinkWebView, LinkWebViewModel<A>) {
    let (toggle, toggle_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = LinkWebViewModel::new(api, guard, toast_id);
    let output = view_model.transform(
        LinkWebInput {
            toggle: toggle_events,
        },
        bag,
    );

    outlet.forward(bag, output.is_read, |r| {
        ScreenUpdate::LinkWeb(LinkWebUpdate::ReadChanged(r))
    });
    outlet.forward_expiry(bag, expired);

    let view = LinkWebView {
        url,
        is_read,
        toast_id,
        toggle,
    };
    (view, view_model)
}
