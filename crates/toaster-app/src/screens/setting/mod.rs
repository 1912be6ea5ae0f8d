//! Account settings: log out and withdraw

mod view_model;

use std::sync::Arc;

use serde::Deserialize;
use toaster_core::Backend;

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{SettingInput, SettingOutput, SettingViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingAction {
    Logout,
    Withdraw,
    Back,
}

#[derive(Debug, Clone)]
pub enum SettingUpdate {
    RootChanged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingIntent {
    /// The session ended; leave the signed-in tree
    ChangeRoot,
    Back,
}

#[derive(Debug)]
pub struct SettingView {
    logout: Subject<()>,
    withdraw: Subject<()>,
}

impl SettingView {
    pub(crate) fn act(&mut self, action: SettingAction) -> Option<SettingIntent> {
        match action {
            SettingAction::Logout => {
                self.logout.send(());
                None
            }
            SettingAction::Withdraw => {
                self.withdraw.send(());
                None
            }
            SettingAction::Back => Some(SettingIntent::Back),
        }
    }

    pub(crate) fn apply(&mut self, update: SettingUpdate) -> Option<SettingIntent> {
        match update {
            SettingUpdate::RootChanged => Some(SettingIntent::ChangeRoot),
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (SettingView, SettingViewModel<A>) {
    let (logout, logout_events) = subject();
    let (withdraw, withdraw_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = SettingViewModel::new(api, guard);
    let output = view_model.transform(
        SettingInput {
            logout: logout_events,
            withdraw: withdraw_events,
        },
        bag,
    );

    outlet.forward(bag, output.root_changed, |()| {
        ScreenUpdate::Setting(SettingUpdate::RootChanged)
    });
    outlet.forward_expiry(bag, expired);

    (SettingView { logout, withdraw }, view_model)
}
