//! Pick the clip a new timer reminds about

mod view_model;

use std::sync::Arc;

use serde::Deserialize;
use toaster_core::{Backend, ClipId, ClipSummary};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{RemindSelectClipInput, RemindSelectClipOutput, RemindSelectClipViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemindSelectClipAction {
    Appear,
    Select { clip_id: ClipId },
    Next,
    Back,
}

#[derive(Debug, Clone)]
pub enum RemindSelectClipUpdate {
    Clips(Vec<ClipSummary>),
    NextEnabled(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemindSelectClipIntent {
    ClipChosen(ClipId),
    Back,
}

#[derive(Debug)]
pub struct RemindSelectClipView {
    /// Real clips only; a timer cannot target "All clips"
    pub clips: Vec<ClipSummary>,
    pub selected: Option<ClipId>,
    pub next_enabled: bool,
    appear: Subject<()>,
    select: Subject<ClipId>,
}

impl RemindSelectClipView {
    pub(crate) fn act(&mut self, action: RemindSelectClipAction) -> Option<RemindSelectClipIntent> {
        match action {
            RemindSelectClipAction::Appear => {
                self.appear.send(());
                None
            }
            RemindSelectClipAction::Select { clip_id } => {
                self.selected = Some(clip_id);
                self.select.send(clip_id);
                None
            }
            RemindSelectClipAction::Next if self.next_enabled => {
                self.selected.map(RemindSelectClipIntent::ClipChosen)
            }
            RemindSelectClipAction::Next => None,
            RemindSelectClipAction::Back => Some(RemindSelectClipIntent::Back),
        }
    }

    pub(crate) fn apply(&mut self, update: RemindSelectClipUpdate) {
        match update {
            RemindSelectClipUpdate::Clips(clips) => self.clips = clips,
            RemindSelectClipUpdate::NextEnabled(enabled) => self.next_enabled = enabled,
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (RemindSelectClipView, RemindSelectClipViewModel<A>) {
    let (appear, appear_events) = subject();
    let (select, select_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = RemindSelectClipViewModel::new(api, guard);
    let output = view_model.transform(
        RemindSelectClipInput {
            appear: appear_events,
            select: select_events,
        },
        bag,
    );

    outlet.forward(bag, output.clips, |c| {
        ScreenUpdate::RemindSelectClip(RemindSelectClipUpdate::Clips(c))
    });
    outlet.forward(bag, output.next_enabled, |e| {
        ScreenUpdate::RemindSelectClip(RemindSelectClipUpdate::NextEnabled(e))
    });
    outlet.forward_expiry(bag, expired);

    appear.send(());
    let view = RemindSelectClipView {
        clips: Vec::new(),
        selected: None,
        next_enabled: false,
        appear,
        select,
    };
    (view, view_model)
}
