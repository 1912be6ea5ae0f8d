//! The clip tab: every clip, plus creating new ones

mod view_model;

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use toaster_core::{Backend, ClipId, ClipList, ClipSummary, NameCheck};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{ClipInput, ClipOutput, ClipViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClipAction {
    Appear,
    Edit,
    OpenClip { clip_id: ClipId },
    TypeClipName { title: String },
    AddClip { title: String },
}

#[derive(Debug, Clone)]
pub enum ClipUpdate {
    Clips(ClipList),
    NameChecked(NameCheck),
    ClipAdded(ClipSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClipIntent {
    EditClipSelected(ClipList),
    ClipItemSelected { clip_id: ClipId, title: String },
}

#[derive(Debug)]
pub struct ClipView {
    pub clips: Option<ClipList>,
    pub name_check: Option<NameCheck>,
    pub last_added: Option<ClipSummary>,
    appear: Subject<()>,
    titles: Subject<String>,
    add: Subject<String>,
}

impl ClipView {
    /// Rows as displayed, "All clips" first
    pub fn rows(&self) -> Vec<ClipSummary> {
        self.clips
            .as_ref()
            .map(ClipList::with_all_clips)
            .unwrap_or_default()
    }

    pub(crate) fn act(&mut self, action: ClipAction) -> Option<ClipIntent> {
        match action {
            ClipAction::Appear => {
                self.appear.send(());
                None
            }
            ClipAction::Edit => self.clips.clone().map(ClipIntent::EditClipSelected),
            ClipAction::OpenClip { clip_id } => {
                let row = self.rows().into_iter().find(|c| c.id == clip_id)?;
                Some(ClipIntent::ClipItemSelected {
                    clip_id: row.id,
                    title: row.title,
                })
            }
            ClipAction::TypeClipName { title } => {
                self.titles.send(title);
                None
            }
            ClipAction::AddClip { title } => {
                if self.name_check == Some(NameCheck::Available) {
                    self.add.send(title);
                }
                None
            }
        }
    }

    pub(crate) fn apply(&mut self, update: ClipUpdate) {
        match update {
            ClipUpdate::Clips(clips) => self.clips = Some(clips),
            ClipUpdate::NameChecked(check) => self.name_check = Some(check),
            ClipUpdate::ClipAdded(clip) => {
                self.name_check = None;
                self.last_added = Some(clip);
            }
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    debounce: Duration,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (ClipView, ClipViewModel<A>) {
    let (appear, appear_events) = subject();
    let (titles, title_events) = subject();
    let (add, add_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = ClipViewModel::new(api, guard, debounce);
    let output = view_model.transform(
        ClipInput {
            appear: appear_events,
            titles: title_events,
            add: add_events,
        },
        bag,
    );

    outlet.forward(bag, output.clips, |c| ScreenUpdate::Clip(ClipUpdate::Clips(c)));
    outlet.forward(bag, output.name_check, |c| {
        ScreenUpdate::Clip(ClipUpdate::NameChecked(c))
    });
    outlet.forward(bag, output.added, |c| {
        ScreenUpdate::Clip(ClipUpdate::ClipAdded(c))
    });
    outlet.forward_expiry(bag, expired);

    appear.send(());
    let view = ClipView {
        clips: None,
        name_check: None,
        last_added: None,
        appear,
        titles,
        add,
    };
    (view, view_model)
}
