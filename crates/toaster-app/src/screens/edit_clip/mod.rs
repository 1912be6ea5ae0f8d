//! Clip maintenance: delete, rename and drag to reorder

mod view_model;

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use toaster_core::{Backend, ClipId, ClipList, ClipRename, ClipSummary, NameCheck, PriorityChange};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{priority_change, EditClipInput, EditClipOutput, EditClipViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditClipAction {
    Appear,
    Delete { clip_id: ClipId },
    TypeClipName { title: String },
    Rename { clip_id: ClipId, title: String },
    /// Drag a row from one displayed index to another
    Drag { from: usize, to: usize },
    Back,
}

#[derive(Debug, Clone)]
pub enum EditClipUpdate {
    Clips(ClipList),
    NameChecked(NameCheck),
    Deleted(ClipId),
    Renamed(ClipRename),
    Reordered(PriorityChange),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditClipIntent {
    Back,
}

#[derive(Debug)]
pub struct EditClipView {
    /// Displayed rows, "All clips" pinned first
    pub rows: Vec<ClipSummary>,
    pub name_check: Option<NameCheck>,
    appear: Subject<()>,
    delete: Subject<ClipId>,
    titles: Subject<String>,
    rename: Subject<ClipRename>,
    drag: Subject<(usize, usize)>,
}

impl EditClipView {
    pub(crate) fn act(&mut self, action: EditClipAction) -> Option<EditClipIntent> {
        match action {
            EditClipAction::Appear => {
                self.appear.send(());
            }
            EditClipAction::Delete { clip_id } => {
                self.delete.send(clip_id);
            }
            EditClipAction::TypeClipName { title } => {
                self.titles.send(title);
            }
            EditClipAction::Rename { clip_id, title } => {
                self.rename.send(ClipRename { clip_id, title });
            }
            EditClipAction::Drag { from, to } => {
                self.drag.send((from, to));
            }
            EditClipAction::Back => return Some(EditClipIntent::Back),
        }
        None
    }

    pub(crate) fn apply(&mut self, update: EditClipUpdate) {
        match update {
            EditClipUpdate::Clips(list) => self.rows = list.with_all_clips(),
            EditClipUpdate::NameChecked(check) => self.name_check = Some(check),
            EditClipUpdate::Renamed(_) => self.name_check = None,
            EditClipUpdate::Deleted(_) | EditClipUpdate::Reordered(_) => {}
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    clips: ClipList,
    debounce: Duration,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (EditClipView, EditClipViewModel<A>) {
    let (appear, appear_events) = subject();
    let (delete, delete_events) = subject();
    let (titles, title_events) = subject();
    let (rename, rename_events) = subject();
    let (drag, drag_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let rows = clips.with_all_clips();
    let mut view_model = EditClipViewModel::new(api, guard, debounce, rows.clone());
    let output = view_model.transform(
        EditClipInput {
            appear: appear_events,
            delete: delete_events,
            titles: title_events,
            rename: rename_events,
            reorder: drag_events,
        },
        bag,
    );

    outlet.forward(bag, output.clips, |c| {
        ScreenUpdate::EditClip(EditClipUpdate::Clips(c))
    });
    outlet.forward(bag, output.name_check, |c| {
        ScreenUpdate::EditClip(EditClipUpdate::NameChecked(c))
    });
    outlet.forward(bag, output.deleted, |id| {
        ScreenUpdate::EditClip(EditClipUpdate::Deleted(id))
    });
    outlet.forward(bag, output.renamed, |r| {
        ScreenUpdate::EditClip(EditClipUpdate::Renamed(r))
    });
    outlet.forward(bag, output.reordered, |c| {
        ScreenUpdate::EditClip(EditClipUpdate::Reordered(c))
    });
    outlet.forward_expiry(bag, expired);

    let view = EditClipView {
        rows,
        name_check: None,
        appear,
        delete,
        titles,
        rename,
        drag,
    };
    (view, view_model)
}
