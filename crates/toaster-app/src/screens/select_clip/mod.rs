//! Clip picker, the second step of capturing a link

mod view_model;

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use toaster_core::{Backend, ClipId, ClipSummary, NameCheck, SelectableClip};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{SelectClipInput, SelectClipOutput, SelectClipViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectClipAction {
    Appear,
    /// `None` picks "All clips"
    Select { clip_id: Option<ClipId> },
    Save,
    TypeClipName { title: String },
    AddClip { title: String },
    Close,
}

#[derive(Debug, Clone)]
pub enum SelectClipUpdate {
    Clips(Vec<SelectableClip>),
    NameChecked(NameCheck),
    ClipAdded(ClipSummary),
    Saved(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectClipIntent {
    /// `true` when the link was stored
    SaveFinished(bool),
    PopToRoot,
}

#[derive(Debug)]
pub struct SelectClipView {
    pub url: String,
    pub clips: Vec<SelectableClip>,
    pub selected: Option<ClipId>,
    pub name_check: Option<NameCheck>,
    pub saving: bool,
    pub navigation_bar_hidden: bool,
    appear: Subject<()>,
    select: Subject<Option<ClipId>>,
    save: Subject<()>,
    titles: Subject<String>,
    add: Subject<String>,
}

impl SelectClipView {
    pub(crate) fn act(&mut self, action: SelectClipAction) -> Option<SelectClipIntent> {
        match action {
            SelectClipAction::Appear => {
                self.appear.send(());
            }
            SelectClipAction::Select { clip_id } => {
                self.selected = clip_id;
                self.select.send(clip_id);
            }
            SelectClipAction::Save => {
                if !self.saving {
                    self.saving = true;
                    self.save.send(());
                }
            }
            SelectClipAction::TypeClipName { title } => {
                self.titles.send(title);
            }
            SelectClipAction::AddClip { title } => {
                if self.name_check == Some(NameCheck::Available) {
                    self.add.send(title);
                }
            }
            SelectClipAction::Close => return Some(SelectClipIntent::PopToRoot),
        }
        None
    }

    pub(crate) fn apply(&mut self, update: SelectClipUpdate) -> Option<SelectClipIntent> {
        match update {
            SelectClipUpdate::Clips(clips) => self.clips = clips,
            SelectClipUpdate::NameChecked(check) => self.name_check = Some(check),
            SelectClipUpdate::ClipAdded(_) => self.name_check = None,
            SelectClipUpdate::Saved(saved) => {
                self.saving = false;
                return Some(SelectClipIntent::SaveFinished(saved));
            }
        }
        None
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    url: String,
    navigation_bar_hidden: bool,
    debounce: Duration,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (SelectClipView, SelectClipViewModel<A>) {
    let (appear, appear_events) = subject();
    let (select, select_events) = subject();
    let (save, save_events) = subject();
    let (titles, title_events) = subject();
    let (add, add_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = SelectClipViewModel::new(api, guard, debounce, url.clone());
    let output = view_model.transform(
        SelectClipInput {
            appear: appear_events,
            select: select_events,
            save: save_events,
            titles: title_events,
            add: add_events,
        },
        bag,
    );

    outlet.forward(bag, output.clips, |c| {
        ScreenUpdate::SelectClip(SelectClipUpdate::Clips(c))
    });
    outlet.forward(bag, output.name_check, |c| {
        ScreenUpdate::SelectClip(SelectClipUpdate::NameChecked(c))
    });
    outlet.forward(bag, output.added, |c| {
        ScreenUpdate::SelectClip(SelectClipUpdate::ClipAdded(c))
    });
    outlet.forward(bag, output.saved, |s| {
        ScreenUpdate::SelectClip(SelectClipUpdate::Saved(s))
    });
    outlet.forward_expiry(bag, expired);

    appear.send(());
    let view = SelectClipView {
        url,
        clips: Vec::new(),
        selected: None,
        name_check: None,
        saving: false,
        navigation_bar_hidden,
        appear,
        select,
        save,
        titles,
        add,
    };
    (view, view_model)
}
