//! Create or edit a reminder timer

mod view_model;

use std::sync::Arc;

use serde::Deserialize;
use toaster_core::{Backend, ClipId, Timer, TimerId, Weekday};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{
    DraftEdit, RemindTimerAddInput, RemindTimerAddOutput, RemindTimerAddViewModel, TimerDraft,
    TIME_FORMAT,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemindTimerAddAction {
    /// `HH:MM`, 24-hour clock
    SetTime { time: String },
    /// 1 (Monday) through 7 (Sunday)
    ToggleDay { day: Weekday },
    Save,
    Back,
}

#[derive(Debug, Clone)]
pub enum RemindTimerAddUpdate {
    SaveEnabled(bool),
    Saved,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemindTimerAddIntent {
    TimerSaved,
    Back,
}

#[derive(Debug)]
pub struct RemindTimerAddView {
    pub clip_id: ClipId,
    pub editing: Option<TimerId>,
    pub time: String,
    pub days: Vec<Weekday>,
    pub save_enabled: bool,
    edits: Subject<DraftEdit>,
    save: Subject<()>,
}

impl RemindTimerAddView {
    pub(crate) fn act(&mut self, action: RemindTimerAddAction) -> Option<RemindTimerAddIntent> {
        match action {
            RemindTimerAddAction::SetTime { time } => {
                self.time = time.clone();
                self.edits.send(DraftEdit::Time(time));
            }
            RemindTimerAddAction::ToggleDay { day } => {
                match self.days.iter().position(|d| *d == day) {
                    Some(index) => {
                        self.days.remove(index);
                    }
                    None => {
                        self.days.push(day);
                        self.days.sort_unstable();
                    }
                }
                self.edits.send(DraftEdit::ToggleDay(day));
            }
            RemindTimerAddAction::Save => {
                if self.save_enabled {
                    self.save.send(());
                }
            }
            RemindTimerAddAction::Back => return Some(RemindTimerAddIntent::Back),
        }
        None
    }

    pub(crate) fn apply(&mut self, update: RemindTimerAddUpdate) -> Option<RemindTimerAddIntent> {
        match update {
            RemindTimerAddUpdate::SaveEnabled(enabled) => {
                self.save_enabled = enabled;
                None
            }
            RemindTimerAddUpdate::Saved => Some(RemindTimerAddIntent::TimerSaved),
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    clip_id: ClipId,
    editing: Option<Timer>,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (RemindTimerAddView, RemindTimerAddViewModel<A>) {
    let (edits, edit_events) = subject();
    let (save, save_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = RemindTimerAddViewModel::new(api, guard, clip_id, editing.as_ref());
    let output = view_model.transform(
        RemindTimerAddInput {
            edits: edit_events,
            save: save_events,
        },
        bag,
    );

    outlet.forward(bag, output.save_enabled, |e| {
        ScreenUpdate::RemindTimerAdd(RemindTimerAddUpdate::SaveEnabled(e))
    });
    outlet.forward(bag, output.saved, |()| {
        ScreenUpdate::RemindTimerAdd(RemindTimerAddUpdate::Saved)
    });
    outlet.forward_expiry(bag, expired);

    let draft = view_model.initial_draft();
    let view = RemindTimerAddView {
        clip_id: draft.clip_id,
        editing: editing.as_ref().map(|t| t.id),
        time: draft
            .time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_default(),
        days: draft.days.iter().copied().collect(),
        save_enabled: draft.to_new_timer().is_some(),
        edits,
        save,
    };
    (view, view_model)
}
