use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveTime;
use toaster_core::{Backend, ClipId, NewTimer, Timer, TimerId, Weekday};

use crate::reactive::{CancelBag, Events};
use crate::view_model::{request, SessionGuard, ViewModel};

/// Time format of the picker, 24-hour clock
pub const TIME_FORMAT: &str = "%H:%M";

/// One change made in the timer form
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    Time(String),
    ToggleDay(Weekday),
}

/// The timer form as edited so far
#[derive(Debug, Clone, PartialEq)]
pub struct TimerDraft {
    pub clip_id: ClipId,
    pub time: Option<NaiveTime>,
    pub days: BTreeSet<Weekday>,
}

impl TimerDraft {
    pub fn new(clip_id: ClipId) -> Self {
        Self {
            clip_id,
            time: None,
            days: BTreeSet::new(),
        }
    }

    /// Start from an existing timer
    pub fn editing(timer: &Timer) -> Self {
        Self {
            clip_id: timer.clip_id,
            time: Some(timer.remind_time),
            days: timer.remind_days.iter().copied().collect(),
        }
    }

    pub fn apply(&mut self, edit: DraftEdit) {
        match edit {
            DraftEdit::Time(text) => {
                self.time = NaiveTime::parse_from_str(text.trim(), TIME_FORMAT).ok();
            }
            DraftEdit::ToggleDay(day) if (1..=7).contains(&day) => {
                if !self.days.remove(&day) {
                    self.days.insert(day);
                }
            }
            DraftEdit::ToggleDay(_) => {}
        }
    }

    /// A complete timer, or `None` while the time or the days are missing
    pub fn to_new_timer(&self) -> Option<NewTimer> {
        if self.days.is_empty() {
            return None;
        }
        Some(NewTimer {
            clip_id: self.clip_id,
            remind_time: self.time?,
            remind_days: self.days.iter().copied().collect(),
        })
    }
}

pub struct RemindTimerAddInput {
    pub edits: Events<DraftEdit>,
    pub save: Events<()>,
}

pub struct RemindTimerAddOutput {
    pub save_enabled: Events<bool>,
    pub saved: Events<()>,
}

pub struct RemindTimerAddViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
    initial: TimerDraft,
    editing: Option<TimerId>,
}

impl<A: Backend> RemindTimerAddViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard, clip_id: ClipId, editing: Option<&Timer>) -> Self {
        Self {
            api,
            guard,
            initial: editing
                .map(TimerDraft::editing)
                .unwrap_or_else(|| TimerDraft::new(clip_id)),
            editing: editing.map(|t| t.id),
        }
    }

    pub fn initial_draft(&self) -> &TimerDraft {
        &self.initial
    }
}

impl<A: Backend> ViewModel for RemindTimerAddViewModel<A> {
    type Input = RemindTimerAddInput;
    type Output = RemindTimerAddOutput;

    fn transform(&mut self, input: RemindTimerAddInput, bag: &mut CancelBag) -> RemindTimerAddOutput {
        let drafts = input
            .edits
            .scan(bag, self.initial.clone(), |draft, edit| draft.apply(edit));
        let [for_enabled, for_save] = drafts.split(bag);

        let save_enabled = for_enabled.map(bag, |draft| draft.to_new_timer().is_some());

        let timers = input
            .save
            .with_latest_from(bag, for_save, self.initial.clone())
            .filter_map(bag, |((), draft)| draft.to_new_timer());

        let api = self.api.clone();
        let editing = self.editing;
        let saved = request(timers, bag, &self.guard, "save_timer", move |timer| {
            let api = api.clone();
            async move {
                match editing {
                    Some(id) => api.edit_timer(id, timer).await,
                    None => api.add_timer(timer).await.map(|_| ()),
                }
            }
        });

        RemindTimerAddOutput {
            save_enabled,
            saved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::subject;
    use std::time::Duration;
    use toaster_api::{Endpoint, MemoryApi};
    use toaster_core::ToasterApi;

    #[test]
    fn test_draft_needs_time_and_a_day() {
        let mut draft = TimerDraft::new(1);
        assert_eq!(draft.to_new_timer(), None);

        draft.apply(DraftEdit::Time("21:30".into()));
        assert_eq!(draft.to_new_timer(), None);

        draft.apply(DraftEdit::ToggleDay(3));
        draft.apply(DraftEdit::ToggleDay(1));
        let timer = draft.to_new_timer().unwrap();
        assert_eq!(timer.remind_days, vec![1, 3]);
        assert_eq!(timer.remind_time, NaiveTime::from_hms_opt(21, 30, 0).unwrap());

        draft.apply(DraftEdit::Time("25:00".into()));
        assert_eq!(draft.to_new_timer(), None);
    }

    #[test]
    fn test_toggle_day_twice_removes_it() {
        let mut draft = TimerDraft::new(1);
        draft.apply(DraftEdit::ToggleDay(5));
        draft.apply(DraftEdit::ToggleDay(5));
        draft.apply(DraftEdit::ToggleDay(8));
        assert!(draft.days.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_creates_timer() {
        let api = Arc::new(MemoryApi::seeded());
        let mut bag = CancelBag::new();
        let (guard, _) = SessionGuard::new();
        let (edit, edits) = subject();
        let (save, save_events) = subject();
        let mut output = RemindTimerAddViewModel::new(api.clone(), guard, 2, None).transform(
            RemindTimerAddInput {
                edits,
                save: save_events,
            },
            &mut bag,
        );

        edit.send(DraftEdit::Time("07:15".into()));
        edit.send(DraftEdit::ToggleDay(6));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(output.save_enabled.drain(), vec![false, true]);

        save.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(output.saved.drain(), vec![()]);
        assert_eq!(api.calls_to(Endpoint::AddTimer), vec!["2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_editing_starts_from_existing_timer() {
        let api = Arc::new(MemoryApi::new());
        let clip = api.insert_clip("Daily");
        let existing = api
            .add_timer(NewTimer {
                clip_id: clip,
                remind_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                remind_days: vec![1],
            })
            .await
            .unwrap();
        let mut bag = CancelBag::new();
        let (guard, _) = SessionGuard::new();
        let (_edit, edits) = subject();
        let (save, save_events) = subject();
        let mut output =
            RemindTimerAddViewModel::new(api.clone(), guard, clip, Some(&existing)).transform(
                RemindTimerAddInput {
                    edits,
                    save: save_events,
                },
                &mut bag,
            );

        save.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(output.saved.drain(), vec![()]);
        assert_eq!(
            api.calls_to(Endpoint::EditTimer),
            vec![existing.id.to_string()]
        );
    }
}
