//! The timer tab: reminder timers for clips

mod view_model;

use std::sync::Arc;

use serde::Deserialize;
use toaster_core::{Backend, Timer, TimerBoard, TimerId};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{RemindInput, RemindOutput, RemindViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemindAction {
    Appear,
    Toggle { timer_id: TimerId },
    Delete { timer_id: TimerId },
    AddTimer,
    EditTimer { timer_id: TimerId },
}

#[derive(Debug, Clone)]
pub enum RemindUpdate {
    Board(TimerBoard),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemindIntent {
    AddTimerSelected,
    EditTimerSelected(Timer),
}

#[derive(Debug)]
pub struct RemindView {
    pub board: TimerBoard,
    appear: Subject<()>,
    toggle: Subject<TimerId>,
    delete: Subject<TimerId>,
}

impl RemindView {
    pub(crate) fn act(&mut self, action: RemindAction) -> Option<RemindIntent> {
        match action {
            RemindAction::Appear => {
                self.appear.send(());
                None
            }
            RemindAction::Toggle { timer_id } => {
                self.toggle.send(timer_id);
                None
            }
            RemindAction::Delete { timer_id } => {
                self.delete.send(timer_id);
                None
            }
            RemindAction::AddTimer => Some(RemindIntent::AddTimerSelected),
            RemindAction::EditTimer { timer_id } => self
                .board
                .find(timer_id)
                .cloned()
                .map(RemindIntent::EditTimerSelected),
        }
    }

    pub(crate) fn apply(&mut self, update: RemindUpdate) {
        match update {
            RemindUpdate::Board(board) => self.board = board,
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (RemindView, RemindViewModel<A>) {
    let (appear, appear_events) = subject();
    let (toggle, toggle_events) = subject();
    let (delete, delete_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = RemindViewModel::new(api, guard);
    let output = view_model.transform(
        RemindInput {
            appear: appear_events,
            toggle: toggle_events,
            delete: delete_events,
        },
        bag,
    );

    outlet.forward(bag, output.board, |b| {
        ScreenUpdate::Remind(RemindUpdate::Board(b))
    });
    outlet.forward_expiry(bag, expired);

    appear.send(());
    let view = RemindView {
        board: TimerBoard::default(),
        appear,
        toggle,
        delete,
    };
    (view, view_model)
}
