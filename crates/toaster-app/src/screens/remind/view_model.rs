use std::sync::Arc;

use toaster_core::{Backend, TimerBoard, TimerId};

use crate::reactive::{CancelBag, Events};
use crate::view_model::{request, SessionGuard, ViewModel};

pub struct RemindInput {
    pub appear: Events<()>,
    pub toggle: Events<TimerId>,
    pub delete: Events<TimerId>,
}

pub struct RemindOutput {
    pub board: Events<TimerBoard>,
}

pub struct RemindViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
}

impl<A: Backend> RemindViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard) -> Self {
        Self { api, guard }
    }
}

impl<A: Backend> ViewModel for RemindViewModel<A> {
    type Input = RemindInput;
    type Output = RemindOutput;

    fn transform(&mut self, input: RemindInput, bag: &mut CancelBag) -> RemindOutput {
        let api = self.api.clone();
        let toggled = request(input.toggle, bag, &self.guard, "toggle_timer", move |id| {
            let api = api.clone();
            async move { api.toggle_timer(id).await.map(|_| ()) }
        });

        let api = self.api.clone();
        let deleted = request(input.delete, bag, &self.guard, "delete_timer", move |id| {
            let api = api.clone();
            async move { api.delete_timer(id).await }
        });

        let reload = input.appear.merge(bag, toggled).merge(bag, deleted);
        let api = self.api.clone();
        let board = request(reload, bag, &self.guard, "timers", move |()| {
            let api = api.clone();
            async move { api.timers().await }
        });

        RemindOutput { board }
    }
}
