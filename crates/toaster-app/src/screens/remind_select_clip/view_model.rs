use std::sync::Arc;

use toaster_core::{Backend, ClipId, ClipSummary};

use crate::reactive::{Cached, CancelBag, Events};
use crate::view_model::{request, SessionGuard, ViewModel};

pub struct RemindSelectClipInput {
    pub appear: Events<()>,
    pub select: Events<ClipId>,
}

pub struct RemindSelectClipOutput {
    pub clips: Events<Vec<ClipSummary>>,
    pub next_enabled: Events<bool>,
}

pub struct RemindSelectClipViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
    clips: Cached<Vec<ClipSummary>>,
}

impl<A: Backend> RemindSelectClipViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard) -> Self {
        Self {
            api,
            guard,
            clips: Cached::default(),
        }
    }
}

impl<A: Backend> ViewModel for RemindSelectClipViewModel<A> {
    type Input = RemindSelectClipInput;
    type Output = RemindSelectClipOutput;

    fn transform(
        &mut self,
        input: RemindSelectClipInput,
        bag: &mut CancelBag,
    ) -> RemindSelectClipOutput {
        let api = self.api.clone();
        let cache = self.clips.clone();
        let clips = request(input.appear, bag, &self.guard, "all_clips", move |()| {
            let api = api.clone();
            async move { api.all_clips().await }
        })
        .map(bag, move |list| {
            cache.set(list.clips.clone());
            list.clips
        });

        let cache = self.clips.clone();
        let next_enabled = input.select.map(bag, move |id| {
            cache.update(|clips| clips.iter().any(|c| c.id == id))
        });

        RemindSelectClipOutput {
            clips,
            next_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::subject;
    use std::time::Duration;
    use toaster_api::MemoryApi;

    #[tokio::test(start_paused = true)]
    async fn test_next_enabled_only_for_listed_clip() {
        let api = Arc::new(MemoryApi::seeded());
        let mut bag = CancelBag::new();
        let (guard, _) = SessionGuard::new();
        let (appear, appear_events) = subject();
        let (select, select_events) = subject();
        let mut output = RemindSelectClipViewModel::new(api, guard).transform(
            RemindSelectClipInput {
                appear: appear_events,
                select: select_events,
            },
            &mut bag,
        );

        appear.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;
        let clips = output.clips.drain().pop().unwrap();
        assert!(clips.iter().all(|c| !c.is_all_clips()));

        select.send(clips[0].id);
        select.send(404);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(output.next_enabled.drain(), vec![true, false]);
    }
}
