use std::sync::Arc;
use std::time::Duration;

use toaster_core::{Backend, ClipList, ClipSummary, NameCheck};

use crate::reactive::{Cached, CancelBag, Events};
use crate::view_model::{clip_name_checks, request, SessionGuard, ViewModel};

pub struct ClipInput {
    pub appear: Events<()>,
    pub titles: Events<String>,
    pub add: Events<String>,
}

pub struct ClipOutput {
    pub clips: Events<ClipList>,
    pub name_check: Events<NameCheck>,
    pub added: Events<ClipSummary>,
}

pub struct ClipViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
    debounce: Duration,
    clips: Cached<ClipList>,
}

impl<A: Backend> ClipViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard, debounce: Duration) -> Self {
        Self {
            api,
            guard,
            debounce,
            clips: Cached::default(),
        }
    }

    /// The last list loaded from the backend
    pub fn clips(&self) -> ClipList {
        self.clips.get()
    }
}

impl<A: Backend> ViewModel for ClipViewModel<A> {
    type Input = ClipInput;
    type Output = ClipOutput;

    fn transform(&mut self, input: ClipInput, bag: &mut CancelBag) -> ClipOutput {
        let api = self.api.clone();
        let added = request(input.add, bag, &self.guard, "add_clip", move |title| {
            let api = api.clone();
            async move { api.add_clip(title).await }
        });
        let [added, reload_after_add] = added.split(bag);

        let reload_after_add = reload_after_add.map(bag, |_| ());
        let reload = input.appear.merge(bag, reload_after_add);
        let api = self.api.clone();
        let cache = self.clips.clone();
        let clips = request(reload, bag, &self.guard, "all_clips", move |()| {
            let api = api.clone();
            async move { api.all_clips().await }
        })
        .map(bag, move |list| {
            cache.set(list.clone());
            list
        });

        let name_check = clip_name_checks(
            self.api.clone(),
            input.titles,
            self.debounce,
            &self.guard,
            bag,
        );

        ClipOutput {
            clips,
            name_check,
            added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::subject;
    use toaster_api::{Endpoint, MemoryApi};

    #[tokio::test(start_paused = true)]
    async fn test_adding_a_clip_reloads_the_list() {
        let api = Arc::new(MemoryApi::seeded());
        let mut bag = CancelBag::new();
        let (guard, _expired) = SessionGuard::new();
        let (appear, appear_events) = subject();
        let (_titles, title_events) = subject();
        let (add, add_events) = subject();
        let mut vm = ClipViewModel::new(api.clone(), guard, Duration::from_millis(200));
        let mut output = vm.transform(
            ClipInput {
                appear: appear_events,
                titles: title_events,
                add: add_events,
            },
            &mut bag,
        );

        appear.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(output.clips.drain().len(), 1);

        add.send("Music".to_string());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(output.added.drain()[0].title, "Music");
        let reloaded = output.clips.drain().pop().unwrap();
        assert!(reloaded.clips.iter().any(|c| c.title == "Music"));
        assert_eq!(vm.clips(), reloaded);
        assert_eq!(api.calls_to(Endpoint::AllClips).len(), 2);
    }
}
