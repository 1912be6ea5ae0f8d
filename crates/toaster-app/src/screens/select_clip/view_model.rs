use std::sync::Arc;
use std::time::Duration;

use toaster_core::prelude::*;
use toaster_core::{Backend, ClipId, ClipList, ClipSummary, NameCheck, SelectableClip};

use crate::reactive::{CancelBag, Events};
use crate::view_model::{clip_name_checks, request, SessionGuard, ViewModel};

pub struct SelectClipInput {
    pub appear: Events<()>,
    pub select: Events<Option<ClipId>>,
    pub save: Events<()>,
    pub titles: Events<String>,
    pub add: Events<String>,
}

pub struct SelectClipOutput {
    /// Pickable clips, "All clips" first
    pub clips: Events<Vec<SelectableClip>>,
    pub name_check: Events<NameCheck>,
    pub added: Events<ClipSummary>,
    /// One outcome per save; `false` for any failure but an expired session
    pub saved: Events<bool>,
}

pub struct SelectClipViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
    debounce: Duration,
    url: String,
}

impl<A: Backend> SelectClipViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard, debounce: Duration, url: String) -> Self {
        Self {
            api,
            guard,
            debounce,
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn selectable(list: ClipList) -> Vec<SelectableClip> {
    std::iter::once(SelectableClip::all_clips(list.all_toast_count))
        .chain(list.clips.iter().map(SelectableClip::from))
        .collect()
}

impl<A: Backend> ViewModel for SelectClipViewModel<A> {
    type Input = SelectClipInput;
    type Output = SelectClipOutput;

    fn transform(&mut self, input: SelectClipInput, bag: &mut CancelBag) -> SelectClipOutput {
        let api = self.api.clone();
        let added = request(input.add, bag, &self.guard, "add_clip", move |title| {
            let api = api.clone();
            async move { api.add_clip(title).await }
        });
        let [added, reload_after_add] = added.split(bag);

        let reload_after_add = reload_after_add.map(bag, |_| ());
        let reload = input.appear.merge(bag, reload_after_add);
        let api = self.api.clone();
        let clips = request(reload, bag, &self.guard, "all_clips", move |()| {
            let api = api.clone();
            async move { api.all_clips().await }
        })
        .map(bag, selectable);

        let api = self.api.clone();
        let url = self.url.clone();
        let guard = self.guard.clone();
        let saved = input
            .save
            .with_latest_from(bag, input.select, None)
            .then(bag, move |((), clip_id)| {
                let api = api.clone();
                let url = url.clone();
                async move { api.save_link(url, clip_id).await }
            })
            .filter_map(bag, move |result| {
                let outcome = guard.resolve_outcome("save_link", result)?;
                if let Err(failure) = &outcome {
                    info!("Link was not saved: {}", failure);
                }
                Some(outcome.is_ok())
            });

        let name_check = clip_name_checks(
            self.api.clone(),
            input.titles,
            self.debounce,
            &self.guard,
            bag,
        );

        SelectClipOutput {
            clips,
            name_check,
            added,
            saved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{subject, Subject};
    use toaster_api::{Endpoint, MemoryApi};
    use toaster_core::ApiFailure;

    struct Harness {
        select: Subject<Option<ClipId>>,
        save: Subject<()>,
        output: SelectClipOutput,
        expired: Events<()>,
        _appear: Subject<()>,
        _titles: Subject<String>,
        _add: Subject<String>,
        _bag: CancelBag,
    }

    fn harness(api: Arc<MemoryApi>, url: &str) -> Harness {
        let mut bag = CancelBag::new();
        let (guard, expired) = SessionGuard::new();
        let (appear, appear_events) = subject();
        let (select, select_events) = subject();
        let (save, save_events) = subject();
        let (titles, title_events) = subject();
        let (add, add_events) = subject();
        let output = SelectClipViewModel::new(
            api,
            guard,
            Duration::from_millis(200),
            url.to_string(),
        )
        .transform(
            SelectClipInput {
                appear: appear_events,
                select: select_events,
                save: save_events,
                titles: title_events,
                add: add_events,
            },
            &mut bag,
        );
        Harness {
            select,
            save,
            output,
            expired,
            _appear: appear,
            _titles: titles,
            _add: add,
            _bag: bag,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_uses_latest_selection() {
        let api = Arc::new(MemoryApi::seeded());
        let rust = api.insert_clip("Rust 2");
        let mut h = harness(api.clone(), "https://blog.rust-lang.org/");

        h.select.send(Some(1));
        h.select.send(Some(rust));
        h.save.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(h.output.saved.drain(), vec![true]);
        let saved = api.toasts().into_iter().last().unwrap();
        assert_eq!(saved.clip_id, Some(rust));
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_without_selection_goes_to_all_clips() {
        let api = Arc::new(MemoryApi::new());
        let mut h = harness(api.clone(), "https://docs.rs/");

        h.save.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(h.output.saved.drain(), vec![true]);
        assert_eq!(api.toasts()[0].clip_id, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_failure_but_unauthorized_reports_false() {
        for failure in [
            ApiFailure::BadRequest,
            ApiFailure::ServerError,
            ApiFailure::NetworkFail,
            ApiFailure::NotFound,
        ] {
            let api = Arc::new(MemoryApi::new());
            api.fail(Endpoint::SaveLink, failure);
            let mut h = harness(api, "https://docs.rs/");

            h.save.send(());
            tokio::time::sleep(Duration::from_millis(10)).await;

            assert_eq!(h.output.saved.drain(), vec![false], "{:?}", failure);
            assert!(h.expired.drain().is_empty());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unauthorized_save_expires_session() {
        let api = Arc::new(MemoryApi::new());
        api.expire_session();
        let mut h = harness(api, "https://docs.rs/");

        h.save.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(h.output.saved.drain().is_empty());
        assert_eq!(h.expired.drain(), vec![()]);
    }
}
