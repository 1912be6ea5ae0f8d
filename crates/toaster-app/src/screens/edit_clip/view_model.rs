use std::sync::Arc;
use std::time::Duration;

use toaster_core::prelude::*;
use toaster_core::{Backend, ClipId, ClipList, ClipRename, ClipSummary, NameCheck, PriorityChange};

use crate::reactive::{Cached, CancelBag, Events};
use crate::view_model::{clip_name_checks, request, SessionGuard, ViewModel};

pub struct EditClipInput {
    pub appear: Events<()>,
    pub delete: Events<ClipId>,
    pub titles: Events<String>,
    pub rename: Events<ClipRename>,
    /// `(from, to)` display indices of a finished drag
    pub reorder: Events<(usize, usize)>,
}

pub struct EditClipOutput {
    pub clips: Events<ClipList>,
    pub name_check: Events<NameCheck>,
    pub deleted: Events<ClipId>,
    pub renamed: Events<ClipRename>,
    pub reordered: Events<PriorityChange>,
}

pub struct EditClipViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
    debounce: Duration,
    rows: Cached<Vec<ClipSummary>>,
}

impl<A: Backend> EditClipViewModel<A> {
    pub fn new(
        api: Arc<A>,
        guard: SessionGuard,
        debounce: Duration,
        rows: Vec<ClipSummary>,
    ) -> Self {
        Self {
            api,
            guard,
            debounce,
            rows: Cached::new(rows),
        }
    }
}

/// Translate a drag between display rows into a backend priority
///
/// Row 0 is the pinned "All clips" entry: it can be neither dragged nor
/// dropped onto, so display index `n` is clip priority `n - 1`.
pub fn priority_change(rows: &[ClipSummary], from: usize, to: usize) -> Option<PriorityChange> {
    if from == 0 || to == 0 || from == to || to >= rows.len() {
        return None;
    }
    let clip = rows.get(from)?;
    Some(PriorityChange {
        clip_id: clip.id,
        priority: to - 1,
    })
}

impl<A: Backend> ViewModel for EditClipViewModel<A> {
    type Input = EditClipInput;
    type Output = EditClipOutput;

    fn transform(&mut self, input: EditClipInput, bag: &mut CancelBag) -> EditClipOutput {
        let api = self.api.clone();
        let deleted = request(input.delete, bag, &self.guard, "delete_clip", move |id| {
            let api = api.clone();
            async move { api.delete_clip(id).await.map(|()| id) }
        });

        let api = self.api.clone();
        let renamed = request(
            input.rename,
            bag,
            &self.guard,
            "rename_clip",
            move |rename: ClipRename| {
                let api = api.clone();
                async move { api.rename_clip(rename.clone()).await.map(|()| rename) }
            },
        );

        let rows = self.rows.clone();
        let changes = input.reorder.filter_map(bag, move |(from, to)| {
            let change = rows.update(|rows| {
                let change = priority_change(rows, from, to)?;
                let clip = rows.remove(from);
                rows.insert(to, clip);
                Some(change)
            });
            if change.is_none() {
                debug!("Ignoring drag {} -> {}", from, to);
            }
            change
        });
        let api = self.api.clone();
        let reordered = request(changes, bag, &self.guard, "reorder_clip", move |change| {
            let api = api.clone();
            async move { api.reorder_clip(change).await.map(|()| change) }
        });

        let [deleted, deleted_reload] = deleted.split(bag);
        let [renamed, renamed_reload] = renamed.split(bag);
        let [reordered, reordered_reload] = reordered.split(bag);
        let deleted_reload = deleted_reload.map(bag, |_| ());
        let renamed_reload = renamed_reload.map(bag, |_| ());
        let reordered_reload = reordered_reload.map(bag, |_| ());
        let reload = input
            .appear
            .merge(bag, deleted_reload)
            .merge(bag, renamed_reload)
            .merge(bag, reordered_reload);

        let api = self.api.clone();
        let rows = self.rows.clone();
        let clips = request(reload, bag, &self.guard, "all_clips", move |()| {
            let api = api.clone();
            async move { api.all_clips().await }
        })
        .map(bag, move |list: ClipList| {
            rows.set(list.with_all_clips());
            list
        });

        let name_check = clip_name_checks(
            self.api.clone(),
            input.titles,
            self.debounce,
            &self.guard,
            bag,
        );

        EditClipOutput {
            clips,
            name_check,
            deleted,
            renamed,
            reordered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::subject;
    use toaster_api::{Endpoint, MemoryApi};
    use toaster_core::ToasterApi;

    fn rows(n: i64) -> Vec<ClipSummary> {
        std::iter::once(ClipSummary::all_clips(0))
            .chain((1..=n).map(|id| ClipSummary {
                id,
                title: format!("clip {}", id),
                toast_count: 0,
            }))
            .collect()
    }

    #[test]
    fn test_priority_is_display_index_minus_one() {
        let rows = rows(3);
        assert_eq!(
            priority_change(&rows, 3, 1),
            Some(PriorityChange {
                clip_id: 3,
                priority: 0
            })
        );
        assert_eq!(
            priority_change(&rows, 1, 3),
            Some(PriorityChange {
                clip_id: 1,
                priority: 2
            })
        );
    }

    #[test]
    fn test_pinned_row_cannot_move_or_be_displaced() {
        let rows = rows(3);
        assert_eq!(priority_change(&rows, 0, 2), None);
        assert_eq!(priority_change(&rows, 2, 0), None);
        assert_eq!(priority_change(&rows, 2, 2), None);
        assert_eq!(priority_change(&rows, 1, 9), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_reorders_then_reloads() {
        let api = Arc::new(MemoryApi::seeded());
        let list = api.all_clips().await.unwrap();
        let mut bag = CancelBag::new();
        let (guard, _expired) = SessionGuard::new();
        let (_appear, appear) = subject();
        let (_delete, delete) = subject();
        let (_titles, titles) = subject();
        let (_rename, rename) = subject();
        let (drag, reorder) = subject();
        let mut output = EditClipViewModel::new(
            api.clone(),
            guard,
            Duration::from_millis(200),
            list.with_all_clips(),
        )
        .transform(
            EditClipInput {
                appear,
                delete,
                titles,
                rename,
                reorder,
            },
            &mut bag,
        );

        drag.send((0, 2));
        drag.send((3, 1));
        tokio::time::sleep(Duration::from_millis(10)).await;

        let recipes = list.clips[2].id;
        assert_eq!(
            api.calls_to(Endpoint::ReorderClip),
            vec![format!("{}@0", recipes)]
        );
        assert_eq!(
            output.reordered.drain(),
            vec![PriorityChange {
                clip_id: recipes,
                priority: 0
            }]
        );
        assert_eq!(api.clip_titles(), vec!["Recipes", "Reading", "Rust"]);
        assert_eq!(output.clips.drain().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_drag_sees_the_first_before_reload() {
        let api = Arc::new(MemoryApi::seeded().with_latency(Duration::from_millis(100)));
        let list = api.all_clips().await.unwrap();
        let mut bag = CancelBag::new();
        let (guard, _expired) = SessionGuard::new();
        let (_appear, appear) = subject();
        let (_delete, delete) = subject();
        let (_titles, titles) = subject();
        let (_rename, rename) = subject();
        let (drag, reorder) = subject();
        let mut output = EditClipViewModel::new(
            api.clone(),
            guard,
            Duration::from_millis(200),
            list.with_all_clips(),
        )
        .transform(
            EditClipInput {
                appear,
                delete,
                titles,
                rename,
                reorder,
            },
            &mut bag,
        );

        // rows: All clips, Reading, Rust, Recipes
        drag.send((3, 1));
        tokio::time::sleep(Duration::from_millis(1)).await;
        // rows now: All clips, Recipes, Reading, Rust
        drag.send((3, 1));
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(
            api.calls_to(Endpoint::ReorderClip),
            vec!["3@0".to_string(), "2@0".to_string()]
        );
        assert_eq!(output.reordered.drain().len(), 2);
        assert_eq!(api.clip_titles(), vec!["Rust", "Recipes", "Reading"]);
    }
}
