use std::sync::Arc;

use toaster_core::prelude::*;
use toaster_core::{
    Backend, ClipId, ClipList, ClipScope, ReadFilter, SelectableClip, ToastId, ToastPage,
};

use crate::reactive::{Cached, CancelBag, Events};
use crate::view_model::{request, SessionGuard, ViewModel};

pub struct DetailClipInput {
    pub appear: Events<()>,
    pub segment: Events<usize>,
    pub rename: Events<(ToastId, String)>,
    pub delete: Events<ToastId>,
    pub open_change: Events<ToastId>,
    pub choose: Events<ClipId>,
    pub complete: Events<()>,
}

pub struct DetailClipOutput {
    pub toasts: Events<ToastPage>,
    /// `None` when there is nowhere to move a link to
    pub change_clips: Events<Option<Vec<SelectableClip>>>,
    pub complete_enabled: Events<bool>,
    pub moved: Events<(ToastId, ClipId)>,
    pub renamed: Events<ToastId>,
    pub deleted: Events<ToastId>,
}

pub struct DetailClipViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
    scope: ClipScope,
    filter: Cached<ReadFilter>,
    page: Cached<ToastPage>,
    change_target: Cached<Option<ToastId>>,
}

impl<A: Backend> DetailClipViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard, scope: ClipScope) -> Self {
        Self {
            api,
            guard,
            scope,
            filter: Cached::default(),
            page: Cached::default(),
            change_target: Cached::default(),
        }
    }

    pub fn filter(&self) -> ReadFilter {
        self.filter.get()
    }
}

/// Clips a link can be moved to, its current clip first
///
/// Moving needs somewhere to go, so fewer than two clips yields `None`.
pub fn change_candidates(list: &ClipList, current: Option<ClipId>) -> Option<Vec<SelectableClip>> {
    if list.clips.len() < 2 {
        return None;
    }
    let mut clips: Vec<SelectableClip> = list.clips.iter().map(SelectableClip::from).collect();
    clips.sort_by_key(|clip| clip.id != current);
    Some(clips)
}

/// The clip a link currently lives in, falling back to the listed clip
fn current_clip(page: &Cached<ToastPage>, scope: ClipScope, toast: Option<ToastId>) -> Option<ClipId> {
    let toast = toast?;
    page.update(|page| {
        page.toasts
            .iter()
            .find(|t| t.id == toast)
            .and_then(|t| t.clip_id)
    })
    .or(scope.clip_id())
}

impl<A: Backend> ViewModel for DetailClipViewModel<A> {
    type Input = DetailClipInput;
    type Output = DetailClipOutput;

    fn transform(&mut self, input: DetailClipInput, bag: &mut CancelBag) -> DetailClipOutput {
        let filter = self.filter.clone();
        let filtered = input.segment.filter_map(bag, move |index| {
            let next = ReadFilter::from_segment(index)?;
            filter.set(next);
            Some(())
        });

        let api = self.api.clone();
        let renamed = request(
            input.rename,
            bag,
            &self.guard,
            "rename_toast",
            move |(id, title)| {
                let api = api.clone();
                async move { api.rename_toast(id, title).await.map(|()| id) }
            },
        );

        let api = self.api.clone();
        let deleted = request(input.delete, bag, &self.guard, "delete_toast", move |id| {
            let api = api.clone();
            async move { api.delete_toast(id).await.map(|()| id) }
        });

        // Move sheet
        let target = self.change_target.clone();
        let opened = input.open_change.map(bag, move |id| {
            target.set(Some(id));
        });
        let api = self.api.clone();
        let (page, scope, target) = (self.page.clone(), self.scope, self.change_target.clone());
        let change_clips = request(opened, bag, &self.guard, "all_clips", move |()| {
            let api = api.clone();
            async move { api.all_clips().await }
        })
        .map(bag, move |list| {
            change_candidates(&list, current_clip(&page, scope, target.get()))
        });

        let [chosen, chosen_for_move] = input.choose.split(bag);
        let (page, scope, target) = (self.page.clone(), self.scope, self.change_target.clone());
        let complete_enabled = chosen.map(bag, move |clip| {
            Some(clip) != current_clip(&page, scope, target.get())
        });

        let target = self.change_target.clone();
        let chosen_for_move = chosen_for_move.map(bag, Some);
        let moves = input
            .complete
            .with_latest_from(bag, chosen_for_move, None)
            .filter_map(bag, move |((), clip)| Some((target.get()?, clip?)));
        let api = self.api.clone();
        let moved = request(moves, bag, &self.guard, "move_toast", move |(toast, clip)| {
            let api = api.clone();
            async move { api.move_toast(toast, clip).await.map(|()| (toast, clip)) }
        });

        let [renamed, renamed_reload] = renamed.split(bag);
        let [deleted, deleted_reload] = deleted.split(bag);
        let [moved, moved_reload] = moved.split(bag);
        let renamed_reload = renamed_reload.map(bag, |_| ());
        let deleted_reload = deleted_reload.map(bag, |_| ());
        let moved_reload = moved_reload.map(bag, |_| ());
        let reload = input
            .appear
            .merge(bag, filtered)
            .merge(bag, renamed_reload)
            .merge(bag, deleted_reload)
            .merge(bag, moved_reload);

        let api = self.api.clone();
        let (scope, filter, page) = (self.scope, self.filter.clone(), self.page.clone());
        let toasts = request(reload, bag, &self.guard, "clip_toasts", move |()| {
            let api = api.clone();
            let filter = filter.get();
            debug!("Loading {:?} links of {:?}", filter, scope);
            async move { api.clip_toasts(scope, filter).await }
        })
        .map(bag, move |loaded| {
            page.set(loaded.clone());
            loaded
        });

        DetailClipOutput {
            toasts,
            change_clips,
            complete_enabled,
            moved,
            renamed,
            deleted,
        }
    }
}
