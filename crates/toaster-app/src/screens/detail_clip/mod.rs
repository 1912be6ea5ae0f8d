//! The links inside one clip (or all of them)

mod view_model;

use std::sync::Arc;

use serde::Deserialize;
use toaster_core::{Backend, ClipId, ClipScope, ReadFilter, SelectableClip, ToastId, ToastPage};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{change_candidates, DetailClipInput, DetailClipOutput, DetailClipViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetailClipAction {
    Appear,
    /// Segment 0, 1, 2: all, read, unread
    Segment { index: usize },
    OpenLink { toast_id: ToastId },
    Rename { toast_id: ToastId, title: String },
    Delete { toast_id: ToastId },
    /// Open the "move to clip" sheet for one link
    OpenChangeClip { toast_id: ToastId },
    ChooseClip { clip_id: ClipId },
    CompleteChange,
    CloseChangeClip,
    Back,
}

#[derive(Debug, Clone)]
pub enum DetailClipUpdate {
    Toasts(ToastPage),
    ChangeClips(Option<Vec<SelectableClip>>),
    CompleteEnabled(bool),
    Moved { toast_id: ToastId, clip_id: ClipId },
    Renamed(ToastId),
    Deleted(ToastId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailClipIntent {
    LinkSelected {
        url: String,
        is_read: bool,
        toast_id: ToastId,
    },
    Back,
}

#[derive(Debug)]
pub struct DetailClipView {
    pub title: String,
    pub scope: ClipScope,
    pub filter: ReadFilter,
    pub page: Option<ToastPage>,
    /// Candidates of the open "move to clip" sheet
    pub change_clips: Option<Vec<SelectableClip>>,
    pub chosen_clip: Option<ClipId>,
    pub complete_enabled: bool,
    appear: Subject<()>,
    segment: Subject<usize>,
    rename: Subject<(ToastId, String)>,
    delete: Subject<ToastId>,
    open_change: Subject<ToastId>,
    choose: Subject<ClipId>,
    complete: Subject<()>,
}

impl DetailClipView {
    pub(crate) fn act(&mut self, action: DetailClipAction) -> Option<DetailClipIntent> {
        match action {
            DetailClipAction::Appear => {
                self.appear.send(());
            }
            DetailClipAction::Segment { index } => {
                if let Some(filter) = ReadFilter::from_segment(index) {
                    self.filter = filter;
                }
                self.segment.send(index);
            }
            DetailClipAction::OpenLink { toast_id } => {
                let toast = self
                    .page
                    .as_ref()?
                    .toasts
                    .iter()
                    .find(|t| t.id == toast_id)?;
                return Some(DetailClipIntent::LinkSelected {
                    url: toast.url.clone(),
                    is_read: toast.is_read,
                    toast_id,
                });
            }
            DetailClipAction::Rename { toast_id, title } => {
                self.rename.send((toast_id, title));
            }
            DetailClipAction::Delete { toast_id } => {
                self.delete.send(toast_id);
            }
            DetailClipAction::OpenChangeClip { toast_id } => {
                self.chosen_clip = None;
                self.complete_enabled = false;
                self.open_change.send(toast_id);
            }
            DetailClipAction::ChooseClip { clip_id } => {
                self.chosen_clip = Some(clip_id);
                self.choose.send(clip_id);
            }
            DetailClipAction::CompleteChange => {
                if self.complete_enabled {
                    self.complete.send(());
                    self.close_sheet();
                }
            }
            DetailClipAction::CloseChangeClip => self.close_sheet(),
            DetailClipAction::Back => return Some(DetailClipIntent::Back),
        }
        None
    }

    fn close_sheet(&mut self) {
        self.change_clips = None;
        self.complete_enabled = false;
    }

    pub(crate) fn apply(&mut self, update: DetailClipUpdate) {
        match update {
            DetailClipUpdate::Toasts(page) => self.page = Some(page),
            DetailClipUpdate::ChangeClips(clips) => self.change_clips = clips,
            DetailClipUpdate::CompleteEnabled(enabled) => self.complete_enabled = enabled,
            DetailClipUpdate::Moved { .. }
            | DetailClipUpdate::Renamed(_)
            | DetailClipUpdate::Deleted(_) => {}
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    scope: ClipScope,
    title: String,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (DetailClipView, DetailClipViewModel<A>) {
    let (appear, appear_events) = subject();
    let (segment, segment_events) = subject();
    let (rename, rename_events) = subject();
    let (delete, delete_events) = subject();
    let (open_change, open_change_events) = subject();
    let (choose, choose_events) = subject();
    let (complete, complete_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = DetailClipViewModel::new(api, guard, scope);
    let output = view_model.transform(
        DetailClipInput {
            appear: appear_events,
            segment: segment_events,
            rename: rename_events,
            delete: delete_events,
            open_change: open_change_events,
            choose: choose_events,
            complete: complete_events,
        },
        bag,
    );

    outlet.forward(bag, output.toasts, |p| {
        ScreenUpdate::DetailClip(DetailClipUpdate::Toasts(p))
    });
    outlet.forward(bag, output.change_clips, |c| {
        ScreenUpdate::DetailClip(DetailClipUpdate::ChangeClips(c))
    });
    outlet.forward(bag, output.complete_enabled, |e| {
        ScreenUpdate::DetailClip(DetailClipUpdate::CompleteEnabled(e))
    });
    outlet.forward(bag, output.moved, |(toast_id, clip_id)| {
        ScreenUpdate::DetailClip(DetailClipUpdate::Moved { toast_id, clip_id })
    });
    outlet.forward(bag, output.renamed, |id| {
        ScreenUpdate::DetailClip(DetailClipUpdate::Renamed(id))
    });
    outlet.forward(bag, output.deleted, |id| {
        ScreenUpdate::DetailClip(DetailClipUpdate::Deleted(id))
    });
    outlet.forward_expiry(bag, expired);

    appear.send(());
    let view = DetailClipView {
        title,
        scope,
        filter: ReadFilter::All,
        page: None,
        change_clips: None,
        chosen_clip: None,
        complete_enabled: false,
        appear,
        segment,
        rename,
        delete,
        open_change,
        choose,
        complete,
    };
    (view, view_model)
}
