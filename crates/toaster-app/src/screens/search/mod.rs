//! Search across links and clips

mod view_model;

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use toaster_core::{Backend, ClipId, SearchResults, ToastId};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::{SessionGuard, ViewModel};

pub use view_model::{SearchInput, SearchOutput, SearchViewModel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchAction {
    Type { query: String },
    OpenLink { toast_id: ToastId },
    OpenClip { clip_id: ClipId },
}

#[derive(Debug, Clone)]
pub enum SearchUpdate {
    Results(SearchResults),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchIntent {
    LinkSelected {
        url: String,
        is_read: bool,
        toast_id: ToastId,
    },
    ClipSelected {
        clip_id: ClipId,
        title: String,
    },
}

#[derive(Debug)]
pub struct SearchView {
    pub query: String,
    pub results: SearchResults,
    queries: Subject<String>,
}

impl SearchView {
    pub(crate) fn act(&mut self, action: SearchAction) -> Option<SearchIntent> {
        match action {
            SearchAction::Type { query } => {
                self.query = query.clone();
                self.queries.send(query);
                None
            }
            SearchAction::OpenLink { toast_id } => {
                let toast = self.results.toasts.iter().find(|t| t.id == toast_id)?;
                Some(SearchIntent::LinkSelected {
                    url: toast.url.clone(),
                    is_read: toast.is_read,
                    toast_id,
                })
            }
            SearchAction::OpenClip { clip_id } => {
                let clip = self.results.clips.iter().find(|c| c.id == clip_id)?;
                Some(SearchIntent::ClipSelected {
                    clip_id,
                    title: clip.title.clone(),
                })
            }
        }
    }

    pub(crate) fn apply(&mut self, update: SearchUpdate) {
        match update {
            SearchUpdate::Results(results) => self.results = results,
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    debounce: Duration,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (SearchView, SearchViewModel<A>) {
    let (queries, query_events) = subject();
    let (guard, expired) = SessionGuard::new();
    let mut view_model = SearchViewModel::new(api, guard, debounce);
    let output = view_model.transform(
        SearchInput {
            query: query_events,
        },
        bag,
    );

    outlet.forward(bag, output.results, |r| {
        ScreenUpdate::Search(SearchUpdate::Results(r))
    });
    outlet.forward_expiry(bag, expired);

    let view = SearchView {
        query: String::new(),
        results: SearchResults::default(),
        queries,
    };
    (view, view_model)
}
