//! Link entry, the first step of capturing a link

mod view_model;

use serde::Deserialize;

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::ViewModel;

pub use view_model::{
    link_message, AddLinkInput, AddLinkOutput, AddLinkViewModel, EMPTY_LINK_MESSAGE,
    INVALID_LINK_MESSAGE,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AddLinkAction {
    Type { text: String },
    Clear,
    Next,
    Close,
}

#[derive(Debug, Clone)]
pub enum AddLinkUpdate {
    ClearHidden(bool),
    NextEnabled(bool),
    Message(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddLinkIntent {
    LinkInputCompleted(String),
    PopToRoot,
}

#[derive(Debug)]
pub struct AddLinkView {
    pub text: String,
    pub clear_hidden: bool,
    pub next_enabled: bool,
    pub message: Option<String>,
    pub navigation_bar_hidden: bool,
    texts: Subject<String>,
    clear: Subject<()>,
}

impl AddLinkView {
    pub(crate) fn act(&mut self, action: AddLinkAction) -> Option<AddLinkIntent> {
        match action {
            AddLinkAction::Type { text } => {
                self.text = text.clone();
                self.texts.send(text);
                None
            }
            AddLinkAction::Clear => {
                self.text.clear();
                self.clear.send(());
                None
            }
            AddLinkAction::Next if self.next_enabled => {
                Some(AddLinkIntent::LinkInputCompleted(self.text.clone()))
            }
            AddLinkAction::Next => None,
            AddLinkAction::Close => Some(AddLinkIntent::PopToRoot),
        }
    }

    pub(crate) fn apply(&mut self, update: AddLinkUpdate) {
        match update {
            AddLinkUpdate::ClearHidden(hidden) => self.clear_hidden = hidden,
            AddLinkUpdate::NextEnabled(enabled) => self.next_enabled = enabled,
            AddLinkUpdate::Message(message) => self.message = message,
        }
    }
}

/// Build the entry screen, optionally pre-filled with a link taken from the
/// pasteboard
pub(crate) fn build(
    navigation_bar_hidden: bool,
    prefill: Option<String>,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (AddLinkView, AddLinkViewModel) {
    let (texts, text_events) = subject();
    let (clear, clear_events) = subject();
    let mut view_model = AddLinkViewModel::new();
    let output = view_model.transform(
        AddLinkInput {
            text: text_events,
            clear: clear_events,
        },
        bag,
    );

    outlet.forward(bag, output.clear_hidden, |h| {
        ScreenUpdate::AddLink(AddLinkUpdate::ClearHidden(h))
    });
    outlet.forward(bag, output.next_enabled, |e| {
        ScreenUpdate::AddLink(AddLinkUpdate::NextEnabled(e))
    });
    outlet.forward(bag, output.message, |m| {
        ScreenUpdate::AddLink(AddLinkUpdate::Message(m))
    });

    let text = prefill.unwrap_or_default();
    texts.send(text.clone());
    let view = AddLinkView {
        text,
        clear_hidden: true,
        next_enabled: false,
        message: None,
        navigation_bar_hidden,
        texts,
        clear,
    };
    (view, view_model)
}
