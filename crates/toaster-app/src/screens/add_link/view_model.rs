use toaster_core::is_link;

use crate::reactive::{CancelBag, Events};
use crate::view_model::ViewModel;

pub const EMPTY_LINK_MESSAGE: &str = "Enter a link";
pub const INVALID_LINK_MESSAGE: &str = "Invalid link format";

pub struct AddLinkInput {
    pub text: Events<String>,
    pub clear: Events<()>,
}

pub struct AddLinkOutput {
    pub clear_hidden: Events<bool>,
    pub next_enabled: Events<bool>,
    pub message: Events<Option<String>>,
}

/// Pure validation, no backend involved
#[derive(Debug, Default)]
pub struct AddLinkViewModel;

impl AddLinkViewModel {
    pub fn new() -> Self {
        Self
    }
}

/// Hint under the text field: nothing while the link looks valid
pub fn link_message(text: &str) -> Option<&'static str> {
    if text.is_empty() {
        Some(EMPTY_LINK_MESSAGE)
    } else if !is_link(text) {
        Some(INVALID_LINK_MESSAGE)
    } else {
        None
    }
}

impl ViewModel for AddLinkViewModel {
    type Input = AddLinkInput;
    type Output = AddLinkOutput;

    fn transform(&mut self, input: AddLinkInput, bag: &mut CancelBag) -> AddLinkOutput {
        let cleared = input.clear.map(bag, |()| String::new());
        let texts = input.text.merge(bag, cleared);
        let [for_clear, for_next, for_message] = texts.split(bag);

        AddLinkOutput {
            clear_hidden: for_clear.map(bag, |text| text.is_empty()),
            next_enabled: for_next.map(bag, |text| is_link(&text)),
            message: for_message.map(bag, |text| link_message(&text).map(str::to_string)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::subject;

    #[test]
    fn test_link_message() {
        assert_eq!(link_message(""), Some(EMPTY_LINK_MESSAGE));
        assert_eq!(link_message("toaster"), Some(INVALID_LINK_MESSAGE));
        assert_eq!(link_message("https://docs.rs"), None);
    }

    #[tokio::test]
    async fn test_clear_resets_state() {
        let mut bag = CancelBag::new();
        let (text, text_events) = subject();
        let (clear, clear_events) = subject();
        let mut output = AddLinkViewModel::new().transform(
            AddLinkInput {
                text: text_events,
                clear: clear_events,
            },
            &mut bag,
        );

        text.send("https://docs.rs".to_string());
        assert_eq!(output.next_enabled.recv().await, Some(true));
        assert_eq!(output.clear_hidden.recv().await, Some(false));
        assert_eq!(output.message.recv().await, Some(None));

        clear.send(());
        assert_eq!(output.next_enabled.recv().await, Some(false));
        assert_eq!(output.clear_hidden.recv().await, Some(true));
        assert_eq!(
            output.message.recv().await,
            Some(Some(EMPTY_LINK_MESSAGE.to_string()))
        );
    }
}
