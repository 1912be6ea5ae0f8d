use std::sync::Arc;

use toaster_core::{Backend, ToastId};

use crate::reactive::{CancelBag, Events};
use crate::view_model::{request, SessionGuard, ViewModel};

pub struct LinkWebInput {
    pub toggle: Events<()>,
}

pub struct LinkWebOutput {
    pub is_read: Events<bool>,
}

pub struct LinkWebViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
    toast_id: Option<ToastId>,
}

impl<A: Backend> LinkWebViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard, toast_id: Option<ToastId>) -> Self {
        Self {
            api,
            guard,
            toast_id,
        }
    }
}

impl<A: Backend> ViewModel for LinkWebViewModel<A> {
    type Input = LinkWebInput;
    type Output = LinkWebOutput;

    fn transform(&mut self, input: LinkWebInput, bag: &mut CancelBag) -> LinkWebOutput {
        // Only the user's own links carry a read state
        let toast_id = self.toast_id;
        let toggles = input.toggle.filter_map(bag, move |()| toast_id);

        let api = self.api.clone();
        let is_read = request(toggles, bag, &self.guard, "toggle_read", move |id| {
            let api = api.clone();
            async move { api.toggle_read(id).await }
        });

        LinkWebOutput { is_read }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::subject;
    use std::time::Duration;
    use toaster_api::{Endpoint, MemoryApi};

    #[tokio::test(start_paused = true)]
    async fn test_toggle_flips_read_state() {
        let api = Arc::new(MemoryApi::new());
        let id = api.insert_toast("Docs", "https://docs.rs/", None);
        let mut bag = CancelBag::new();
        let (guard, _) = SessionGuard::new();
        let (toggle, events) = subject();
        let mut output = LinkWebViewModel::new(api, guard, Some(id))
            .transform(LinkWebInput { toggle: events }, &mut bag);

        toggle.send(());
        toggle.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(output.is_read.drain(), vec![true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_curated_link_never_calls_backend() {
        let api = Arc::new(MemoryApi::new());
        let mut bag = CancelBag::new();
        let (guard, _) = SessionGuard::new();
        let (toggle, events) = subject();
        let mut output = LinkWebViewModel::new(api.clone(), guard, None)
            .transform(LinkWebInput { toggle: events }, &mut bag);

        toggle.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(output.is_read.drain().is_empty());
        assert!(api.calls_to(Endpoint::ToggleRead).is_empty());
    }
}
