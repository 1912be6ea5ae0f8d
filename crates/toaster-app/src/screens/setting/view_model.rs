use std::sync::Arc;

use toaster_core::prelude::*;
use toaster_core::Backend;

use crate::reactive::{CancelBag, Events};
use crate::view_model::{request, SessionGuard, ViewModel};

pub struct SettingInput {
    pub logout: Events<()>,
    pub withdraw: Events<()>,
}

pub struct SettingOutput {
    /// The account session ended on the backend
    pub root_changed: Events<()>,
}

pub struct SettingViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
}

impl<A: Backend> SettingViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard) -> Self {
        Self { api, guard }
    }
}

impl<A: Backend> ViewModel for SettingViewModel<A> {
    type Input = SettingInput;
    type Output = SettingOutput;

    fn transform(&mut self, input: SettingInput, bag: &mut CancelBag) -> SettingOutput {
        let api = self.api.clone();
        let logged_out = request(input.logout, bag, &self.guard, "logout", move |()| {
            let api = api.clone();
            async move { api.logout().await }
        });

        let api = self.api.clone();
        let withdrawn = request(input.withdraw, bag, &self.guard, "withdraw", move |()| {
            let api = api.clone();
            async move {
                let result = api.withdraw().await;
                if result.is_ok() {
                    info!("Account withdrawn");
                }
                result
            }
        });

        SettingOutput {
            root_changed: logged_out.merge(bag, withdrawn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::subject;
    use std::time::Duration;
    use toaster_api::{Endpoint, MemoryApi};
    use toaster_core::ApiFailure;

    #[tokio::test(start_paused = true)]
    async fn test_logout_changes_root_only_on_success() {
        let api = Arc::new(MemoryApi::new());
        api.fail_once(Endpoint::Logout, ApiFailure::ServerError);
        let mut bag = CancelBag::new();
        let (guard, _) = SessionGuard::new();
        let (logout, logout_events) = subject();
        let (_withdraw, withdraw_events) = subject();
        let mut output = SettingViewModel::new(api, guard).transform(
            SettingInput {
                logout: logout_events,
                withdraw: withdraw_events,
            },
            &mut bag,
        );

        logout.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(output.root_changed.drain().is_empty());

        logout.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(output.root_changed.drain(), vec![()]);
    }
}
