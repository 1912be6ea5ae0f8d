//! Social sign-in

mod view_model;

use std::sync::Arc;

use serde::Deserialize;
use toaster_core::{AuthTokens, Backend, SocialProvider};

use super::{Outlet, ScreenUpdate};
use crate::reactive::{subject, CancelBag, Subject};
use crate::view_model::ViewModel;

pub use view_model::{LoginInput, LoginOutput, LoginViewModel};

const SIGN_IN_FAILED_MESSAGE: &str = "Sign-in failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoginAction {
    /// The provider SDK handed back a token
    SignIn {
        provider: SocialProvider,
        token: String,
    },
}

#[derive(Debug, Clone)]
pub enum LoginUpdate {
    SignedIn(AuthTokens),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginIntent {
    LoginCompleted(AuthTokens),
}

#[derive(Debug)]
pub struct LoginView {
    pub signing_in: bool,
    pub error: Option<String>,
    sign_in: Subject<(SocialProvider, String)>,
}

impl LoginView {
    pub(crate) fn act(&mut self, action: LoginAction) -> Option<LoginIntent> {
        match action {
            LoginAction::SignIn { provider, token } => {
                if self.signing_in {
                    return None;
                }
                self.signing_in = true;
                self.error = None;
                self.sign_in.send((provider, token));
                None
            }
        }
    }

    pub(crate) fn apply(&mut self, update: LoginUpdate) -> Option<LoginIntent> {
        self.signing_in = false;
        match update {
            LoginUpdate::SignedIn(tokens) => Some(LoginIntent::LoginCompleted(tokens)),
            LoginUpdate::Failed => {
                self.error = Some(SIGN_IN_FAILED_MESSAGE.to_string());
                None
            }
        }
    }
}

pub(crate) fn build<A: Backend>(
    api: Arc<A>,
    outlet: &Outlet,
    bag: &mut CancelBag,
) -> (LoginView, LoginViewModel<A>) {
    let (sign_in, sign_in_events) = subject();
    let mut view_model = LoginViewModel::new(api);
    let output = view_model.transform(
        LoginInput {
            sign_in: sign_in_events,
        },
        bag,
    );

    outlet.forward(bag, output.signed_in, |tokens| {
        ScreenUpdate::Login(LoginUpdate::SignedIn(tokens))
    });
    outlet.forward(bag, output.failed, |_| ScreenUpdate::Login(LoginUpdate::Failed));

    let view = LoginView {
        signing_in: false,
        error: None,
        sign_in,
    };
    (view, view_model)
}
