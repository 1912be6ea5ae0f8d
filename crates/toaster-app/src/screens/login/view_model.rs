use std::sync::Arc;

use toaster_core::prelude::*;
use toaster_core::{ApiFailure, AuthTokens, Backend, SocialProvider};

use crate::reactive::{CancelBag, Events};
use crate::view_model::ViewModel;

pub struct LoginInput {
    pub sign_in: Events<(SocialProvider, String)>,
}

pub struct LoginOutput {
    pub signed_in: Events<AuthTokens>,
    pub failed: Events<ApiFailure>,
}

pub struct LoginViewModel<A> {
    api: Arc<A>,
}

impl<A: Backend> LoginViewModel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A: Backend> ViewModel for LoginViewModel<A> {
    type Input = LoginInput;
    type Output = LoginOutput;

    fn transform(&mut self, input: LoginInput, bag: &mut CancelBag) -> LoginOutput {
        let api = self.api.clone();
        let results = input.sign_in.then(bag, move |(provider, token)| {
            let api = api.clone();
            async move { api.login(provider, token).await }
        });
        let [ok, err] = results.split(bag);

        LoginOutput {
            signed_in: ok.filter_map(bag, |result| result.ok()),
            failed: err.filter_map(bag, |result| {
                let failure = result.err()?;
                warn!("Login failed: {}", failure);
                Some(failure)
            }),
        }
    }
}
