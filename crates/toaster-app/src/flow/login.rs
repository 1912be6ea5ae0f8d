use toaster_core::prelude::*;

use super::{unhandled, ChildFlows, Coordinator, FlowContext, FlowId, FlowKind, FlowSignal};
use crate::nav::Router;
use crate::screens::login::LoginIntent;
use crate::screens::ScreenIntent;

/// Sign-in: one screen, finishes once tokens are stored
#[derive(Debug)]
pub struct LoginFlow {
    id: FlowId,
    router: Router,
    children: ChildFlows,
}

impl LoginFlow {
    pub fn new(router: Router) -> Self {
        Self {
            id: super::next_flow_id(),
            router,
            children: ChildFlows::new(),
        }
    }
}

impl Coordinator for LoginFlow {
    fn id(&self) -> FlowId {
        self.id
    }

    fn kind(&self) -> FlowKind {
        FlowKind::Login
    }

    fn router(&self) -> Router {
        self.router
    }

    fn start(&mut self, cx: &mut FlowContext<'_>) {
        let screen = cx.screens.login().bound_to(self.id);
        self.router.set_root(cx.host, screen, false);
    }

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match intent {
            ScreenIntent::Login(LoginIntent::LoginCompleted(tokens)) => {
                if let Err(e) = cx.credentials.save(&tokens) {
                    warn!("Failed to store credentials: {}", e);
                }
                info!("Signed in");
                FlowSignal::Finished
            }
            other => unhandled(self.kind(), self.id, &other),
        }
    }

    fn children(&mut self) -> &mut ChildFlows {
        &mut self.children
    }
}
