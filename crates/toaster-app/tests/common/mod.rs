//! Shared helpers for engine-level tests

#![allow(dead_code)]

use std::sync::Arc;

use mockall::mock;
use toaster_api::{MemoryApi, MemoryCredentialStore, MemoryPasteboard};
use toaster_app::screens::ScreenView;
use toaster_app::{Engine, EngineEvent, Screen, ScreenAction, ScreenId, ScreenKind, Settings};
use toaster_core::{AuthTokens, CredentialStore, Pasteboard};

mock! {
    pub Pasteboard {}

    impl Pasteboard for Pasteboard {
        fn take_url(&mut self) -> Option<String>;
    }
}

mock! {
    pub Credentials {}

    impl CredentialStore for Credentials {
        fn load(&self) -> toaster_core::Result<Option<AuthTokens>>;
        fn save(&mut self, tokens: &AuthTokens) -> toaster_core::Result<()>;
        fn clear(&mut self) -> toaster_core::Result<()>;
    }
}

// ─────────────────────────────────────────────────────────
// Engines
// ─────────────────────────────────────────────────────────

pub fn tokens() -> AuthTokens {
    AuthTokens {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
    }
}

pub fn engine_with(
    api: Arc<MemoryApi>,
    credentials: Box<dyn CredentialStore>,
    pasteboard: Box<dyn Pasteboard>,
) -> Engine {
    Engine::new(api, credentials, pasteboard, Settings::default())
}

/// Started engine over `api`, signed in, settled on the home tab
pub async fn signed_in(api: Arc<MemoryApi>) -> Engine {
    let mut engine = engine_with(
        api,
        Box::new(MemoryCredentialStore::with_tokens(tokens())),
        Box::new(MemoryPasteboard::new()),
    );
    engine.start();
    engine.settle().await;
    engine
}

/// Started engine over `api` with no stored session
pub async fn signed_out(api: Arc<MemoryApi>) -> Engine {
    let mut engine = engine_with(
        api,
        Box::new(MemoryCredentialStore::default()),
        Box::new(MemoryPasteboard::new()),
    );
    engine.start();
    engine.settle().await;
    engine
}

// ─────────────────────────────────────────────────────────
// Driving
// ─────────────────────────────────────────────────────────

pub fn visible(engine: &Engine) -> &Screen {
    engine.visible_screen().expect("a visible screen")
}

pub fn visible_kind(engine: &Engine) -> ScreenKind {
    visible(engine).kind()
}

/// The tab bar screen at the bottom of the root stack
pub fn tab_bar(engine: &Engine) -> ScreenId {
    let root = engine.host().stack(engine.root_stack()).expect("root stack");
    let screen = root.screens().first().expect("root screen");
    assert_eq!(screen.kind(), ScreenKind::TabBar);
    screen.id()
}

/// The stack currently selected in the tab bar
pub fn current_tab_stack(engine: &Engine) -> u64 {
    let screen = engine.host().screen(tab_bar(engine)).expect("tab bar");
    match screen.view() {
        ScreenView::TabBar(view) => view.current_stack().expect("selected stack"),
        other => panic!("expected tab bar, got {:?}", other),
    }
}

/// Act on the visible screen and let the pipelines settle
pub async fn act(engine: &mut Engine, action: ScreenAction) {
    let screen = visible(engine).id();
    act_on(engine, screen, action).await;
}

pub async fn act_on(engine: &mut Engine, screen: ScreenId, action: ScreenAction) {
    engine.act(screen, action);
    engine.settle().await;
}

pub fn root_kinds(engine: &Engine) -> Vec<ScreenKind> {
    engine.host().kinds(engine.root_stack())
}

/// Events reduced to what does not depend on identifiers
pub fn shape(events: &[EngineEvent]) -> Vec<String> {
    events
        .iter()
        .map(|event| match event {
            EngineEvent::ScreenShown { kind, animated, .. } => {
                format!("shown {:?} animated={}", kind, animated)
            }
            EngineEvent::ScreenRemoved { kind, .. } => format!("removed {:?}", kind),
            EngineEvent::FlowStarted { kind, .. } => format!("started {:?}", kind),
            EngineEvent::FlowFinished { kind, .. } => format!("finished {:?}", kind),
            EngineEvent::Banner { banner, .. } => format!("banner {}", banner.message),
            other => other.name().to_string(),
        })
        .collect()
}
