//! Flow tree behavior driven through the engine

mod common;

use std::sync::Arc;

use common::*;
use toaster_api::{Endpoint, MemoryApi, MemoryPasteboard};
use toaster_app::flow::TIMER_SAVED_MESSAGE;
use toaster_app::screens::clip::ClipAction;
use toaster_app::screens::detail_clip::DetailClipAction;
use toaster_app::screens::edit_clip::EditClipAction;
use toaster_app::screens::home::HomeAction;
use toaster_app::screens::link_web::LinkWebAction;
use toaster_app::screens::login::LoginAction;
use toaster_app::screens::remind::RemindAction;
use toaster_app::screens::remind_select_clip::RemindSelectClipAction;
use toaster_app::screens::remind_timer_add::RemindTimerAddAction;
use toaster_app::screens::setting::SettingAction;
use toaster_app::screens::tab_bar::{Tab, TabBarAction};
use toaster_app::{Banner, EngineEvent, FlowKind, ScreenAction, ScreenKind};
use toaster_core::SocialProvider;

fn select_tab(tab: Tab) -> ScreenAction {
    ScreenAction::TabBar(TabBarAction::Select { tab })
}

#[tokio::test(start_paused = true)]
async fn test_signed_out_start_shows_login() {
    let engine = signed_out(Arc::new(MemoryApi::seeded())).await;

    assert!(!engine.is_logged_in());
    assert_eq!(root_kinds(&engine), vec![ScreenKind::Login]);
    assert_eq!(visible_kind(&engine), ScreenKind::Login);
}

#[tokio::test(start_paused = true)]
async fn test_signed_in_start_shows_home_tab() {
    let engine = signed_in(Arc::new(MemoryApi::seeded())).await;

    assert!(engine.is_logged_in());
    assert_eq!(root_kinds(&engine), vec![ScreenKind::TabBar]);
    assert_eq!(visible_kind(&engine), ScreenKind::Home);
}

#[tokio::test(start_paused = true)]
async fn test_sign_in_replaces_login_with_tab_bar() {
    let api = Arc::new(MemoryApi::seeded());
    let mut engine = signed_out(api.clone()).await;

    act(
        &mut engine,
        ScreenAction::Login(LoginAction::SignIn {
            provider: SocialProvider::Kakao,
            token: "kakao-token".to_string(),
        }),
    )
    .await;

    assert!(engine.is_logged_in());
    assert_eq!(root_kinds(&engine), vec![ScreenKind::TabBar]);
    assert_eq!(visible_kind(&engine), ScreenKind::Home);
    assert_eq!(api.calls_to(Endpoint::Login).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_tab_flows_start_lazily_and_once() {
    let mut engine = signed_in(Arc::new(MemoryApi::seeded())).await;
    let tabs = tab_bar(&engine);
    engine.drain_events();

    act_on(&mut engine, tabs, select_tab(Tab::Clip)).await;
    assert_eq!(visible_kind(&engine), ScreenKind::Clip);
    act_on(&mut engine, tabs, select_tab(Tab::Home)).await;
    assert_eq!(visible_kind(&engine), ScreenKind::Home);
    act_on(&mut engine, tabs, select_tab(Tab::Clip)).await;

    let clip_starts = engine
        .drain_events()
        .into_iter()
        .filter(|e| {
            matches!(
                e,
                EngineEvent::FlowStarted {
                    kind: FlowKind::Clip,
                    ..
                }
            )
        })
        .count();
    assert_eq!(clip_starts, 1);
    assert_eq!(visible_kind(&engine), ScreenKind::Clip);
}

#[tokio::test(start_paused = true)]
async fn test_drag_reorder_skips_the_pinned_row() {
    let api = Arc::new(MemoryApi::seeded());
    let mut engine = signed_in(api.clone()).await;
    let tabs = tab_bar(&engine);
    act_on(&mut engine, tabs, select_tab(Tab::Clip)).await;
    act(&mut engine, ScreenAction::Clip(ClipAction::Edit)).await;
    assert_eq!(visible_kind(&engine), ScreenKind::EditClip);
    assert!(engine.host().tab_bar_hidden(current_tab_stack(&engine)));

    // rows: All clips, Reading, Rust, Recipes
    act(
        &mut engine,
        ScreenAction::EditClip(EditClipAction::Drag { from: 3, to: 1 }),
    )
    .await;
    act(
        &mut engine,
        ScreenAction::EditClip(EditClipAction::Drag { from: 0, to: 2 }),
    )
    .await;
    act(
        &mut engine,
        ScreenAction::EditClip(EditClipAction::Drag { from: 2, to: 0 }),
    )
    .await;

    assert_eq!(api.calls_to(Endpoint::ReorderClip), vec!["3@0".to_string()]);
    assert_eq!(api.clip_titles(), vec!["Recipes", "Reading", "Rust"]);

    act(&mut engine, ScreenAction::EditClip(EditClipAction::Back)).await;
    assert_eq!(visible_kind(&engine), ScreenKind::Clip);
    assert!(!engine.host().tab_bar_hidden(current_tab_stack(&engine)));
}

#[tokio::test(start_paused = true)]
async fn test_session_expiry_tears_down_to_login_once() {
    let api = Arc::new(MemoryApi::seeded());
    let mut credentials = MockCredentials::new();
    credentials.expect_load().returning(|| Ok(Some(tokens())));
    credentials.expect_clear().times(1).returning(|| Ok(()));
    let mut engine = engine_with(
        api.clone(),
        Box::new(credentials),
        Box::new(MemoryPasteboard::new()),
    );
    engine.start();
    engine.settle().await;
    engine.drain_events();

    api.expire_session();
    act(&mut engine, ScreenAction::Home(HomeAction::Appear)).await;

    assert!(!engine.is_logged_in());
    assert_eq!(root_kinds(&engine), vec![ScreenKind::Login]);
    let events = engine.drain_events();
    let expiries = events
        .iter()
        .filter(|e| matches!(e, EngineEvent::SessionExpired))
        .count();
    assert_eq!(expiries, 1);
    assert!(events.iter().any(|e| matches!(
        e,
        EngineEvent::ScreenRemoved {
            kind: ScreenKind::TabBar,
            ..
        }
    )));
}

#[tokio::test(start_paused = true)]
async fn test_logout_from_settings_returns_to_login() {
    let mut engine = signed_in(Arc::new(MemoryApi::seeded())).await;

    act(&mut engine, ScreenAction::Home(HomeAction::OpenSetting)).await;
    assert_eq!(visible_kind(&engine), ScreenKind::Setting);
    assert!(engine.host().tab_bar_hidden(current_tab_stack(&engine)));

    act(&mut engine, ScreenAction::Setting(SettingAction::Logout)).await;

    assert!(!engine.is_logged_in());
    assert_eq!(root_kinds(&engine), vec![ScreenKind::Login]);
}

#[tokio::test(start_paused = true)]
async fn test_detail_clip_back_finishes_its_flow() {
    let mut engine = signed_in(Arc::new(MemoryApi::seeded())).await;
    engine.drain_events();

    act(&mut engine, ScreenAction::Home(HomeAction::OpenClip { clip_id: 2 })).await;
    assert_eq!(visible_kind(&engine), ScreenKind::DetailClip);

    act(&mut engine, ScreenAction::DetailClip(DetailClipAction::Back)).await;

    assert_eq!(visible_kind(&engine), ScreenKind::Home);
    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        EngineEvent::FlowFinished {
            kind: FlowKind::DetailClip,
            ..
        }
    )));
}

#[tokio::test(start_paused = true)]
async fn test_detail_clip_back_under_a_link_page_is_ignored() {
    let mut engine = signed_in(Arc::new(MemoryApi::seeded())).await;
    act(&mut engine, ScreenAction::Home(HomeAction::OpenClip { clip_id: 2 })).await;
    let detail = visible(&engine).id();
    act(&mut engine, ScreenAction::DetailClip(DetailClipAction::Appear)).await;
    // toast 4 is "The Rust Book" in the Rust clip
    act(
        &mut engine,
        ScreenAction::DetailClip(DetailClipAction::OpenLink { toast_id: 4 }),
    )
    .await;
    assert_eq!(visible_kind(&engine), ScreenKind::LinkWeb);
    engine.drain_events();

    act_on(
        &mut engine,
        detail,
        ScreenAction::DetailClip(DetailClipAction::Back),
    )
    .await;

    let kinds = engine.host().kinds(current_tab_stack(&engine));
    assert!(kinds.ends_with(&[ScreenKind::DetailClip, ScreenKind::LinkWeb]));
    assert!(!engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, EngineEvent::FlowFinished { .. })));

    act(&mut engine, ScreenAction::LinkWeb(LinkWebAction::Back)).await;
    assert_eq!(visible_kind(&engine), ScreenKind::DetailClip);
    act(&mut engine, ScreenAction::DetailClip(DetailClipAction::Back)).await;
    assert_eq!(visible_kind(&engine), ScreenKind::Home);
}

#[tokio::test(start_paused = true)]
async fn test_timer_wizard_saves_and_returns_to_board() {
    let api = Arc::new(MemoryApi::seeded());
    let mut engine = signed_in(api.clone()).await;
    let tabs = tab_bar(&engine);
    act_on(&mut engine, tabs, select_tab(Tab::Timer)).await;
    assert_eq!(visible_kind(&engine), ScreenKind::Remind);

    act(&mut engine, ScreenAction::Remind(RemindAction::AddTimer)).await;
    assert_eq!(visible_kind(&engine), ScreenKind::RemindSelectClip);
    act(
        &mut engine,
        ScreenAction::RemindSelectClip(RemindSelectClipAction::Select { clip_id: 1 }),
    )
    .await;
    act(
        &mut engine,
        ScreenAction::RemindSelectClip(RemindSelectClipAction::Next),
    )
    .await;
    assert_eq!(visible_kind(&engine), ScreenKind::RemindTimerAdd);

    act(
        &mut engine,
        ScreenAction::RemindTimerAdd(RemindTimerAddAction::SetTime {
            time: "08:30".to_string(),
        }),
    )
    .await;
    act(
        &mut engine,
        ScreenAction::RemindTimerAdd(RemindTimerAddAction::ToggleDay { day: 2 }),
    )
    .await;
    act(&mut engine, ScreenAction::RemindTimerAdd(RemindTimerAddAction::Save)).await;

    let stack = current_tab_stack(&engine);
    assert_eq!(engine.host().kinds(stack), vec![ScreenKind::Remind]);
    assert_eq!(
        engine.host().banner(stack),
        Some(&Banner::success(TIMER_SAVED_MESSAGE))
    );
    assert_eq!(api.calls_to(Endpoint::AddTimer), vec!["1".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_same_script_yields_same_navigation() {
    async fn run() -> Vec<String> {
        let mut engine = signed_in(Arc::new(MemoryApi::seeded())).await;
        let tabs = tab_bar(&engine);
        act_on(&mut engine, tabs, select_tab(Tab::Clip)).await;
        act(&mut engine, ScreenAction::Clip(ClipAction::OpenClip { clip_id: 1 })).await;
        act(&mut engine, ScreenAction::DetailClip(DetailClipAction::Back)).await;
        act_on(&mut engine, tabs, select_tab(Tab::Home)).await;
        act(&mut engine, ScreenAction::Home(HomeAction::OpenSetting)).await;
        act(&mut engine, ScreenAction::Setting(SettingAction::Back)).await;
        shape(&engine.drain_events())
    }

    let first = run().await;
    let second = run().await;

    assert!(!first.is_empty());
    assert_eq!(first, second);
}
