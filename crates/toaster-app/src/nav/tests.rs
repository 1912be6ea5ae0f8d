//! Tests for stacks, routers and the host

use super::*;
use crate::engine_event::EngineEvent;
use crate::flow::FlowEvent;
use crate::message::Message;
use crate::reactive::CancelBag;
use crate::screens::tab_bar::TabBarView;
use crate::screens::{next_screen_id, Screen, ScreenKind, ScreenView};

/// A screen with no view-model behind it
fn screen() -> Screen {
    Screen::new(
        next_screen_id(),
        ScreenView::TabBar(TabBarView::new(Vec::new())),
        CancelBag::new(),
    )
}

fn finish(flow: u64) -> Message {
    Message::Flow {
        flow,
        event: FlowEvent::Finish,
    }
}

fn ids(host: &NavigationHost, stack: StackId) -> Vec<u64> {
    host.stack(stack)
        .map(|s| s.screens().iter().map(|screen| screen.id()).collect())
        .unwrap_or_default()
}

#[test]
fn test_push_then_pop_restores_the_stack() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    let root = screen();
    let root_id = root.id();
    router.set_root(&mut host, root, false);

    router.push(&mut host, screen(), true);
    assert_eq!(host.stack(router.stack()).unwrap().len(), 2);

    router.pop(&mut host, true);
    assert_eq!(ids(&host, router.stack()), vec![root_id]);
}

#[test]
fn test_pop_on_single_screen_stack_is_a_no_op() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    router.set_root(&mut host, screen(), false);
    host.drain_events();

    router.pop(&mut host, true);

    assert_eq!(host.stack(router.stack()).unwrap().len(), 1);
    assert!(host.drain_events().is_empty());
}

#[test]
fn test_pop_to_root_keeps_only_the_first_screen() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    let root = screen();
    let root_id = root.id();
    router.set_root(&mut host, root, false);
    router.push(&mut host, screen(), true);
    router.push(&mut host, screen(), true);
    host.drain_events();

    router.pop_to_root(&mut host, false);

    assert_eq!(ids(&host, router.stack()), vec![root_id]);
    let removed = host
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, EngineEvent::ScreenRemoved { .. }))
        .count();
    assert_eq!(removed, 2);
}

#[test]
fn test_set_root_replaces_every_screen() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    router.set_root(&mut host, screen(), false);
    router.push(&mut host, screen(), false);

    let fresh = screen();
    let fresh_id = fresh.id();
    router.set_root(&mut host, fresh, false);

    assert_eq!(ids(&host, router.stack()), vec![fresh_id]);
    assert_eq!(host.screen_count(), 1);
}

#[test]
fn test_operations_on_released_stack_are_no_ops() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    router.set_root(&mut host, screen(), false);
    host.release_stack(router.stack());
    host.drain_events();

    router.push(&mut host, screen(), true);
    router.pop(&mut host, true);
    router.pop_to_root(&mut host, true);
    router.set_root(&mut host, screen(), false);
    assert!(router.present(&mut host, screen(), true, None).is_none());
    router.dismiss(&mut host, true, Some(finish(1)));

    assert!(!host.contains_stack(router.stack()));
    assert_eq!(host.screen_count(), 0);
    assert!(host.drain_events().is_empty());
    assert!(host.take_completions().is_empty());
}

#[test]
fn test_push_hiding_tab_bar_hides_only_while_on_top() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    router.set_root(&mut host, screen(), false);
    assert!(!host.tab_bar_hidden(router.stack()));

    router.push_hiding_tab_bar(&mut host, screen(), true);
    assert!(host.tab_bar_hidden(router.stack()));

    router.pop(&mut host, true);
    assert!(!host.tab_bar_hidden(router.stack()));
}

#[test]
fn test_present_and_dismiss() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    router.set_root(&mut host, screen(), false);

    let modal = router
        .present(&mut host, screen(), true, Some(finish(7)))
        .unwrap();
    assert_eq!(
        host.stack(router.stack()).unwrap().presented(),
        Some(modal.stack())
    );
    assert_eq!(
        host.visible_screen(router.stack()).map(|s| s.id()),
        host.top_screen(modal.stack()).map(|s| s.id())
    );
    assert_eq!(host.take_completions().len(), 1);

    router.dismiss(&mut host, true, Some(finish(8)));

    assert!(!host.contains_stack(modal.stack()));
    assert_eq!(host.stack(router.stack()).unwrap().presented(), None);
    assert_eq!(host.screen_count(), 1);
}

#[test]
fn test_present_over_a_presentation_is_refused() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    router.set_root(&mut host, screen(), false);
    let first = router.present(&mut host, screen(), true, None).unwrap();

    let second = router.present(&mut host, screen(), true, Some(finish(3)));

    assert!(second.is_none());
    assert_eq!(
        host.stack(router.stack()).unwrap().presented(),
        Some(first.stack())
    );
    assert!(host.take_completions().is_empty());
    assert_eq!(host.screen_count(), 2);
}

#[test]
fn test_dismiss_from_the_presented_stack_itself() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    router.set_root(&mut host, screen(), false);
    let modal = router.present(&mut host, screen(), true, None).unwrap();

    modal.dismiss(&mut host, false, None);

    assert!(!host.contains_stack(modal.stack()));
    assert_eq!(host.stack(router.stack()).unwrap().presented(), None);
}

#[test]
fn test_dismiss_with_nothing_presented_still_completes() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    router.set_root(&mut host, screen(), false);
    host.drain_events();

    router.dismiss(&mut host, false, Some(finish(42)));

    assert_eq!(host.screen_count(), 1);
    assert!(host.drain_events().is_empty());
    let completions = host.take_completions();
    assert_eq!(completions.len(), 1);
    assert!(matches!(
        completions[0],
        Message::Flow {
            flow: 42,
            event: FlowEvent::Finish
        }
    ));
    assert!(host.take_completions().is_empty());
}

#[test]
fn test_releasing_a_host_screen_releases_its_stacks() {
    let mut host = NavigationHost::new();
    let root = Router::new(host.create_stack());
    let tab = Router::new(host.create_stack());
    tab.set_root(&mut host, screen(), false);
    root.set_root(&mut host, screen().hosting(vec![tab.stack()]), false);

    root.set_root(&mut host, screen(), false);

    assert!(!host.contains_stack(tab.stack()));
    assert_eq!(host.screen_count(), 1);
    tab.push(&mut host, screen(), false);
    assert_eq!(host.screen_count(), 1);
}

#[test]
fn test_banner_on_released_stack_is_dropped() {
    let mut host = NavigationHost::new();
    let stack = host.create_stack();
    host.post_banner(stack, Banner::success("Saved"));
    assert_eq!(host.banner(stack), Some(&Banner::success("Saved")));

    host.release_stack(stack);
    host.drain_events();
    host.post_banner(stack, Banner::failure("Lost"));

    assert!(host.drain_events().is_empty());
    assert_eq!(host.banner(stack), None);
}

#[test]
fn test_snapshot_nests_hosted_and_presented_stacks() {
    let mut host = NavigationHost::new();
    let root = Router::new(host.create_stack());
    let tab = Router::new(host.create_stack());
    tab.set_root(&mut host, screen(), false);
    root.set_root(&mut host, screen().hosting(vec![tab.stack()]), false);
    root.present(&mut host, screen(), false, None);

    let snapshot = host.snapshot(root.stack()).unwrap();

    assert_eq!(snapshot.screens.len(), 1);
    assert_eq!(snapshot.screens[0].kind, ScreenKind::TabBar);
    assert_eq!(snapshot.screens[0].stacks.len(), 1);
    assert_eq!(snapshot.screens[0].stacks[0].id, tab.stack());
    assert!(snapshot.presented.is_some());
}

#[test]
fn test_snapshot_json_omits_empty_parts() {
    let mut host = NavigationHost::new();
    let router = Router::new(host.create_stack());
    router.set_root(&mut host, screen(), false);

    let json = serde_json::to_value(host.snapshot(router.stack()).unwrap()).unwrap();

    assert_eq!(json["screens"][0]["kind"], "tab_bar");
    assert!(json["screens"][0].get("stacks").is_none());
    assert!(json.get("presented").is_none());
    assert!(json.get("banner").is_none());
}
