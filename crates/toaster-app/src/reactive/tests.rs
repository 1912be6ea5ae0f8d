//! Tests for the reactive stage combinators

use std::time::Duration;

use super::*;

/// Let every runnable stage make progress on the paused clock
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn test_map_and_filter_preserve_order() {
    let mut bag = CancelBag::new();
    let (tx, input) = subject::<u32>();
    let mut out = input
        .filter(&mut bag, |n| n % 2 == 1)
        .map(&mut bag, |n| n * 10);

    for n in 1..=5 {
        tx.send(n);
    }
    settle().await;

    assert_eq!(out.drain(), vec![10, 30, 50]);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_emits_only_the_last_value_in_a_burst() {
    let mut bag = CancelBag::new();
    let (tx, input) = subject::<String>();
    let mut out = input.debounce(&mut bag, Duration::from_millis(200));

    for text in ["a", "ab", "abc"] {
        tx.send(text.to_string());
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(out.drain().is_empty());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(out.drain(), vec!["abc".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_emits_values_separated_by_quiet_periods() {
    let mut bag = CancelBag::new();
    let (tx, input) = subject::<u32>();
    let mut out = input.debounce(&mut bag, Duration::from_millis(100));

    tx.send(1);
    tokio::time::sleep(Duration::from_millis(150)).await;
    tx.send(2);
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(out.drain(), vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_remove_duplicates_drops_repeats_only_when_adjacent() {
    let mut bag = CancelBag::new();
    let (tx, input) = subject::<&'static str>();
    let mut out = input.remove_duplicates(&mut bag);

    for value in ["a", "a", "b", "b", "a"] {
        tx.send(value);
    }
    settle().await;

    assert_eq!(out.drain(), vec!["a", "b", "a"]);
}

#[tokio::test(start_paused = true)]
async fn test_with_latest_from_pairs_each_trigger_with_latest_selection() {
    let mut bag = CancelBag::new();
    let (confirm, confirms) = subject::<()>();
    let (select, selections) = subject::<Option<i64>>();
    let mut out = confirms.with_latest_from(&mut bag, selections, None);

    confirm.send(());
    settle().await;
    select.send(Some(3));
    select.send(Some(7));
    confirm.send(());
    settle().await;

    assert_eq!(out.drain(), vec![((), None), ((), Some(7))]);
}

#[tokio::test(start_paused = true)]
async fn test_with_latest_from_emits_nothing_for_selection_alone() {
    let mut bag = CancelBag::new();
    let (_confirm, confirms) = subject::<()>();
    let (select, selections) = subject::<u8>();
    let mut out = confirms.with_latest_from(&mut bag, selections, 0);

    select.send(1);
    select.send(2);
    settle().await;

    assert!(out.drain().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_then_keeps_one_request_in_flight() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let mut bag = CancelBag::new();
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (tx, input) = subject::<u32>();

    let mut out = {
        let in_flight = in_flight.clone();
        let peak = peak.clone();
        input.then(&mut bag, move |n| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(100)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                n
            }
        })
    };

    for n in 0..3 {
        tx.send(n);
    }
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(out.drain(), vec![0, 1, 2]);
    assert_eq!(peak.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_merge_ends_after_both_inputs_end() {
    let mut bag = CancelBag::new();
    let (a, left) = subject::<u8>();
    let (b, right) = subject::<u8>();
    let mut out = left.merge(&mut bag, right);

    a.send(1);
    b.send(2);
    drop(a);
    drop(b);

    let mut seen = Vec::new();
    while let Some(value) = out.recv().await {
        seen.push(value);
    }
    seen.sort();
    assert_eq!(seen, vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_split_delivers_to_every_copy() {
    let mut bag = CancelBag::new();
    let (tx, input) = subject::<u8>();
    let [mut first, mut second] = input.split(&mut bag);

    tx.send(4);
    settle().await;

    assert_eq!(first.drain(), vec![4]);
    assert_eq!(second.drain(), vec![4]);
}

#[tokio::test(start_paused = true)]
async fn test_scan_emits_running_state() {
    let mut bag = CancelBag::new();
    let (tx, input) = subject::<u32>();
    let mut out = input.scan(&mut bag, 0u32, |sum, n| *sum += n);

    for n in [1, 2, 3] {
        tx.send(n);
    }
    settle().await;

    assert_eq!(out.drain(), vec![1, 3, 6]);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_bag_stops_pipeline() {
    let mut bag = CancelBag::new();
    let (tx, input) = subject::<u32>();
    let mut out = input.map(&mut bag, |n| n + 1);
    assert_eq!(bag.len(), 1);

    drop(bag);
    settle().await;

    assert!(!tx.send(1));
    assert_eq!(out.recv().await, None);
}

#[test]
fn test_cached_is_shared_between_clones() {
    let cache = Cached::new(vec![1]);
    let shared = cache.clone();

    shared.update(|v| v.push(2));

    assert_eq!(cache.get(), vec![1, 2]);
}

#[tokio::test]
async fn test_from_stream_forwards_all_items() {
    let mut bag = CancelBag::new();
    let mut out = Events::from_stream(futures_util::stream::iter(vec![1, 2, 3]), &mut bag);

    let mut seen = Vec::new();
    while let Some(value) = out.recv().await {
        seen.push(value);
    }
    assert_eq!(seen, vec![1, 2, 3]);
}

#[test]
fn test_recv_waits_until_a_value_is_sent() {
    let (tx, mut events) = subject::<u32>();
    let mut next = tokio_test::task::spawn(events.recv());

    tokio_test::assert_pending!(next.poll());
    tx.send(7);

    assert!(next.is_woken());
    tokio_test::assert_ready_eq!(next.poll(), Some(7));
}

#[test]
fn test_recv_ends_once_every_subject_is_gone() {
    let (tx, mut events) = subject::<u32>();
    drop(tx);

    let mut next = tokio_test::task::spawn(events.recv());
    tokio_test::assert_ready_eq!(next.poll(), None);
}
