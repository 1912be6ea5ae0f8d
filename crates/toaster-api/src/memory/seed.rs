//! Demo content for the in-memory backend

use chrono::NaiveTime;
use toaster_core::{RecommendedSite, WeeklyLink};

use super::{MemoryState, StoredClip, StoredTimer, StoredToast};

/// Populate a fresh state with a small, fixed data set
pub(super) fn demo(state: &mut MemoryState) {
    state.nickname = "toaster".to_string();

    for title in ["Reading", "Rust", "Recipes"] {
        let id = state.next_id();
        state.clips.push(StoredClip {
            id,
            title: title.to_string(),
        });
    }
    let reading = state.clips[0].id;
    let rust = state.clips[1].id;

    let toasts = [
        ("The Rust Book", "https://doc.rust-lang.org/book/", Some(rust), true),
        ("Tokio tutorial", "https://tokio.rs/tokio/tutorial", Some(rust), false),
        ("Long reads", "https://example.com/longreads", Some(reading), false),
        ("Unsorted bookmark", "https://example.com/unsorted", None, false),
    ];
    for (title, url, clip_id, is_read) in toasts {
        let id = state.next_id();
        state.toasts.push(StoredToast {
            id,
            title: title.to_string(),
            url: url.to_string(),
            clip_id,
            is_read,
        });
    }

    let id = state.next_id();
    state.timers.push(StoredTimer {
        id,
        clip_id: reading,
        remind_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap_or_default(),
        remind_days: vec![1, 3, 5],
        enabled: true,
    });

    state.weekly = vec![WeeklyLink {
        id: 1,
        title: "This week in Rust".to_string(),
        url: "https://this-week-in-rust.org/".to_string(),
        thumbnail_url: None,
    }];
    state.recommended = vec![RecommendedSite {
        id: 1,
        title: "docs.rs".to_string(),
        url: "https://docs.rs/".to_string(),
        subtitle: Some("Documentation for every crate".to_string()),
    }];
}
