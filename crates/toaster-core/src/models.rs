//! Domain records exchanged between the backend and the screens
//!
//! These mirror what the Toaster service returns, minus transport details.
//! Clips are user-defined collections; toasts are the saved links inside them.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

pub type ClipId = i64;
pub type ToastId = i64;
pub type TimerId = i64;

/// Title shown for the synthetic entry that stands for every clip at once
pub const ALL_CLIPS_TITLE: &str = "All clips";

/// Clip id the backend uses to mean "no particular clip"
pub const ALL_CLIPS_ID: ClipId = 0;

/// Maximum clip title length, in characters
pub const MAX_CLIP_TITLE_CHARS: usize = 15;

// ─────────────────────────────────────────────────────────────────
// Clips
// ─────────────────────────────────────────────────────────────────

/// One clip as listed on the clip and home screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipSummary {
    pub id: ClipId,
    pub title: String,
    pub toast_count: u32,
}

impl ClipSummary {
    /// The pinned leading row that represents every clip
    pub fn all_clips(toast_count: u32) -> Self {
        Self {
            id: ALL_CLIPS_ID,
            title: ALL_CLIPS_TITLE.to_string(),
            toast_count,
        }
    }

    pub fn is_all_clips(&self) -> bool {
        self.id == ALL_CLIPS_ID
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipList {
    pub all_toast_count: u32,
    pub clips: Vec<ClipSummary>,
}

impl ClipList {
    /// The list as displayed: the "All clips" row first, then the user's clips
    pub fn with_all_clips(&self) -> Vec<ClipSummary> {
        std::iter::once(ClipSummary::all_clips(self.all_toast_count))
            .chain(self.clips.iter().cloned())
            .collect()
    }
}

/// A row in a clip picker. `id == None` saves into no particular clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableClip {
    pub id: Option<ClipId>,
    pub title: String,
    pub toast_count: u32,
}

impl SelectableClip {
    pub fn all_clips(toast_count: u32) -> Self {
        Self {
            id: None,
            title: ALL_CLIPS_TITLE.to_string(),
            toast_count,
        }
    }
}

impl From<&ClipSummary> for SelectableClip {
    fn from(clip: &ClipSummary) -> Self {
        Self {
            id: Some(clip.id),
            title: clip.title.clone(),
            toast_count: clip.toast_count,
        }
    }
}

/// Result of validating a clip title the user is typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCheck {
    Available,
    Duplicated,
    TooLong,
}

/// Which clips a toast listing covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipScope {
    All,
    Clip(ClipId),
}

impl ClipScope {
    /// Id 0 is how every screen addresses "all clips"
    pub fn from_clip_id(id: ClipId) -> Self {
        if id == ALL_CLIPS_ID {
            Self::All
        } else {
            Self::Clip(id)
        }
    }

    pub fn clip_id(&self) -> Option<ClipId> {
        match self {
            Self::All => None,
            Self::Clip(id) => Some(*id),
        }
    }
}

/// Read-state filter behind the three-way segment control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

impl ReadFilter {
    /// Segment 0/1/2 maps to all/read/unread; anything else is ignored
    pub fn from_segment(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::All),
            1 => Some(Self::Read),
            2 => Some(Self::Unread),
            _ => None,
        }
    }

    pub fn admits(&self, is_read: bool) -> bool {
        match self {
            Self::All => true,
            Self::Read => is_read,
            Self::Unread => !is_read,
        }
    }
}

/// Move a clip to a new zero-based priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityChange {
    pub clip_id: ClipId,
    pub priority: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRename {
    pub clip_id: ClipId,
    pub title: String,
}

// ─────────────────────────────────────────────────────────────────
// Toasts
// ─────────────────────────────────────────────────────────────────

/// A saved link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub title: String,
    pub url: String,
    pub is_read: bool,
    pub clip_id: Option<ClipId>,
    pub clip_title: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastPage {
    pub all_toast_count: u32,
    pub toasts: Vec<Toast>,
}

// ─────────────────────────────────────────────────────────────────
// Home
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSummary {
    pub nickname: String,
    pub read_toast_count: u32,
    pub all_toast_count: u32,
    pub clips: Vec<ClipSummary>,
}

/// A link curated by the service for everyone this week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyLink {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedSite {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub subtitle: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub toasts: Vec<Toast>,
    pub clips: Vec<ClipSummary>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.clips.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────
// Reminder timers
// ─────────────────────────────────────────────────────────────────

/// Days are numbered 1 (Monday) through 7 (Sunday)
pub type Weekday = u8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    pub clip_id: ClipId,
    pub clip_title: String,
    pub remind_time: NaiveTime,
    pub remind_days: Vec<Weekday>,
    pub enabled: bool,
}

/// Timers split by whether their next reminder already fired today
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerBoard {
    pub completed: Vec<Timer>,
    pub waiting: Vec<Timer>,
}

impl TimerBoard {
    pub fn find(&self, id: TimerId) -> Option<&Timer> {
        self.completed
            .iter()
            .chain(self.waiting.iter())
            .find(|t| t.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimer {
    pub clip_id: ClipId,
    pub remind_time: NaiveTime,
    pub remind_days: Vec<Weekday>,
}

// ─────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialProvider {
    Apple,
    Kakao,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_all_clips_prepends_pinned_row() {
        let list = ClipList {
            all_toast_count: 7,
            clips: vec![ClipSummary {
                id: 3,
                title: "Rust".into(),
                toast_count: 2,
            }],
        };

        let rows = list.with_all_clips();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_all_clips());
        assert_eq!(rows[0].toast_count, 7);
        assert_eq!(rows[1].id, 3);
    }

    #[test]
    fn test_read_filter_from_segment() {
        assert_eq!(ReadFilter::from_segment(0), Some(ReadFilter::All));
        assert_eq!(ReadFilter::from_segment(1), Some(ReadFilter::Read));
        assert_eq!(ReadFilter::from_segment(2), Some(ReadFilter::Unread));
        assert_eq!(ReadFilter::from_segment(3), None);
    }

    #[test]
    fn test_read_filter_admits() {
        assert!(ReadFilter::All.admits(true));
        assert!(ReadFilter::Read.admits(true));
        assert!(!ReadFilter::Read.admits(false));
        assert!(ReadFilter::Unread.admits(false));
    }

    #[test]
    fn test_clip_scope_zero_means_all() {
        assert_eq!(ClipScope::from_clip_id(0), ClipScope::All);
        assert_eq!(ClipScope::from_clip_id(9), ClipScope::Clip(9));
        assert_eq!(ClipScope::Clip(9).clip_id(), Some(9));
    }

    #[test]
    fn test_timer_board_find_searches_both_lists() {
        let timer = |id| Timer {
            id,
            clip_id: 1,
            clip_title: "Daily".into(),
            remind_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            remind_days: vec![1],
            enabled: true,
        };
        let board = TimerBoard {
            completed: vec![timer(1)],
            waiting: vec![timer(2)],
        };

        assert!(board.find(1).is_some());
        assert!(board.find(2).is_some());
        assert!(board.find(3).is_none());
    }
}
