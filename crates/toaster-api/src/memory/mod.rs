//! In-memory Toaster backend
//!
//! Implements [`ToasterApi`] over a mutex-guarded state. Every call is
//! recorded, can be delayed by a fixed latency, and can be made to fail with
//! any [`ApiFailure`] so the headless driver and the tests can exercise each
//! branch of the result contract.

mod seed;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{Local, NaiveTime};
use toaster_core::prelude::*;
use toaster_core::{
    ApiFailure, ApiResult, AuthTokens, ClipId, ClipList, ClipRename, ClipScope, ClipSummary,
    HomeSummary, NewTimer, PriorityChange, ReadFilter, RecommendedSite, SearchResults,
    SocialProvider, Timer, TimerBoard, TimerId, ToasterApi, Toast, ToastId, ToastPage, WeeklyLink,
    Weekday,
};

/// Identifies one backend operation, for call logs and fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Logout,
    Withdraw,
    MainPage,
    RecentToasts,
    WeeklyLinks,
    RecommendedSites,
    AllClips,
    CheckClipName,
    AddClip,
    DeleteClip,
    RenameClip,
    ReorderClip,
    ClipToasts,
    SaveLink,
    ToggleRead,
    DeleteToast,
    RenameToast,
    MoveToast,
    Search,
    Timers,
    AddTimer,
    EditTimer,
    DeleteTimer,
    ToggleTimer,
}

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub endpoint: Endpoint,
    /// The call's main argument, rendered for assertions (empty for none)
    pub detail: String,
}

#[derive(Debug, Clone, Copy)]
enum Fault {
    Always(ApiFailure),
    Once(ApiFailure),
}

#[derive(Debug, Clone)]
struct StoredClip {
    id: ClipId,
    title: String,
}

#[derive(Debug, Clone)]
struct StoredToast {
    id: ToastId,
    title: String,
    url: String,
    clip_id: Option<ClipId>,
    is_read: bool,
}

#[derive(Debug, Clone)]
struct StoredTimer {
    id: TimerId,
    clip_id: ClipId,
    remind_time: NaiveTime,
    remind_days: Vec<Weekday>,
    enabled: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    nickname: String,
    /// Ordered by priority
    clips: Vec<StoredClip>,
    toasts: Vec<StoredToast>,
    timers: Vec<StoredTimer>,
    weekly: Vec<WeeklyLink>,
    recommended: Vec<RecommendedSite>,
    last_id: i64,
    authorized: bool,
    calls: Vec<Call>,
    faults: HashMap<Endpoint, Fault>,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn clip_title(&self, id: ClipId) -> Option<String> {
        self.clips
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.clone())
    }

    fn summaries(&self) -> Vec<ClipSummary> {
        self.clips
            .iter()
            .map(|c| ClipSummary {
                id: c.id,
                title: c.title.clone(),
                toast_count: self
                    .toasts
                    .iter()
                    .filter(|t| t.clip_id == Some(c.id))
                    .count() as u32,
            })
            .collect()
    }

    fn toast(&self, stored: &StoredToast) -> Toast {
        Toast {
            id: stored.id,
            title: stored.title.clone(),
            url: stored.url.clone(),
            is_read: stored.is_read,
            clip_id: stored.clip_id,
            clip_title: stored.clip_id.and_then(|id| self.clip_title(id)),
            thumbnail_url: None,
        }
    }

    fn timer(&self, stored: &StoredTimer) -> Timer {
        Timer {
            id: stored.id,
            clip_id: stored.clip_id,
            clip_title: self.clip_title(stored.clip_id).unwrap_or_default(),
            remind_time: stored.remind_time,
            remind_days: stored.remind_days.clone(),
            enabled: stored.enabled,
        }
    }

    fn toast_mut(&mut self, id: ToastId) -> ApiResult<&mut StoredToast> {
        self.toasts
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiFailure::NotFound)
    }

    fn timer_mut(&mut self, id: TimerId) -> ApiResult<&mut StoredTimer> {
        self.timers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiFailure::NotFound)
    }

    fn require_clip(&self, id: ClipId) -> ApiResult<()> {
        if self.clips.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(ApiFailure::NotFound)
        }
    }
}

/// Mutex-backed [`ToasterApi`] implementation
#[derive(Debug)]
pub struct MemoryApi {
    state: Mutex<MemoryState>,
    latency: Duration,
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryApi {
    /// An empty, authorized backend
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                authorized: true,
                ..MemoryState::default()
            }),
            latency: Duration::ZERO,
        }
    }

    /// An authorized backend pre-filled with demo clips, toasts and a timer
    pub fn seeded() -> Self {
        let api = Self::new();
        seed::demo(&mut api.lock());
        api
    }

    /// Delay every call by `latency` (tokio time)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panicking test thread must not take the backend down with it
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ─────────────────────────────────────────────────────────
    // Fault injection
    // ─────────────────────────────────────────────────────────

    /// Fail every call to `endpoint` until [`MemoryApi::heal`]
    pub fn fail(&self, endpoint: Endpoint, failure: ApiFailure) {
        self.lock().faults.insert(endpoint, Fault::Always(failure));
    }

    /// Fail only the next call to `endpoint`
    pub fn fail_once(&self, endpoint: Endpoint, failure: ApiFailure) {
        self.lock().faults.insert(endpoint, Fault::Once(failure));
    }

    pub fn heal(&self, endpoint: Endpoint) {
        self.lock().faults.remove(&endpoint);
    }

    /// Reject every call but login with `Unauthorized`
    pub fn expire_session(&self) {
        self.lock().authorized = false;
    }

    // ─────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Details of every call made to `endpoint`, oldest first
    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .map(|c| c.detail.clone())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn clip_titles(&self) -> Vec<String> {
        self.lock().clips.iter().map(|c| c.title.clone()).collect()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        let state = self.lock();
        state.toasts.iter().map(|t| state.toast(t)).collect()
    }

    // ─────────────────────────────────────────────────────────
    // Direct seeding
    // ─────────────────────────────────────────────────────────

    pub fn insert_clip(&self, title: &str) -> ClipId {
        let mut state = self.lock();
        let id = state.next_id();
        state.clips.push(StoredClip {
            id,
            title: title.to_string(),
        });
        id
    }

    pub fn insert_toast(&self, title: &str, url: &str, clip_id: Option<ClipId>) -> ToastId {
        let mut state = self.lock();
        let id = state.next_id();
        state.toasts.push(StoredToast {
            id,
            title: title.to_string(),
            url: url.to_string(),
            clip_id,
            is_read: false,
        });
        id
    }

    /// Record the call, wait out the latency, then apply faults and auth
    async fn enter(&self, endpoint: Endpoint, detail: impl Into<String>) -> ApiResult<()> {
        {
            let detail = detail.into();
            trace!("memory api: {:?}({})", endpoint, detail);
            self.lock().calls.push(Call { endpoint, detail });
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.lock();
        match state.faults.get(&endpoint).copied() {
            Some(Fault::Always(failure)) => return Err(failure),
            Some(Fault::Once(failure)) => {
                state.faults.remove(&endpoint);
                return Err(failure);
            }
            None => {}
        }
        if !state.authorized && endpoint != Endpoint::Login {
            return Err(ApiFailure::Unauthorized);
        }
        Ok(())
    }
}

impl ToasterApi for MemoryApi {
    async fn login(&self, provider: SocialProvider, social_token: String) -> ApiResult<AuthTokens> {
        self.enter(Endpoint::Login, format!("{:?}", provider)).await?;
        if social_token.is_empty() {
            return Err(ApiFailure::BadRequest);
        }
        let mut state = self.lock();
        state.authorized = true;
        let serial = state.next_id();
        Ok(AuthTokens {
            access_token: format!("access-{}", serial),
            refresh_token: format!("refresh-{}", serial),
        })
    }

    async fn logout(&self) -> ApiResult<()> {
        self.enter(Endpoint::Logout, "").await?;
        self.lock().authorized = false;
        Ok(())
    }

    async fn withdraw(&self) -> ApiResult<()> {
        self.enter(Endpoint::Withdraw, "").await?;
        let mut state = self.lock();
        state.clips.clear();
        state.toasts.clear();
        state.timers.clear();
        state.authorized = false;
        Ok(())
    }

    async fn main_page(&self) -> ApiResult<HomeSummary> {
        self.enter(Endpoint::MainPage, "").await?;
        let state = self.lock();
        Ok(HomeSummary {
            nickname: state.nickname.clone(),
            read_toast_count: state.toasts.iter().filter(|t| t.is_read).count() as u32,
            all_toast_count: state.toasts.len() as u32,
            clips: state.summaries(),
        })
    }

    async fn recent_toasts(&self) -> ApiResult<Vec<Toast>> {
        self.enter(Endpoint::RecentToasts, "").await?;
        let state = self.lock();
        Ok(state
            .toasts
            .iter()
            .rev()
            .take(5)
            .map(|t| state.toast(t))
            .collect())
    }

    async fn weekly_links(&self) -> ApiResult<Vec<WeeklyLink>> {
        self.enter(Endpoint::WeeklyLinks, "").await?;
        Ok(self.lock().weekly.clone())
    }

    async fn recommended_sites(&self) -> ApiResult<Vec<RecommendedSite>> {
        self.enter(Endpoint::RecommendedSites, "").await?;
        Ok(self.lock().recommended.clone())
    }

    async fn all_clips(&self) -> ApiResult<ClipList> {
        self.enter(Endpoint::AllClips, "").await?;
        let state = self.lock();
        Ok(ClipList {
            all_toast_count: state.toasts.len() as u32,
            clips: state.summaries(),
        })
    }

    async fn check_clip_name(&self, title: String) -> ApiResult<bool> {
        self.enter(Endpoint::CheckClipName, title.as_str()).await?;
        Ok(self.lock().clips.iter().any(|c| c.title == title))
    }

    async fn add_clip(&self, title: String) -> ApiResult<ClipSummary> {
        self.enter(Endpoint::AddClip, title.as_str()).await?;
        let mut state = self.lock();
        if title.trim().is_empty() || state.clips.iter().any(|c| c.title == title) {
            return Err(ApiFailure::BadRequest);
        }
        let id = state.next_id();
        state.clips.push(StoredClip {
            id,
            title: title.clone(),
        });
        Ok(ClipSummary {
            id,
            title,
            toast_count: 0,
        })
    }

    async fn delete_clip(&self, clip_id: ClipId) -> ApiResult<()> {
        self.enter(Endpoint::DeleteClip, clip_id.to_string()).await?;
        let mut state = self.lock();
        state.require_clip(clip_id)?;
        state.clips.retain(|c| c.id != clip_id);
        state.toasts.retain(|t| t.clip_id != Some(clip_id));
        state.timers.retain(|t| t.clip_id != clip_id);
        Ok(())
    }

    async fn rename_clip(&self, rename: ClipRename) -> ApiResult<()> {
        self.enter(
            Endpoint::RenameClip,
            format!("{}={}", rename.clip_id, rename.title),
        )
        .await?;
        let mut state = self.lock();
        let clip = state
            .clips
            .iter_mut()
            .find(|c| c.id == rename.clip_id)
            .ok_or(ApiFailure::NotFound)?;
        clip.title = rename.title;
        Ok(())
    }

    async fn reorder_clip(&self, change: PriorityChange) -> ApiResult<()> {
        self.enter(
            Endpoint::ReorderClip,
            format!("{}@{}", change.clip_id, change.priority),
        )
        .await?;
        let mut state = self.lock();
        let from = state
            .clips
            .iter()
            .position(|c| c.id == change.clip_id)
            .ok_or(ApiFailure::NotFound)?;
        if change.priority >= state.clips.len() {
            return Err(ApiFailure::BadRequest);
        }
        let clip = state.clips.remove(from);
        state.clips.insert(change.priority, clip);
        Ok(())
    }

    async fn clip_toasts(&self, scope: ClipScope, filter: ReadFilter) -> ApiResult<ToastPage> {
        self.enter(Endpoint::ClipToasts, format!("{:?}/{:?}", scope, filter))
            .await?;
        let state = self.lock();
        if let ClipScope::Clip(id) = scope {
            state.require_clip(id)?;
        }
        let in_scope: Vec<&StoredToast> = state
            .toasts
            .iter()
            .filter(|t| scope == ClipScope::All || t.clip_id == scope.clip_id())
            .collect();
        Ok(ToastPage {
            all_toast_count: in_scope.len() as u32,
            toasts: in_scope
                .into_iter()
                .filter(|t| filter.admits(t.is_read))
                .map(|t| state.toast(t))
                .collect(),
        })
    }

    async fn save_link(&self, url: String, clip_id: Option<ClipId>) -> ApiResult<()> {
        self.enter(Endpoint::SaveLink, url.as_str()).await?;
        let mut state = self.lock();
        if !toaster_core::is_link(&url) {
            return Err(ApiFailure::BadRequest);
        }
        if let Some(id) = clip_id {
            state.require_clip(id)?;
        }
        let id = state.next_id();
        state.toasts.push(StoredToast {
            id,
            title: url.clone(),
            url,
            clip_id,
            is_read: false,
        });
        Ok(())
    }

    async fn toggle_read(&self, toast_id: ToastId) -> ApiResult<bool> {
        self.enter(Endpoint::ToggleRead, toast_id.to_string())
            .await?;
        let mut state = self.lock();
        let toast = state.toast_mut(toast_id)?;
        toast.is_read = !toast.is_read;
        Ok(toast.is_read)
    }

    async fn delete_toast(&self, toast_id: ToastId) -> ApiResult<()> {
        self.enter(Endpoint::DeleteToast, toast_id.to_string())
            .await?;
        let mut state = self.lock();
        state.toast_mut(toast_id)?;
        state.toasts.retain(|t| t.id != toast_id);
        Ok(())
    }

    async fn rename_toast(&self, toast_id: ToastId, title: String) -> ApiResult<()> {
        self.enter(Endpoint::RenameToast, format!("{}={}", toast_id, title))
            .await?;
        if title.trim().is_empty() {
            return Err(ApiFailure::BadRequest);
        }
        self.lock().toast_mut(toast_id)?.title = title;
        Ok(())
    }

    async fn move_toast(&self, toast_id: ToastId, clip_id: ClipId) -> ApiResult<()> {
        self.enter(Endpoint::MoveToast, format!("{}->{}", toast_id, clip_id))
            .await?;
        let mut state = self.lock();
        state.require_clip(clip_id)?;
        state.toast_mut(toast_id)?.clip_id = Some(clip_id);
        Ok(())
    }

    async fn search(&self, query: String) -> ApiResult<SearchResults> {
        self.enter(Endpoint::Search, query.as_str()).await?;
        let needle = query.to_lowercase();
        let state = self.lock();
        Ok(SearchResults {
            toasts: state
                .toasts
                .iter()
                .filter(|t| t.title.to_lowercase().contains(&needle))
                .map(|t| state.toast(t))
                .collect(),
            clips: state
                .summaries()
                .into_iter()
                .filter(|c| c.title.to_lowercase().contains(&needle))
                .collect(),
        })
    }

    async fn timers(&self) -> ApiResult<TimerBoard> {
        self.enter(Endpoint::Timers, "").await?;
        let now = Local::now().time();
        let state = self.lock();
        let (completed, waiting): (Vec<Timer>, Vec<Timer>) = state
            .timers
            .iter()
            .map(|t| state.timer(t))
            .partition(|t| t.remind_time <= now);
        Ok(TimerBoard { completed, waiting })
    }

    async fn add_timer(&self, timer: NewTimer) -> ApiResult<Timer> {
        self.enter(Endpoint::AddTimer, timer.clip_id.to_string())
            .await?;
        let mut state = self.lock();
        state.require_clip(timer.clip_id)?;
        if timer.remind_days.is_empty() {
            return Err(ApiFailure::BadRequest);
        }
        let stored = StoredTimer {
            id: state.next_id(),
            clip_id: timer.clip_id,
            remind_time: timer.remind_time,
            remind_days: timer.remind_days,
            enabled: true,
        };
        let created = state.timer(&stored);
        state.timers.push(stored);
        Ok(created)
    }

    async fn edit_timer(&self, timer_id: TimerId, timer: NewTimer) -> ApiResult<()> {
        self.enter(Endpoint::EditTimer, timer_id.to_string())
            .await?;
        if timer.remind_days.is_empty() {
            return Err(ApiFailure::BadRequest);
        }
        let mut state = self.lock();
        let stored = state.timer_mut(timer_id)?;
        stored.remind_time = timer.remind_time;
        stored.remind_days = timer.remind_days;
        Ok(())
    }

    async fn delete_timer(&self, timer_id: TimerId) -> ApiResult<()> {
        self.enter(Endpoint::DeleteTimer, timer_id.to_string())
            .await?;
        let mut state = self.lock();
        state.timer_mut(timer_id)?;
        state.timers.retain(|t| t.id != timer_id);
        Ok(())
    }

    async fn toggle_timer(&self, timer_id: TimerId) -> ApiResult<bool> {
        self.enter(Endpoint::ToggleTimer, timer_id.to_string())
            .await?;
        let mut state = self.lock();
        let stored = state.timer_mut(timer_id)?;
        stored.enabled = !stored.enabled;
        Ok(stored.enabled)
    }
}
