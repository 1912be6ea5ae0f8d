//! Backend contract consumed by the view-models
//!
//! Every call resolves to one of five outcomes: success, or one of the four
//! [`ApiFailure`] kinds. Transport and DTO decoding live behind the trait.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AuthTokens, ClipId, ClipList, ClipRename, ClipScope, ClipSummary, HomeSummary, NewTimer,
    PriorityChange, ReadFilter, RecommendedSite, SearchResults, SocialProvider, Timer, TimerBoard,
    TimerId, Toast, ToastId, ToastPage, WeeklyLink,
};

/// Failure half of the five-way result contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFailure {
    #[error("request rejected by server")]
    BadRequest,

    #[error("server error")]
    ServerError,

    #[error("session is no longer authorized")]
    Unauthorized,

    #[error("network unavailable")]
    NetworkFail,

    #[error("resource not found")]
    NotFound,
}

impl ApiFailure {
    pub const ALL: [ApiFailure; 5] = [
        ApiFailure::BadRequest,
        ApiFailure::ServerError,
        ApiFailure::Unauthorized,
        ApiFailure::NetworkFail,
        ApiFailure::NotFound,
    ];

    /// Failures a screen can show and recover from
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ApiFailure::BadRequest | ApiFailure::ServerError)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiFailure>;

/// Toaster service operations
///
/// Arguments are owned so the returned futures can move onto tokio tasks.
#[trait_variant::make(ToasterApi: Send)]
pub trait LocalToasterApi {
    // ─────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────
    async fn login(&self, provider: SocialProvider, social_token: String) -> ApiResult<AuthTokens>;
    async fn logout(&self) -> ApiResult<()>;
    async fn withdraw(&self) -> ApiResult<()>;

    // ─────────────────────────────────────────────────────────
    // Home
    // ─────────────────────────────────────────────────────────
    async fn main_page(&self) -> ApiResult<HomeSummary>;
    async fn recent_toasts(&self) -> ApiResult<Vec<Toast>>;
    async fn weekly_links(&self) -> ApiResult<Vec<WeeklyLink>>;
    async fn recommended_sites(&self) -> ApiResult<Vec<RecommendedSite>>;

    // ─────────────────────────────────────────────────────────
    // Clips
    // ─────────────────────────────────────────────────────────
    async fn all_clips(&self) -> ApiResult<ClipList>;
    /// `true` when a clip with this title already exists
    async fn check_clip_name(&self, title: String) -> ApiResult<bool>;
    async fn add_clip(&self, title: String) -> ApiResult<ClipSummary>;
    async fn delete_clip(&self, clip_id: ClipId) -> ApiResult<()>;
    async fn rename_clip(&self, rename: ClipRename) -> ApiResult<()>;
    async fn reorder_clip(&self, change: PriorityChange) -> ApiResult<()>;

    // ─────────────────────────────────────────────────────────
    // Toasts
    // ─────────────────────────────────────────────────────────
    async fn clip_toasts(&self, scope: ClipScope, filter: ReadFilter) -> ApiResult<ToastPage>;
    async fn save_link(&self, url: String, clip_id: Option<ClipId>) -> ApiResult<()>;
    /// Flips the read flag and returns the new value
    async fn toggle_read(&self, toast_id: ToastId) -> ApiResult<bool>;
    async fn delete_toast(&self, toast_id: ToastId) -> ApiResult<()>;
    async fn rename_toast(&self, toast_id: ToastId, title: String) -> ApiResult<()>;
    async fn move_toast(&self, toast_id: ToastId, clip_id: ClipId) -> ApiResult<()>;
    async fn search(&self, query: String) -> ApiResult<SearchResults>;

    // ─────────────────────────────────────────────────────────
    // Reminder timers
    // ─────────────────────────────────────────────────────────
    async fn timers(&self) -> ApiResult<TimerBoard>;
    async fn add_timer(&self, timer: NewTimer) -> ApiResult<Timer>;
    async fn edit_timer(&self, timer_id: TimerId, timer: NewTimer) -> ApiResult<()>;
    async fn delete_timer(&self, timer_id: TimerId) -> ApiResult<()>;
    /// Flips the enabled flag and returns the new value
    async fn toggle_timer(&self, timer_id: TimerId) -> ApiResult<bool>;
}

/// A backend that can be shared across view-model tasks
pub trait Backend: ToasterApi + Sync + 'static {}

impl<T: ToasterApi + Sync + 'static> Backend for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_bad_request_and_server_error_are_recoverable() {
        let recoverable: Vec<_> = ApiFailure::ALL
            .iter()
            .filter(|f| f.is_recoverable())
            .collect();
        assert_eq!(
            recoverable,
            vec![&ApiFailure::BadRequest, &ApiFailure::ServerError]
        );
    }

    #[test]
    fn test_failure_serializes_snake_case() {
        let json = serde_json::to_string(&ApiFailure::NetworkFail).unwrap();
        assert_eq!(json, "\"network_fail\"");
    }
}
