//! # toaster-core - Core Domain Types
//!
//! Foundation crate for Toaster. Provides the domain records, the backend
//! contract, the platform collaborator traits, error handling and logging.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing, trait-variant).
//!
//! ## Public API
//!
//! ### Domain Types (`models`)
//! - [`ClipSummary`], [`ClipList`], [`SelectableClip`] - Clips and clip pickers
//! - [`Toast`], [`ToastPage`] - Saved links
//! - [`ClipScope`], [`ReadFilter`] - Listing filters
//! - [`Timer`], [`TimerBoard`], [`NewTimer`] - Reminder timers
//!
//! ### Backend Contract (`api`)
//! - [`ToasterApi`] - Async service operations (`Send` futures)
//! - [`ApiFailure`], [`ApiResult`] - The five-way result contract
//! - [`Backend`] - `ToasterApi` that can be shared across tasks
//!
//! ### Platform (`platform`)
//! - [`CredentialStore`] - Session token persistence
//! - [`Pasteboard`] - Read-and-clear URL source
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use toaster_core::prelude::*;
//! ```

pub mod api;
pub mod error;
pub mod logging;
pub mod models;
pub mod platform;

/// Prelude for common imports used throughout all Toaster crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use api::{ApiFailure, ApiResult, Backend, LocalToasterApi, ToasterApi};
pub use error::{Error, Result, ResultExt};
pub use models::{
    AuthTokens, ClipId, ClipList, ClipRename, ClipScope, ClipSummary, HomeSummary, NameCheck,
    NewTimer, PriorityChange, ReadFilter, RecommendedSite, SearchResults, SelectableClip,
    SocialProvider, Timer, TimerBoard, TimerId, Toast, ToastId, ToastPage, WeeklyLink, Weekday,
    ALL_CLIPS_ID, ALL_CLIPS_TITLE, MAX_CLIP_TITLE_CHARS,
};
pub use platform::{is_link, CredentialStore, Pasteboard};
