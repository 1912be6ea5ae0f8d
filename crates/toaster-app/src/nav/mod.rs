//! Navigation stacks and the routers that drive them
//!
//! The [`NavigationHost`] owns every stack and, through them, every screen.
//! A [`Router`] is only a stack id: it never keeps a stack alive, and every
//! operation on a released stack is a silent no-op.

mod host;
mod router;

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

pub use host::{NavStack, NavigationHost, ScreenSnapshot, StackSnapshot};
pub use router::Router;

/// Unique identifier for a navigation stack
pub type StackId = u64;

static STACK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a new unique stack ID
pub fn next_stack_id() -> StackId {
    STACK_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Failure,
}

/// Transient toast message shown over a stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Failure,
            message: message.into(),
        }
    }
}
