//! Message types for the engine loop

use crate::flow::{FlowEvent, FlowId};
use crate::screens::{ScreenAction, ScreenId, ScreenUpdate};

/// Everything the engine reacts to
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Screens
    // ─────────────────────────────────────────────────────────
    /// User input on a screen
    ScreenAction {
        screen: ScreenId,
        action: ScreenAction,
    },

    /// A view-model output for its screen
    ScreenUpdate {
        screen: ScreenId,
        update: ScreenUpdate,
    },

    // ─────────────────────────────────────────────────────────
    // Flows
    // ─────────────────────────────────────────────────────────
    /// Deliver an event to one flow, typically a transition completion
    Flow { flow: FlowId, event: FlowEvent },

    /// A backend call on `screen` was rejected as unauthorized
    SessionExpired { screen: ScreenId },

    // ─────────────────────────────────────────────────────────
    // App lifecycle
    // ─────────────────────────────────────────────────────────
    /// The app came back to the foreground
    Foreground,

    Quit,
}
