//! Engine events broadcast to observers (the headless driver, tests)

use serde::Serialize;

use crate::flow::{FlowId, FlowKind};
use crate::nav::{Banner, StackId};
use crate::screens::{ScreenId, ScreenKind};

/// Something observable happened in the navigation tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    ScreenShown {
        screen: ScreenId,
        kind: ScreenKind,
        stack: StackId,
        flow: Option<FlowId>,
        animated: bool,
    },
    ScreenRemoved {
        screen: ScreenId,
        kind: ScreenKind,
    },
    Presented {
        stack: StackId,
        over: StackId,
    },
    Dismissed {
        stack: StackId,
    },
    FlowStarted {
        flow: FlowId,
        kind: FlowKind,
    },
    FlowFinished {
        flow: FlowId,
        kind: FlowKind,
    },
    Banner {
        stack: StackId,
        banner: Banner,
    },
    SessionExpired,
}

impl EngineEvent {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::ScreenShown { .. } => "screen_shown",
            Self::ScreenRemoved { .. } => "screen_removed",
            Self::Presented { .. } => "presented",
            Self::Dismissed { .. } => "dismissed",
            Self::FlowStarted { .. } => "flow_started",
            Self::FlowFinished { .. } => "flow_finished",
            Self::Banner { .. } => "banner",
            Self::SessionExpired => "session_expired",
        }
    }
}
