//! Headless mode - NDJSON in, NDJSON out
//!
//! Commands arrive on stdin, one JSON object per line. Navigation events and
//! replies go to stdout, also one JSON object per line, each stamped with a
//! millisecond timestamp.
//!
//! # Commands
//!
//! ```json
//! {"cmd":"act","screen":12,"action":{"kind":"home","action":{"type":"open_setting"}}}
//! {"cmd":"act","action":{"kind":"setting","action":{"type":"back"}}}
//! {"cmd":"tree"}
//! {"cmd":"foreground"}
//! {"cmd":"quit"}
//! ```
//!
//! `act` without a `screen` targets the visible screen.
//!
//! # Example Output
//!
//! ```json
//! {"event":"flow_started","flow":1,"kind":"app","timestamp":1704700001000}
//! {"event":"screen_shown","screen":3,"kind":"tab_bar","stack":1,"flow":2,"animated":false,"timestamp":1704700001000}
//! {"event":"banner","stack":1,"banner":{"kind":"success","message":"Link saved"},"timestamp":1704700002000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use toaster_app::nav::StackSnapshot;
use toaster_app::{ScreenAction, ScreenId, ScreenKind};
use tracing::error;

/// A line read from stdin
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    Act {
        #[serde(default)]
        screen: Option<ScreenId>,
        action: ScreenAction,
    },
    Tree,
    Foreground,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> toaster_core::Result<Self> {
        serde_json::from_str(line)
            .map_err(|e| toaster_core::Error::command(format!("{}: {}", e, line)))
    }
}

/// Events only the headless driver produces
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The root flow started
    Ready { logged_in: bool },

    /// Reply to `tree`
    Tree {
        root: Option<StackSnapshot>,
        visible: Option<VisibleScreen>,
    },

    /// A command could not be carried out
    Error { message: String, fatal: bool },
}

#[derive(Debug, Clone, Serialize)]
pub struct VisibleScreen {
    pub screen: ScreenId,
    pub kind: ScreenKind,
}

impl HeadlessEvent {
    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
        }
    }

    pub fn emit(&self) {
        emit(self);
    }
}

/// One output line: the event's own fields plus a timestamp
#[derive(Serialize)]
struct Stamped<'a, T> {
    #[serde(flatten)]
    event: &'a T,
    timestamp: i64,
}

/// Write `event` to stdout as one NDJSON line
pub fn emit<T: Serialize>(event: &T) {
    let line = Stamped {
        event,
        timestamp: Utc::now().timestamp_millis(),
    };
    let json = match serde_json::to_string(&line) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize headless event: {}", e);
            return;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", json) {
        error!("Failed to write headless event to stdout: {}", e);
        return;
    }
    if let Err(e) = stdout.flush() {
        error!("Failed to flush headless stdout: {}", e);
    }
}
