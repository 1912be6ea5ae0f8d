//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
///
/// Backend failures never show up here: they travel as [`crate::api::ApiFailure`]
/// and are resolved inside the view-models. This enum covers the
/// infrastructure around the navigation core.
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Platform Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Credential store error: {message}")]
    Credentials { message: String },

    #[error("Pasteboard unavailable: {message}")]
    Pasteboard { message: String },

    // ─────────────────────────────────────────────────────────────
    // Headless Driver Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid command: {message}")]
    Command { message: String },

    #[error("No screen with id {id}")]
    UnknownScreen { id: u64 },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }

    pub fn pasteboard(message: impl Into<String>) -> Self {
        Self::Pasteboard {
            message: message.into(),
        }
    }

    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }

    /// Check if this error should trigger application exit
    ///
    /// A bad command or a missing screen only costs the one command; a
    /// broken config or filesystem does not go away on retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Config { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
