//! Configuration types for Toaster

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::screens::ScreenConfig;

/// Global application settings from `.toaster/config.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub input: InputSettings,

    #[serde(default)]
    pub backend: BackendSettings,
}

impl Settings {
    /// The knobs handed to every screen's view-model
    pub fn screen_config(&self) -> ScreenConfig {
        ScreenConfig {
            debounce: Duration::from_millis(self.input.debounce_ms),
        }
    }
}

/// Behavior settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Offer a link found on the pasteboard when the app comes to the
    /// foreground
    #[serde(default = "default_true")]
    pub capture_pasteboard: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            capture_pasteboard: true,
        }
    }
}

/// Text input settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputSettings {
    /// Quiet period before a typed clip name or search query is acted on
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// In-memory backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Simulated latency of every backend call
    #[serde(default)]
    pub latency_ms: u64,

    /// Start with demo clips, links and a timer
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            seed_demo_data: true,
        }
    }
}

impl BackendSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    200
}
