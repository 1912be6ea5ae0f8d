//! Configuration file parsing for Toaster
//!
//! Reads `.toaster/config.toml` under the working directory. A missing or
//! malformed file falls back to defaults.

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, CONFIG_FILENAME, TOASTER_DIR};
pub use types::*;
