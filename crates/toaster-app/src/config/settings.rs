//! Settings loading and the default config file

use std::path::Path;

use toaster_core::prelude::*;

use super::types::Settings;

pub const TOASTER_DIR: &str = ".toaster";
pub const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# Toaster Configuration

[behavior]
capture_pasteboard = true   # Offer a copied link when the app comes back

[input]
debounce_ms = 200           # Delay before clip names and searches are checked

[backend]
latency_ms = 0              # Simulated latency of the in-memory backend
seed_demo_data = true       # Start with demo clips and links
"#;

/// Load settings from `.toaster/config.toml`
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = project_path.join(TOASTER_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create `.toaster/config.toml` with commented defaults, unless it exists
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let toaster_dir = project_path.join(TOASTER_DIR);

    if !toaster_dir.exists() {
        std::fs::create_dir_all(&toaster_dir)
            .map_err(|e| Error::config(format!("Failed to create .toaster dir: {}", e)))?;
    }

    let config_path = toaster_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}
