//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "toaster.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/toaster/logs/` (or the platform
/// equivalent). Stdout stays reserved for headless NDJSON output.
/// Log level is controlled by the `TOASTER_LOG` environment variable.
///
/// # Examples
/// ```bash
/// TOASTER_LOG=debug toaster
/// TOASTER_LOG=toaster_app::nav=trace toaster
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    // Default to info for our crates, warn for everything else
    let env_filter = EnvFilter::try_from_env("TOASTER_LOG")
        .unwrap_or_else(|_| EnvFilter::new("toaster=info,toaster_app=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Toaster starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Root of the per-user data directory (`<data_local_dir>/toaster`)
pub fn data_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toaster")
}

fn get_log_directory() -> PathBuf {
    data_directory().join("logs")
}
