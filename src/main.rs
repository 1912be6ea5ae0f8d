//! Toaster - headless driver for the link-saving client core
//!
//! This is the binary entry point. Navigation logic lives in `toaster-app`.

mod headless;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use toaster_api::{FileCredentialStore, MemoryApi, MemoryPasteboard, SystemPasteboard};
use toaster_app::config::{init_config_dir, load_settings};
use toaster_app::Engine;
use toaster_core::{logging, AuthTokens, CredentialStore, Pasteboard};
use tracing::info;

/// Toaster - drive the navigation core over NDJSON on stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "toaster")]
#[command(about = "Headless driver for the Toaster client core", long_about = None)]
struct Args {
    /// Directory holding `.toaster/config.toml`
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Start with a stored session instead of on the login screen
    #[arg(long)]
    logged_in: bool,

    /// Write a default config file before starting
    #[arg(long)]
    init: bool,

    /// Read links from an in-memory pasteboard instead of the system clipboard
    #[arg(long)]
    no_clipboard: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    logging::init()?;

    let base_path = args
        .path
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if args.init {
        init_config_dir(&base_path)?;
    }
    let settings = load_settings(&base_path);

    let api = if settings.backend.seed_demo_data {
        MemoryApi::seeded()
    } else {
        MemoryApi::new()
    }
    .with_latency(settings.backend.latency());

    let mut credentials = FileCredentialStore::in_data_dir();
    if args.logged_in && credentials.load()?.is_none() {
        info!("Seeding a stored session");
        credentials.save(&AuthTokens {
            access_token: "headless-access".to_string(),
            refresh_token: "headless-refresh".to_string(),
        })?;
    }

    let pasteboard: Box<dyn Pasteboard> = if args.no_clipboard {
        Box::new(MemoryPasteboard::new())
    } else {
        Box::new(SystemPasteboard)
    };

    let engine = Engine::new(Arc::new(api), Box::new(credentials), pasteboard, settings);
    headless::runner::run_headless(engine).await?;
    Ok(())
}
