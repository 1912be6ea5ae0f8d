//! Headless mode runner - the engine loop fed from stdin
//!
//! A blocking thread parses stdin lines into [`Command`]s; the async loop
//! interleaves them with the engine's own queue and writes every engine
//! event to stdout after each step.

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use toaster_app::{Engine, Message, ScreenAction, ScreenId};
use toaster_core::prelude::*;

use super::{emit, Command, HeadlessEvent, VisibleScreen};

/// Run the engine until `quit` or end of input
pub async fn run_headless(mut engine: Engine) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Toaster starting in HEADLESS mode");
    info!("═══════════════════════════════════════════════════════");

    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(cmd_tx);
    });

    engine.start();
    HeadlessEvent::Ready {
        logged_in: engine.is_logged_in(),
    }
    .emit();
    flush_events(&mut engine);

    let result = headless_event_loop(&mut engine, &mut cmd_rx).await;

    info!("Toaster headless mode exiting");
    result
}

async fn headless_event_loop(
    engine: &mut Engine,
    commands: &mut mpsc::UnboundedReceiver<Command>,
) -> Result<()> {
    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    info!("Stdin closed");
                    break;
                };
                if !apply_command(engine, command) {
                    break;
                }
            }
            Some(message) = engine.next_message() => {
                if !engine.process(message) {
                    break;
                }
            }
        }
        flush_events(engine);
    }
    flush_events(engine);
    Ok(())
}

/// Carry out one command. Returns `false` on quit.
fn apply_command(engine: &mut Engine, command: Command) -> bool {
    match command {
        Command::Act { screen, action } => {
            if let Err(e) = act(engine, screen, action) {
                warn!("{}", e);
                HeadlessEvent::error(e.to_string(), e.is_fatal()).emit();
            }
            true
        }
        Command::Tree => {
            HeadlessEvent::Tree {
                root: engine.snapshot(),
                visible: engine.visible_screen().map(|s| VisibleScreen {
                    screen: s.id(),
                    kind: s.kind(),
                }),
            }
            .emit();
            true
        }
        Command::Foreground => engine.process(Message::Foreground),
        Command::Quit => {
            info!("Quit requested");
            false
        }
    }
}

fn act(engine: &mut Engine, screen: Option<ScreenId>, action: ScreenAction) -> Result<()> {
    let target = match screen {
        Some(id) => {
            if engine.host().screen(id).is_none() {
                return Err(Error::UnknownScreen { id });
            }
            id
        }
        None => engine
            .visible_screen()
            .map(|s| s.id())
            .ok_or_else(|| Error::command("no visible screen"))?,
    };
    engine.act(target, action);
    Ok(())
}

fn flush_events(engine: &mut Engine) {
    for event in engine.drain_events() {
        emit(&event);
    }
}

/// Parse stdin lines into commands until end of input or `quit`
fn spawn_stdin_reader_blocking(cmd_tx: mpsc::UnboundedSender<Command>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match Command::parse(trimmed) {
            Ok(command) => {
                let quit = command == Command::Quit;
                if cmd_tx.send(command).is_err() || quit {
                    break;
                }
            }
            Err(e) => {
                warn!("{}", e);
                HeadlessEvent::error(e.to_string(), false).emit();
            }
        }
    }

    info!("Stdin reader exiting");
}
