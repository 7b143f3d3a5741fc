//! `TermTodo` — terminal-native task list manager.
//!
//! Launches the TUI and syncs the task list against an HTTP persistence
//! service, or a local file when no backend is configured. Configuration
//! via CLI flags, environment variables, or config file
//! (`~/.config/termtodo/config.toml`).
//!
//! ```bash
//! # Local file-backed store
//! cargo run --bin termtodo
//!
//! # Sync against the persistence service
//! cargo run --bin termtodo -- --backend-url http://127.0.0.1:5000
//!
//! # Or via environment variables
//! TERMTODO_BACKEND_URL=http://127.0.0.1:5000 cargo run
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use termtodo::app::App;
use termtodo::config::{CliArgs, ClientConfig};
use termtodo::net::{self, SyncCommand, SyncEvent};
use termtodo::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > env > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("termtodo starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("termtodo exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("termtodo.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
) -> io::Result<()> {
    let store_label = if config.backend_url.is_some() {
        "Remote"
    } else {
        "Local"
    };
    let mut app = App::new(store_label).with_timestamp_format(&config.timestamp_format);

    let (cmd_tx, mut evt_rx) = net::spawn_sync(config.to_sync_config());

    // Kick off the initial load.
    app.list.begin_load();
    let _ = cmd_tx.try_send(SyncCommand::Load);

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending SyncEvents (non-blocking).
        drain_sync_events(&mut app, &mut evt_rx);

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event applies the mutation to local state and
            // returns Some(SyncCommand) when it must also be persisted.
            if let Some(cmd) = app.handle_key_event(key) {
                match cmd_tx.try_send(cmd) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        app.set_status("Sync busy, change not persisted".to_string());
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        app.set_status("Sync task stopped".to_string());
                    }
                }
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(SyncCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Drain all pending `SyncEvent`s from the receiver and apply them to the app.
fn drain_sync_events(app: &mut App, rx: &mut mpsc::Receiver<SyncEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            SyncEvent::Loaded(tasks) => {
                app.list.finish_load(Ok(tasks));
            }
            SyncEvent::LoadFailed(error) => {
                app.list.finish_load(Err(error));
            }
            SyncEvent::PersistFailed { op, error } => {
                app.list.record_sync_failure(op, &error);
            }
            SyncEvent::Suggestions { id, items } => {
                app.apply_suggestions(&id, items);
            }
        }
    }
}
