//! `Taskdeck` — terminal client for a REST task store.
//!
//! Launches the TUI against the store at `--base-url` (default
//! `http://localhost:5000`). Configuration via CLI flags, environment
//! variables, or config file (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Remote store
//! cargo run --bin taskdeck -- --base-url http://127.0.0.1:5000
//!
//! # Or via environment variables
//! TASKDECK_API_URL=http://127.0.0.1:5000 cargo run
//!
//! # In-memory demo store
//! cargo run --bin taskdeck -- --offline
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::controller::ControllerState;
use taskdeck::net::{self, NetCommand};
use taskdeck::store::http::HttpTaskStore;
use taskdeck::store::memory::InMemoryTaskStore;
use taskdeck::store::{StoreCommand, StoreEvent, TaskStore};
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::from_cli(&cli)
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(base_url = %config.base_url, offline = config.offline, "taskdeck starting");

    let result = if config.offline {
        run(Arc::new(InMemoryTaskStore::new()), &config).await
    } else {
        match HttpTaskStore::new(&config.base_url) {
            Ok(store) => run(Arc::new(store), &config).await,
            Err(e) => {
                tracing::error!(error = %e, "cannot create store client");
                eprintln!("Error: {e}");
                Err(io::Error::other(e))
            }
        }
    };

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
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

/// Set up the terminal, run the app, and restore the terminal.
async fn run<S>(store: Arc<S>, config: &ClientConfig) -> io::Result<()>
where
    S: TaskStore + 'static,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, store, config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main application loop.
async fn run_app<S>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: Arc<S>,
    config: &ClientConfig,
) -> io::Result<()>
where
    S: TaskStore + 'static,
{
    let mut app = App::new(
        ControllerState::new(config.notice_duration),
        store.describe(),
    );
    let (cmd_tx, mut evt_rx) = net::spawn_worker(store, config.channel_capacity);

    // Initial load of the task list.
    dispatch(&cmd_tx, StoreCommand::List);

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Apply every store response that has arrived (non-blocking).
        drain_store_events(&mut app, &mut evt_rx);

        // Step 3: Expire notices.
        app.tick(Instant::now());

        // Step 4: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(command) = app.handle_key_event(key) {
                dispatch(&cmd_tx, command);
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(NetCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Hand a store request to the worker without blocking the UI.
fn dispatch(tx: &mpsc::Sender<NetCommand>, command: StoreCommand) {
    match tx.try_send(NetCommand::Request(command)) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(cmd)) => {
            tracing::warn!(?cmd, "store worker busy, request dropped");
        }
        Err(mpsc::error::TrySendError::Closed(cmd)) => {
            tracing::warn!(?cmd, "store worker stopped, request dropped");
        }
    }
}

/// Drain all pending `StoreEvent`s from the receiver and apply them to the app.
fn drain_store_events(app: &mut App, rx: &mut mpsc::Receiver<StoreEvent>) {
    while let Ok(event) = rx.try_recv() {
        app.apply_event(event);
    }
}
