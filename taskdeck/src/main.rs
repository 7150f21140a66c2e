//! `TaskDeck`: terminal client for a remote task-management API.
//!
//! Launches the TUI against the task API at `--base-url` (or the config
//! file, or `http://localhost:8000`). Configuration via CLI flags,
//! environment variables, or config file (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Against a local API server
//! cargo run --bin taskdeck
//!
//! # Against another server
//! cargo run --bin taskdeck -- --base-url http://tasks.internal:8000
//!
//! # Offline demo with seeded tasks
//! cargo run --bin taskdeck -- --offline
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::api::TaskRepository;
use taskdeck::api::http::HttpTaskRepository;
use taskdeck::api::memory::InMemoryRepository;
use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig, ConfigError};
use taskdeck::sync::{self, SyncCommand, SyncEvent};
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let (config, file_error) =
        ClientConfig::load_or_skip_file(&cli).map_err(io::Error::other)?;

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(base_url = %config.base_url, offline = config.offline, "taskdeck starting");
    if let Some(e) = &file_error {
        tracing::warn!(error = %e, "config file ignored");
    }

    // Build the repository before touching the terminal so errors print plainly.
    let http_repo = if config.offline {
        None
    } else {
        Some(HttpTaskRepository::new(&config.base_url).map_err(io::Error::other)?)
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = match http_repo {
        Some(repo) => {
            let app =
                build_app(&config, file_error.as_ref()).with_endpoint(repo.base_url().as_str());
            run_app(&mut terminal, app, Arc::new(repo), &config).await
        }
        None => {
            let app = build_app(&config, file_error.as_ref());
            run_app(&mut terminal, app, Arc::new(InMemoryRepository::seeded()), &config).await
        }
    };

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Send `tracing` output to a log file; the terminal belongs to ratatui.
///
/// `RUST_LOG` wins over `level` when set. The returned guard flushes the
/// background writer on drop, so `main` keeps it alive until exit. Returns
/// `None` (logging disabled) when the path has no usable file name.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let log_path = file_path.map_or_else(
        || std::env::temp_dir().join("taskdeck.log"),
        Path::to_path_buf,
    );
    let dir = log_path.parent()?;
    let name = log_path.file_name()?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();

    Some(guard)
}

fn build_app(config: &ClientConfig, file_error: Option<&ConfigError>) -> App {
    let mut app = App::new()
        .with_max_task_title_len(config.max_task_title_len)
        .with_timestamp_format(config.timestamp_format.clone());
    if let Some(e) = file_error {
        app.notice = Some(format!("Config file ignored: {e}"));
    }
    app
}

/// Main application loop.
async fn run_app<R>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    repo: Arc<R>,
    config: &ClientConfig,
) -> io::Result<()>
where
    R: TaskRepository + 'static,
{
    let (cmd_tx, mut evt_rx) = sync::spawn_sync(repo, config.channel_capacity);

    let initial = app.start();
    dispatch(&mut app, &cmd_tx, initial);

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

            // handle_key_event returns Some(SyncCommand) when the key
            // needs a request against the task API.
            if let Some(cmd) = app.handle_key_event(key) {
                dispatch(&mut app, &cmd_tx, cmd);
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(SyncCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Hand a command to the sync worker without blocking the draw loop.
fn dispatch(app: &mut App, tx: &mpsc::Sender<SyncCommand>, cmd: SyncCommand) {
    match tx.try_send(cmd) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(cmd)) => {
            tracing::warn!(?cmd, "sync channel full; request dropped");
            app.report_unsent(&cmd);
        }
        Err(mpsc::error::TrySendError::Closed(cmd)) => {
            tracing::error!(?cmd, "sync worker stopped");
            app.notice = Some("Background worker stopped; restart TaskDeck.".to_string());
        }
    }
}

/// Drain all pending `SyncEvent`s from the receiver and apply them to the app.
fn drain_sync_events(app: &mut App, rx: &mut mpsc::Receiver<SyncEvent>) {
    while let Ok(event) = rx.try_recv() {
        app.apply_event(event);
    }
}
