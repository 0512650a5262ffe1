mod api;
mod app;
mod config;
mod models;
mod store;
mod ui;

use std::io;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::time::{Duration, interval};

use api::{Api, ApiClient};
use app::{App, PendingSync, Route, SyncEvent, handle_action, handle_sync_event, trigger_action};
use config::Config;
use store::{SharedStore, actions};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    // Setup terminal
    terminal::enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal).await;

    // Teardown terminal
    terminal::disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Route tracing to the file named by `TESTDECK_LOG`; the terminal itself
/// belongs to the UI, so nothing is logged unless the variable is set.
fn init_logging() {
    let Ok(path) = std::env::var("TESTDECK_LOG") else {
        return;
    };
    let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("testdeck=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = Config::load(&cwd);
    let api: Arc<dyn Api> = Arc::new(ApiClient::new(&config.api)?);

    // An optional path argument deep-links into a view, e.g. `/test-runs/3`.
    let start_route = std::env::args()
        .nth(1)
        .and_then(|path| Route::parse(&path))
        .unwrap_or(Route::Home);

    let (mut app, mut event_rx) = App::new(start_route);
    let mut tick = interval(Duration::from_millis(100));
    let mut event_stream = EventStream::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        // Start whatever navigation or refresh queued up.
        for pending in app.pending_syncs.drain(..) {
            spawn_sync(pending, &app.store, &api, &app.event_tx);
        }

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    None => break,
                    Some(Err(e)) => return Err(e.into()),
                    Some(Ok(Event::Key(key))) => {
                        if let Some(action) = trigger_action(key, app.filter_active) {
                            handle_action(&mut app, action);
                        }
                    }
                    Some(Ok(_)) => {}
                }
            }

            Some(event) = event_rx.recv() => {
                handle_sync_event(&mut app, event);
            }

            _ = tick.tick() => {
                if app.store.lock().unwrap().loading() {
                    app.spinner_tick = app.spinner_tick.wrapping_add(1);
                }
                app.notifier.prune_expired();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Run one sync action on a task of its own; completion is reported back
/// through the app's event channel. Tasks are never cancelled, so a stale
/// response can land after a newer one; the store keeps last-writer-wins
/// semantics either way.
fn spawn_sync(
    pending: PendingSync,
    store: &SharedStore,
    api: &Arc<dyn Api>,
    tx: &mpsc::UnboundedSender<SyncEvent>,
) {
    let store = Arc::clone(store);
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        match pending {
            PendingSync::Suites => actions::fetch_test_suites(&store, api.as_ref()).await,
            PendingSync::Cases => actions::fetch_test_cases(&store, api.as_ref()).await,
            PendingSync::Runs => actions::fetch_test_runs(&store, api.as_ref()).await,
            PendingSync::Run(id) => actions::fetch_test_run(&store, api.as_ref(), id).await,
            PendingSync::Results { test_run_id } => {
                actions::fetch_test_case_results(&store, api.as_ref(), test_run_id).await
            }
            PendingSync::Templates => {
                actions::fetch_test_run_templates(&store, api.as_ref()).await
            }
        }
        let _ = tx.send(SyncEvent::Finished(pending));
    });
}
