//! jokescroll — a live-updating joke feed for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  channel   ┌──────────┐  draw()  ┌──────────┐
//! │ worker.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (ticker)  │ (listener) │ (state)  │          │ (render) │
//! └───────────┘            └──────────┘          └──────────┘
//!       │                       ▲  ▲
//!       ▼                       │  │ handle_key_event()
//! ┌───────────┐           ┌──────────┐
//! │ source/   │           │ input.rs │
//! │ (fetch)   │           └──────────┘
//! └───────────┘
//! ```
//!
//! * **`list`** — the bounded, oldest-evicted joke list.
//! * **`worker`** — fires on a fixed interval, spawning each fetch as its
//!   own task and delivering successes to a listener.
//! * **`source/`** — the `Source` trait and the HTTP joke API client.
//! * **`store`** — JSON snapshot persistence between runs.
//! * **`app`** — owns all application state (jokes, scroll position, etc.).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`main`** — wires everything together: logging, args, terminal setup,
//!   and the event loop.

mod app;
mod input;
mod list;
mod source;
mod store;
mod ui;
mod worker;

use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use source::{HttpJokeSource, DEFAULT_JOKE_API};
use store::JokeStore;
use worker::PeriodicWorker;

/// How many jokes the list retains before evicting the oldest.
const MAX_JOKES: usize = 10;

/// How often the worker fetches a new joke.
const FETCH_INTERVAL: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.  This prevents the common TUI bug where a panic leaves the
/// terminal in a broken state.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.  Without this, a panic inside the event loop would leave
/// raw mode enabled and the alternate screen active.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log to a file next to the joke store.  Writing to stdout/stderr would
/// corrupt the TUI, so if the file cannot be opened we prefer no logs.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_path = JokeStore::default_path().with_file_name("jokescroll.log");
    let log_file = log_path
        .parent()
        .and_then(|dir| std::fs::create_dir_all(dir).ok())
        .and_then(|()| std::fs::File::create(&log_path).ok());

    match log_file {
        Some(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        None => {
            tracing_subscriber::registry().with(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    install_panic_hook();

    // -- parse arguments -----------------------------------------------------
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_JOKE_API.into());

    // -- restore persisted jokes ---------------------------------------------
    let store = JokeStore::new(JokeStore::default_path());
    let persisted = store.load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring unreadable joke store");
        Vec::new()
    });
    let restored = persisted.len();

    let mut app = App::new(MAX_JOKES, persisted)?;
    if restored > 0 {
        app.status = format!("Restored {restored} jokes");
    }

    // -- start background fetching -------------------------------------------
    // The worker ticks and fetches on the tokio runtime; the UI stays a
    // plain synchronous loop.  The channel is the single point where fetch
    // results cross onto the UI thread, so only this thread ever mutates
    // the joke list.
    let runtime = tokio::runtime::Runtime::new()?;
    let _runtime_guard = runtime.enter();

    let (tx, rx) = mpsc::channel();
    let source = Arc::new(HttpJokeSource::new(&url, "GeekJokes"));
    let mut worker = PeriodicWorker::new(FETCH_INTERVAL, source);
    worker.set_listener(move |joke| {
        // If the receiver is gone the UI has exited; drop the joke.
        let _ = tx.send(joke);
    });
    worker.start();

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Drain any jokes delivered by the worker.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Process fetched jokes
        while let Ok(joke) = rx.try_recv() {
            let from = joke.source_name.clone();
            let evicted = app.push_joke(joke);
            app.status = if evicted {
                format!("New joke from {from} (dropped the oldest)")
            } else {
                format!("New joke from {from}")
            };
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    worker.stop();

    // Restore the terminal before reporting anything about the save.
    drop(guard);

    if let Err(err) = store.save(&app.snapshot()) {
        tracing::error!(error = %err, "failed to save jokes");
        eprintln!("warning: could not save jokes: {err:#}");
    }

    Ok(())
}
