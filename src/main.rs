//! knowledge-leaf — random encyclopedia trivia and "on this day" events in
//! the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌────────────┐  Outcome   ┌────────────┐  draw()  ┌──────────┐
//! │ session.rs │ ─────────► │  app.rs    │ ───────► │  ui.rs   │
//! │ (thread)   │  (channel) │ view.rs    │          │ card.rs  │
//! └────────────┘            └────────────┘          └──────────┘
//!       ▲                         ▲
//!       │ fetch()                 │ handle_key_event()
//! ┌────────────┐            ┌──────────┐
//! │ source/    │            │ input.rs │
//! └────────────┘            └──────────┘
//! ```
//!
//! * **`origin`** — derives the API origin from the page host.
//! * **`route`** — user-facing paths and the requests behind them.
//! * **`source/`** — the `DataSource` trait, wire types, and the HTTP source.
//! * **`session`** — one fetch per view instance, with a stale-result guard.
//! * **`navigator`** — paging through a loaded collection; deep links.
//! * **`view`** — a mounted route: its session plus its collection.
//! * **`card`** — presentation model built from items.
//! * **`app`** — owns all application state.
//! * **`ui`** — pure rendering.
//! * **`input`** — maps key events to `App` mutations.
//! * **`main`** — wires everything together: parse args, set up logging and
//!   the terminal, and run the event loop.

mod app;
mod card;
mod config;
mod error;
mod input;
mod navigator;
mod origin;
mod route;
mod session;
mod source;
mod ui;
mod view;

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use config::Config;
use source::{DataSource, HttpSource};

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
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
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send log output to `path`; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_file)?;

    let host = config.host()?;
    let start = config.start_route()?;
    info!("starting at {start} as {}", host.page_origin());

    let source: Arc<dyn DataSource> =
        Arc::new(HttpSource::new(host.clone()).with_api_origin(config.api_origin()));
    let mut app = App::new(host, source, config.edge_policy());
    app.open(start);

    install_panic_hook();
    let mut guard = TerminalGuard::new()?;

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Pick up a finished fetch, if any.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        app.tick();

        guard.terminal.draw(|f| ui::draw(&app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    info!("bye");
    Ok(())
}
