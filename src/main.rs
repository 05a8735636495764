//! Terminal lifecycle, event loop, and cleanup for the coin watchlist TUI.

mod actions;
mod app;
mod backend;
mod catalog;
mod config;
mod dismissal;
mod events;
mod fetcher;
mod ranking;
mod selection;
mod services;
mod state;
mod storage;
mod ui;
mod watchlist;

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use backend::BackendClient;
use config::Config;
use dismissal::{MouseCapture, TerminalMouse};
use events::{key_to_action, mouse_to_action, TICK_RATE};
use fetcher::Fetcher;
use storage::FileStore;
use watchlist::WatchlistStore;

fn init_logging(config: &Config) -> Result<()> {
    let path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    // The terminal belongs to the UI, so logs go to a file (RUST_LOG controls the filter).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("coinwatch_tui=info".parse()?))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data directory {}", config.data_dir.display()))?;
    init_logging(&config)?;
    info!(api_url = %config.api_url, vs_currency = %config.vs_currency, "starting");

    let provider = Arc::new(BackendClient::new(config.api_url.clone(), config.timeout));
    let fetcher = Fetcher::new(provider, config.vs_currency.clone())?;
    let store = FileStore::new(config.store_path());
    info!(path = %store.path().display(), "watchlist store");
    let watchlist = WatchlistStore::new(store);
    let mut app = App::new(
        watchlist,
        fetcher,
        Box::new(|| Box::new(TerminalMouse) as Box<dyn MouseCapture>),
    );

    // Set up the terminal in raw / alternate-screen mode. Mouse capture stays
    // off until the dropdown opens.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.show_cursor()?;

    app.bootstrap();

    let result = run_loop(&mut terminal, &mut app, &config.api_url);
    drop(app);

    // Always restore the terminal, even on error.
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen);
    let _ = terminal.show_cursor();
    info!("exiting");

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<FileStore>,
    source: &str,
) -> Result<()> {
    loop {
        app.tick = app.tick.wrapping_add(1);
        app.poll_results();

        if app.should_quit {
            return Ok(());
        }

        let tick = app.tick;
        let frame = terminal.draw(|frame| ui::render(frame, app, source, tick))?;
        app.set_viewport(frame.area);

        if event::poll(TICK_RATE)? {
            let action = match event::read()? {
                Event::Key(key) => key_to_action(&key, app.state.focus),
                Event::Mouse(mouse) => mouse_to_action(&mouse),
                _ => None,
            };
            if let Some(a) = action {
                app.dispatch(a);
                if app.should_quit {
                    return Ok(());
                }
            }
        }
    }
}
