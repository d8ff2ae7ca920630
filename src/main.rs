#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use anyhow::Context;
use blocktris::Time;
use blocktris::app::{App, AppResult};
use blocktris::config::{self, Config};
use blocktris::ui;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // The logger needs the config, so load it before anything can be logged
    let (config, config_error) = match config::loader::load_config_from_file() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config)?;
    info!("Starting blocktris");

    match config_error {
        None => info!("Configuration loaded successfully"),
        Some(e) => error!("Failed to load configuration, using defaults: {e}"),
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let frame_duration = config.display.frame_duration();
    let app = App::new(config);
    let res = run_app(&mut terminal, app, frame_duration);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }

    info!("Exiting blocktris");
    Ok(())
}

/// Sends log output to the configured file. The terminal is in raw mode
/// while the game runs, so stderr is redirected there as well.
fn init_logging(config: &Config) -> AppResult<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.logging.file)
        .with_context(|| format!("failed to create log file {}", config.logging.file))?;

    let stderr_fd = io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .format_timestamp(None)
    .format_module_path(false)
    .init();

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    frame_duration: Duration,
) -> AppResult<()> {
    let mut time = Time::new();

    // Drop any keys pressed before the game started
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        let frame_start = Instant::now();

        time.update();
        app.on_tick(time.delta_millis());

        if app.should_quit {
            return Ok(());
        }

        terminal.draw(|f| ui::render(f, &app))?;

        // Collect input until the next frame is due
        let mut remaining = frame_duration.saturating_sub(frame_start.elapsed());
        while event::poll(remaining)? {
            if let Event::Key(key) = event::read()? {
                app.on_key(key);
            }
            remaining = frame_duration.saturating_sub(frame_start.elapsed());
            if remaining.is_zero() {
                break;
            }
        }
    }
}
