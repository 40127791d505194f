#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use anyhow::Context;
use blockfall::app::{App, AppResult};
use blockfall::config::{Config, loader};
use blockfall::systems::command_for_key;
use blockfall::ui;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it
    let log_path = "blockfall.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("failed to create {log_path}"))?;

    // Safety: dup2 on two valid descriptors owned by this process
    unsafe {
        libc::dup2(log_file.as_raw_fd(), io::stderr().as_raw_fd());
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting blockfall");

    let config = match loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(33); // ~30 FPS
    let app = App::new(&config);
    let res = run_app(&mut terminal, app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> AppResult<()> {
    // Flush anything typed before the game started
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        let timeout = tick_rate.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    debug!("Key event: {key:?}");
                    if let Some(command) = command_for_key(key.code) {
                        app.push(command);
                    }
                }
            }
        }

        if last_frame.elapsed() >= tick_rate {
            last_frame = Instant::now();
            app.on_tick();
        } else {
            // Apply key presses right away; gravity catches up next frame
            app.update(Duration::ZERO);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
