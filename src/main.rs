#![warn(clippy::all, clippy::pedantic)]

use std::fs::File;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use blockfall::app::App;
use blockfall::config::Config;
use blockfall::input::CrosstermKeys;
use blockfall::ui;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> Result<()> {
    let config = Config::default();
    init_logging(&config);

    info!("Starting blockfall");
    let mut app = App::new(config);

    // Terminal initialization
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }

    println!("\n{}", app.summary());
    res
}

// Logs go to a file so they never land on the game screen
fn init_logging(config: &Config) {
    let log_file = match File::create(&config.log_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!(
                "Could not create log file {}: {err}",
                config.log_path.display()
            );
            return;
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut keys = CrosstermKeys;

    // Drop anything typed before the game started
    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }

    loop {
        app.tick(&mut keys, Instant::now())
            .context("failed to read keyboard input")?;
        if app.should_quit {
            info!("Quit requested");
            return Ok(());
        }

        terminal
            .draw(|f| ui::render(f, &app.session))
            .context("failed to draw frame")?;

        thread::sleep(app.config.tick_rate);
    }
}
