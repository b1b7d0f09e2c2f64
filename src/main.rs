use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use simple_logger::SimpleLogger;
use std::io;

mod app;
mod calculator;
mod config;
mod error;
mod inputs;
mod ui;

use app::App;
use config::Settings;

fn main() -> Result<()> {
    let settings = Settings::load()?;
    init_logging(&settings)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(settings);
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Logs go to stderr, so only turn them on when a level is configured and
/// stderr is redirected away from the terminal.
fn init_logging(settings: &Settings) -> Result<()> {
    if let Some(level) = settings.log_level_for(io::stderr().is_tty())? {
        SimpleLogger::new()
            .with_level(level)
            .init()
            .context("initializing logger")?;
        log::info!("logging at {}", level);
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // windows reports releases too
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}
