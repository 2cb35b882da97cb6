use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use holdem_equity::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

const LOG_FILE: &str = "holdem-equity.log";

/// Debug logging into a file; the terminal belongs to the UI.
fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = match std::fs::File::create(LOG_FILE) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("logging disabled: cannot create {LOG_FILE}: {err}");
            return;
        }
    };
    if let Err(err) = simplelog::WriteLogger::init(log::LevelFilter::Debug, config, file) {
        eprintln!("logging disabled: {err}");
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "holdem-equity requires a real terminal (TTY).\nRun it in a terminal and press q to quit. Version: {}",
            holdem_equity::VERSION
        );
        return Ok(());
    }
    log();
    log::info!("holdem-equity {} starting", holdem_equity::VERSION);
    let mut terminal = setup_terminal()?;
    let mut app = AppState::default();

    let res = controller::run(&mut terminal, &mut app, Duration::from_millis(250));

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
