use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    loop {
        let _ = app.poll_calculation();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, key.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Apply one key press; returns `true` when the app should quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if app.help_open() {
        if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if matches!(code, KeyCode::F(1)) {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }

    match app.scene {
        Scene::Form => match code {
            KeyCode::Up | KeyCode::BackTab => {
                let _ = app.handle_input(InputAction::FormPrev);
            }
            KeyCode::Down | KeyCode::Tab => {
                let _ = app.handle_input(InputAction::FormNext);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::Calculate);
            }
            KeyCode::Backspace => {
                let _ = app.handle_input(InputAction::FormBackspace);
            }
            KeyCode::Delete => {
                let _ = app.handle_input(InputAction::FormClear);
            }
            KeyCode::Esc => return true,
            KeyCode::Char(c) if app.form_field_is_text() => {
                let _ = app.handle_input(InputAction::FormChar(c));
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                let _ = app.handle_input(InputAction::FormInc);
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => {
                let _ = app.handle_input(InputAction::FormDec);
            }
            KeyCode::Char('?') => {
                let _ = app.handle_input(InputAction::ToggleHelp);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Calculating => match code {
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => {
                let _ = app.handle_input(InputAction::Cancel);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                let _ = app.handle_input(InputAction::Cancel);
                return true;
            }
            _ => {}
        },
        Scene::Results => match code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                let _ = app.handle_input(InputAction::TabNext);
            }
            KeyCode::Esc | KeyCode::Char('e') | KeyCode::Char('E') => {
                let _ = app.handle_input(InputAction::BackToForm);
            }
            KeyCode::Char('?') => {
                let _ = app.handle_input(InputAction::ToggleHelp);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
    }
    false
}
