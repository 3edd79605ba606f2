//! Skyboard Config - keybind configurator for the Skyboard macro keypad.
//!
//! Features:
//! - Per-key keybinds with Minecraft debug presets
//! - JSON save/load (`hackpad_config.json` by default)
//! - CircuitPython firmware export (`code.py`)

mod app;
mod config;
mod logging;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skyboard_core::DEFAULT_CONFIG_FILE;
use std::{env, io, path::PathBuf, time::Duration};

fn main() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    logging::init();
    tracing::info!(path = %config_path.display(), "Starting Skyboard Config");

    let mut app = App::new(config_path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Exited with error");
    }
    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.can_quit() && !app.show_quit_confirm && key.code == KeyCode::Char('q') {
                    if app.modified {
                        app.show_quit_confirm = true;
                    } else {
                        return Ok(());
                    }
                } else if app.show_quit_confirm {
                    match key.code {
                        KeyCode::Char('y') => return Ok(()),
                        KeyCode::Char('n') | KeyCode::Esc => {
                            app.show_quit_confirm = false;
                        }
                        _ => {}
                    }
                } else {
                    app.handle_key(key);
                }
            }
        }
    }
}
