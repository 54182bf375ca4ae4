//! querypad - an embeddable, schema-aware SQL editor widget
//!
//! Demo entry point: runs the widget standalone in a terminal, standing in
//! for the host application. The actual logic lives in the library
//! modules for testability.

use std::fs;
use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use querypad::app::{Action, App, AppEvent};
use querypad::config;
use querypad::ui::render::render;

/// An embeddable, schema-aware SQL editor widget for the terminal
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// SQL file to open in the editor
    file: Option<PathBuf>,

    /// JSON schema file ({"tables": [...]}, {"columns": [...]}, or a bare
    /// array of tables)
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Theme override: light, dark, or host
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = config::load_settings().context("loading settings")?;
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }

    let mut app = App::new(settings);

    if let Some(path) = &args.schema {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading schema file {}", path.display()))?;
        app.set_schema_text(&text);
    }
    if let Some(path) = &args.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        app.editor.set_content(&content);
    }

    let mut terminal = setup_terminal().context("initializing terminal")?;
    let result = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal).context("restoring terminal")?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| render(frame, app))?;

        let app_event = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            Event::Paste(data) => AppEvent::Paste(data),
            Event::Resize(_, _) => AppEvent::Resize,
            _ => continue,
        };
        if app.handle_event(app_event) == Action::Quit {
            app.running = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
