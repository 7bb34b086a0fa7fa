use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use recentfiles_core::{Session, config_file, resolve_path};

mod action;
mod app;
mod input;
mod logging;
mod theme;
mod view;

use app::App;

/// Recent Files: view and prune the MuseScore 4 recent files list.
///
/// Reads `config.toml` from the user config directory and `.recentfiles.toml`
/// from the working directory. Set RECENTFILES_LOG to change the log level.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

fn main() -> anyhow::Result<()> {
    let _args = Args::parse();
    let _log_guard = logging::init();

    let config = config_file::load_config();
    let path = match config.document_path() {
        Some(path) => path,
        None => resolve_path()?,
    };
    tracing::info!(path = %path.display(), "opening recent files list");

    // Load before touching the terminal so errors print normally
    let session = Session::open(path.clone())
        .with_context(|| format!("failed to open {}", path.display()))?;
    let theme = theme::Theme::by_name(config.theme().unwrap_or("hacker"));
    let mut app = App::new(session, theme);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if app.session.is_dirty() {
        tracing::info!("exited with unsaved removals");
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| app.view(f))?;

        let event = event::read()?;
        let action = input::map_event(&event, &app.input_mode);
        if app.update(action) {
            return Ok(());
        }
    }
}
