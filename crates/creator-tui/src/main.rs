mod actions;
mod app;
mod ui;
mod util;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use creator_signin::SimulatedSubmission;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::actions::execute_action;
use crate::app::{App, SeriesSettings};

#[derive(Debug, Parser)]
#[command(name = "creator-tui", version, about = "CreatorAnalytics TUI")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the simulated authentication delay
    #[arg(long)]
    delay_ms: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = creator_config::load(args.config)?;

    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.sign_in.submit_delay());
    let port = SimulatedSubmission::new(delay)
        .rejecting(config.sign_in.reject_emails.iter().cloned());

    // Submissions are spawned onto this runtime while the render loop stays
    // on the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .with_context(|| "start async runtime")?;
    let _guard = runtime.enter();

    let mut app = App::new(
        Arc::new(port),
        config.sign_in.destination.clone(),
        SeriesSettings {
            days: config.dashboard.series_days,
            start: config.dashboard.series_start,
        },
    );

    let mut terminal = TerminalGuard::new()?;
    run_app(&mut terminal, &mut app)
}

fn run_app(terminal: &mut TerminalGuard, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        app.poll();
        while let Some(action) = app.next_action() {
            if let Err(err) = execute_action(app, action) {
                app.set_error(err.to_string());
            }
        }

        terminal.terminal_mut().draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
