//! Terminal dashboard
//!
//! The UI loop redraws on a fixed tick and applies events as they arrive.
//! Feeds write into their own buffers from background tasks, so a redraw
//! always shows the latest snapshot without the loop waiting on the network.

pub mod app;
pub mod event;
pub mod input;
pub mod render;

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend as TerminalBackend, CrosstermBackend};
use ratatui::Terminal;

pub use app::App;
pub use event::{Event, EventHandler};

/// Redraw interval
const REDRAW: Duration = Duration::from_millis(250);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode and the alternate screen
///
/// A failure part-way through puts the terminal back before returning.
fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let setup = || -> Result<Tui> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Ok(Terminal::new(CrosstermBackend::new(stdout))?)
    };
    setup().inspect_err(|_| {
        let _ = restore();
    })
}

/// Leave raw mode and the alternate screen; safe to call more than once
pub fn restore() -> Result<()> {
    restore_to(&mut io::stdout())
}

fn restore_to<W: Write>(out: &mut W) -> Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, crossterm::cursor::Show)?;
    Ok(())
}

/// Restore the terminal before the default panic output is printed
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

/// Take over the terminal and run until the user quits.
pub async fn run(mut app: App, mut events: EventHandler) -> Result<()> {
    install_panic_hook();
    let mut terminal = init()?;

    app.startup();
    let result = event_loop(&mut terminal, &mut app, &mut events).await;

    // Restore the terminal before reporting any loop error
    restore()?;
    result
}

async fn event_loop<B: TerminalBackend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    let mut redraw = tokio::time::interval(REDRAW);

    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        tokio::select! {
            _ = redraw.tick() => {}
            event = events.next() => match event {
                Some(event) => app.handle_event(event),
                None => app.quit(),
            },
        }

        if app.should_quit() {
            tracing::info!("Dashboard closed");
            return Ok(());
        }
    }
}
