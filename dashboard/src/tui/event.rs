//! Event handling for the TUI.
//!
//! Terminal input is read on a separate thread; background requests report
//! back through the same channel, so the UI loop has a single queue to wait
//! on.

use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use netsentry_common::ApiResult;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// How long the reader thread blocks before checking for shutdown
const INPUT_POLL: Duration = Duration::from_millis(250);

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize.
    Resize,
    /// The startup interface listing finished.
    InterfacesLoaded(ApiResult<Vec<String>>),
    /// The scan-start request finished.
    ScanStarted(ApiResult<String>),
    /// A rule submission finished; carries the output-field text.
    RuleSubmitted(String),
}

/// Receives terminal input and background results.
pub struct EventHandler {
    rx: UnboundedReceiver<Event>,
    tx: UnboundedSender<Event>,
}

impl EventHandler {
    /// Creates a handler without a terminal reader (for tests and headless use).
    pub fn detached() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { rx, tx }
    }

    /// Creates a handler and starts reading terminal events.
    pub fn new() -> Self {
        let handler = Self::detached();
        let event_tx = handler.tx.clone();

        thread::spawn(move || loop {
            if event_tx.is_closed() {
                break;
            }
            if !event::poll(INPUT_POLL).unwrap_or(false) {
                continue;
            }
            let event = match event::read() {
                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                Ok(CrosstermEvent::Resize(_, _)) => Event::Resize,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("Terminal read failed: {}", e);
                    break;
                }
            };
            if event_tx.send(event).is_err() {
                break;
            }
        });

        handler
    }

    /// Sender for background tasks to report through.
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Receives the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
