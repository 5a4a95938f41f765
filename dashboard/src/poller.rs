//! Fixed-period polling
//!
//! A [`Poller`] owns at most one spawned polling task. Starting it again
//! aborts the running task first, so a feed never has two timers.
//!
//! Ticks of one poller never overlap: the loop awaits each tick before it
//! waits for the next, and ticks missed while a request was slow are skipped
//! rather than bunched up. Aborting the task drops a request still in flight,
//! so a restarted feed never applies a stale response.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// When the first tick fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollSchedule {
    /// Right away, then every period
    Immediate,
    /// One period after start, then every period
    Delayed,
}

/// Handle to a feed's polling task
#[derive(Debug)]
pub struct Poller {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(name: &'static str) -> Self {
        Self { name, handle: None }
    }

    /// Replace any running task with one calling `tick` every `period`
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F, Fut>(&mut self, period: Duration, schedule: PollSchedule, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.stop() {
            tracing::debug!("{}: replaced previous poller", self.name);
        }

        let first = match schedule {
            PollSchedule::Immediate => Instant::now(),
            PollSchedule::Delayed => Instant::now() + period,
        };

        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                tick().await;
            }
        }));

        tracing::info!("{}: polling every {:?}", self.name, period);
    }

    /// Abort the running task, if any. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
