//! Intrusion alert feed
//!
//! A snapshot view: every successful tick replaces the table with the
//! backend's current result set. Nothing accumulates client-side.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use netsentry_common::{AlertRecord, ApiResult, Backend};
use tokio::task::JoinHandle;

use super::lock;
use crate::poller::{PollSchedule, Poller};

/// Replace the table with a tick's result set
///
/// On failure the table is left as it was.
pub fn apply_snapshot(
    table: &mut Vec<AlertRecord>,
    result: ApiResult<Vec<AlertRecord>>,
) -> ApiResult<usize> {
    *table = result?;
    Ok(table.len())
}

async fn tick(backend: &dyn Backend, table: &Mutex<Vec<AlertRecord>>) {
    let result = backend.scan_results().await;

    match apply_snapshot(&mut lock(table), result) {
        Ok(count) => tracing::debug!("alerts: {} results", count),
        Err(e) => tracing::warn!("Error fetching scan results: {}", e),
    }
}

pub struct AlertFeed {
    backend: Arc<dyn Backend>,
    table: Arc<Mutex<Vec<AlertRecord>>>,
    poller: Poller,
    period: Duration,
}

impl AlertFeed {
    pub fn new(backend: Arc<dyn Backend>, period: Duration) -> Self {
        Self {
            backend,
            table: Arc::new(Mutex::new(Vec::new())),
            poller: Poller::new("alerts"),
            period,
        }
    }

    /// Poll results now and every period after, replacing any running poll
    ///
    /// Called once the backend has accepted a scan request.
    pub fn begin_polling(&mut self) {
        let backend = Arc::clone(&self.backend);
        let table = Arc::clone(&self.table);
        self.poller.start(self.period, PollSchedule::Immediate, move || {
            let backend = Arc::clone(&backend);
            let table = Arc::clone(&table);
            async move { tick(backend.as_ref(), &table).await }
        });
    }

    /// Fetch the current results once, without starting a scan
    pub async fn refresh_once(&self) {
        tick(self.backend.as_ref(), &self.table).await;
    }

    /// [`refresh_once`](Self::refresh_once) on a spawned task
    pub fn spawn_refresh(&self) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let table = Arc::clone(&self.table);
        tokio::spawn(async move { tick(backend.as_ref(), &table).await })
    }

    pub fn stop(&mut self) {
        if self.poller.stop() {
            tracing::info!("Stopped alert polling");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    /// Backend handle, for issuing the scan request off the UI loop
    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.backend)
    }

    /// Current alert snapshot, in server order
    pub fn alerts(&self) -> Vec<AlertRecord> {
        lock(&self.table).clone()
    }
}
