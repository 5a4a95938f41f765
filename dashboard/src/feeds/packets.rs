//! Packet feeds
//!
//! Normal packets are polled per interface, malformed ones across all
//! interfaces. Both keep the last [`PACKET_BUFFER`] records, most recent
//! first, in a buffer that lives for the whole session.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use netsentry_common::{ApiResult, Backend, ErrorPacketRecord, PacketRecord};

use super::lock;
use crate::buffer::{RecentBuffer, PACKET_BUFFER};
use crate::error::DashboardError;
use crate::poller::{PollSchedule, Poller};

/// Prepend a tick's batch to the buffer
///
/// Records are prepended one at a time in batch order, so the last record
/// of the batch lands at index 0. On failure the buffer is left as it was.
pub fn apply_batch<T>(buffer: &mut RecentBuffer<T>, result: ApiResult<Vec<T>>) -> ApiResult<usize> {
    let batch = result?;
    let count = batch.len();
    buffer.extend_recent(batch);
    Ok(count)
}

// ============================================================================
// Packet feed
// ============================================================================

async fn tick_packets(
    backend: &dyn Backend,
    buffer: &Mutex<RecentBuffer<PacketRecord>>,
    interface: &str,
) {
    let result = backend.packets(interface).await;

    match apply_batch(&mut lock(buffer), result) {
        Ok(count) => tracing::debug!("packets {}: {} new", interface, count),
        Err(e) => tracing::warn!("Failed to fetch packet data for {}: {}", interface, e),
    }
}

/// Live packet table for one interface
pub struct PacketFeed {
    backend: Arc<dyn Backend>,
    buffer: Arc<Mutex<RecentBuffer<PacketRecord>>>,
    poller: Poller,
    period: Duration,
    interface: Option<String>,
}

impl PacketFeed {
    pub fn new(backend: Arc<dyn Backend>, period: Duration) -> Self {
        Self {
            backend,
            buffer: Arc::new(Mutex::new(RecentBuffer::new(PACKET_BUFFER))),
            poller: Poller::new("packets"),
            period,
            interface: None,
        }
    }

    /// Start polling `interface`, replacing any poll already running
    ///
    /// The buffer is kept across restarts, even when the interface changes.
    pub fn start(&mut self, interface: Option<&str>) -> Result<(), DashboardError> {
        let interface = interface
            .filter(|name| !name.is_empty())
            .ok_or(DashboardError::NoInterfaceSelected)?
            .to_string();

        let backend = Arc::clone(&self.backend);
        let buffer = Arc::clone(&self.buffer);
        let target = interface.clone();
        self.poller.start(self.period, PollSchedule::Delayed, move || {
            let backend = Arc::clone(&backend);
            let buffer = Arc::clone(&buffer);
            let interface = target.clone();
            async move { tick_packets(backend.as_ref(), &buffer, &interface).await }
        });

        tracing::info!("Capturing packets on {}", interface);
        self.interface = Some(interface);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.poller.stop() {
            tracing::info!("Stopped packet capture");
        }
        self.interface = None;
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    /// Buffered packets, most recent first
    pub fn packets(&self) -> Vec<PacketRecord> {
        lock(&self.buffer).to_vec()
    }
}

// ============================================================================
// Error packet feed
// ============================================================================

async fn tick_error_packets(backend: &dyn Backend, buffer: &Mutex<RecentBuffer<ErrorPacketRecord>>) {
    let result = backend.error_packets().await;

    match apply_batch(&mut lock(buffer), result) {
        Ok(count) => tracing::debug!("error packets: {} new", count),
        Err(e) => tracing::warn!("Failed to fetch error packets: {}", e),
    }
}

/// Live table of malformed packets across all interfaces
pub struct ErrorPacketFeed {
    backend: Arc<dyn Backend>,
    buffer: Arc<Mutex<RecentBuffer<ErrorPacketRecord>>>,
    poller: Poller,
    period: Duration,
}

impl ErrorPacketFeed {
    pub fn new(backend: Arc<dyn Backend>, period: Duration) -> Self {
        Self {
            backend,
            buffer: Arc::new(Mutex::new(RecentBuffer::new(PACKET_BUFFER))),
            poller: Poller::new("error-packets"),
            period,
        }
    }

    /// Start polling, replacing any poll already running
    pub fn start(&mut self) {
        let backend = Arc::clone(&self.backend);
        let buffer = Arc::clone(&self.buffer);
        self.poller.start(self.period, PollSchedule::Delayed, move || {
            let backend = Arc::clone(&backend);
            let buffer = Arc::clone(&buffer);
            async move { tick_error_packets(backend.as_ref(), &buffer).await }
        });
    }

    pub fn stop(&mut self) {
        if self.poller.stop() {
            tracing::info!("Stopped error packet capture");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    /// Buffered error packets, most recent first
    pub fn packets(&self) -> Vec<ErrorPacketRecord> {
        lock(&self.buffer).to_vec()
    }
}
