//! Feed controllers
//!
//! A feed is a polling loop plus the bounded state it fills:
//! - [`TrafficMonitor`]: rate samples into a rolling chart series
//! - [`AlertFeed`]: snapshot of the backend's intrusion alerts
//! - [`PacketFeed`] / [`ErrorPacketFeed`]: most-recent-first packet tables
//!
//! Each controller owns its own [`Poller`](crate::poller::Poller) and its
//! own state; nothing is shared between feeds. State transitions live in
//! pure `apply_*` functions so they can be tested without timers. The tick
//! functions only fetch, apply and log.

mod alerts;
mod packets;
mod traffic;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use alerts::{apply_snapshot, AlertFeed};
pub use packets::{apply_batch, ErrorPacketFeed, PacketFeed};
pub use traffic::{apply_sample, TrafficMonitor, TrafficPoint, LABEL_FORMAT};

/// Lock feed state, recovering it if a tick panicked mid-update
///
/// Every update leaves the buffers within capacity, so a poisoned lock
/// still guards a valid state.
pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
