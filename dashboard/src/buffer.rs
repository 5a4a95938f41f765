//! Bounded buffers backing the feeds
//!
//! Two shapes, both capped:
//! - [`RollingSeries`] appends at the back and evicts the oldest from the
//!   front (traffic chart).
//! - [`RecentBuffer`] prepends at the front and evicts from the tail, so
//!   index 0 is always the most recent record (packet tables).

use std::collections::VecDeque;

/// Points kept on the traffic chart
pub const TRAFFIC_WINDOW: usize = 10;

/// Rows kept in each packet table
pub const PACKET_BUFFER: usize = 15;

/// Fixed-capacity series with FIFO eviction
#[derive(Debug, Clone)]
pub struct RollingSeries<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingSeries<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, evicting the oldest once over capacity
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> RollingSeries<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

/// Fixed-capacity buffer, most recent first
#[derive(Debug, Clone)]
pub struct RecentBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RecentBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Put one record at the front, dropping from the tail once over capacity
    pub fn push_front(&mut self, item: T) {
        self.items.push_front(item);
        while self.items.len() > self.capacity {
            self.items.pop_back();
        }
    }

    /// Prepend a batch record by record
    ///
    /// The last record of the batch ends up at index 0.
    pub fn extend_recent(&mut self, batch: impl IntoIterator<Item = T>) {
        for item in batch {
            self.push_front(item);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Most recent first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> RecentBuffer<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
