// SPDX-License-Identifier: MPL-2.0
//! Circular buffer for diagnostic event storage.

use crate::domain::diagnostics::EventLogCapacity;
use std::collections::VecDeque;

/// Fixed-capacity buffer that evicts its oldest element when full.
///
/// Elements are kept oldest first. The number of evicted elements is
/// tracked so exports can tell whether the log is complete.
///
/// ```
/// use toastkit::diagnostics::CircularBuffer;
///
/// let mut buffer = CircularBuffer::with_raw_capacity(2);
/// buffer.push("a");
/// buffer.push("b");
/// buffer.push("c");
///
/// assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
/// assert_eq!(buffer.evicted(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
    evicted: u64,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: EventLogCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Bypasses the [`EventLogCapacity`] bounds; handy for small test buffers.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
            self.evicted += 1;
        }
        self.data.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of elements dropped to make room since creation or the last clear.
    #[must_use]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.evicted = 0;
    }
}
