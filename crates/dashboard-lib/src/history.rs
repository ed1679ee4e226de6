//! Bounded FIFO history of performance samples
//!
//! Backs the trend view: insertion order, fixed capacity, oldest sample
//! evicted first once the buffer is full.

use crate::models::Sample;
use std::collections::VecDeque;

/// Default number of retained samples, matching the trend window
pub const DEFAULT_CAPACITY: usize = 50;

/// Ring of the most recent performance samples
#[derive(Debug)]
pub struct HistoryBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample. Once the buffer is over capacity, exactly the single
    /// oldest entry is evicted.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently recorded sample
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Iterate retained samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Owned copy of the retained samples, oldest first
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
