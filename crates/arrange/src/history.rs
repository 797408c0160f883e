//! Bounded record of committed layouts.

use std::{collections::VecDeque, time::SystemTime};

use crate::{config::LayoutConfig, layout::LayoutResult};

/// Number of entries kept unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A committed layout run.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    config: LayoutConfig,
    result: LayoutResult,
    timestamp: SystemTime,
}

impl HistoryEntry {
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn result(&self) -> &LayoutResult {
        &self.result
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

/// Most-recent-first list of layout runs; the oldest entry is evicted once
/// the capacity is reached.
#[derive(Debug, Clone)]
pub struct LayoutHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for LayoutHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl LayoutHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, config: LayoutConfig, result: LayoutResult) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(HistoryEntry {
            config,
            result,
            timestamp: SystemTime::now(),
        });
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
