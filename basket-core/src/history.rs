//! Bounded log of added item names, most recent first.

use std::collections::VecDeque;

/// Maximum number of names kept. Older entries are evicted.
pub const HISTORY_CAPACITY: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    names: VecDeque<String>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a name as the most recent addition.
    pub fn record(&mut self, name: impl Into<String>) {
        self.names.push_front(name.into());
        self.names.truncate(HISTORY_CAPACITY);
    }

    /// Names from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
