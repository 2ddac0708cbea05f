//! Activity log shown by the dashboard's log panel.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use log::Level;
use parking_lot::Mutex;
use serde::Serialize;

const DEFAULT_LOG_CAPACITY: usize = 100;

/// Sink for operator-facing events. Calls never fail and never block for long.
pub trait LogSink: Send + Sync {
    fn add_log(&self, level: Level, component: &str, message: &str);
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: String,
    pub component: String,
    pub message: String,
}

/// Bounded in-memory log that also forwards to the `log` facade
pub struct ActivityLog {
    capacity: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Entries oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ActivityLog {
    fn add_log(&self, level: Level, component: &str, message: &str) {
        log::log!(target: "ape::activity", level, "[{}] {}", component, message);

        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            timestamp: Local::now(),
            level: level.to_string(),
            component: component.to_string(),
            message: message.to_string(),
        });
    }
}
