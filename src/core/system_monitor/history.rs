use std::collections::VecDeque;

use chrono::{DateTime, Local, NaiveDate};
use parking_lot::Mutex;

use super::metrics::{MetricKind, MetricReading};

/// 24 hours of samples at the simulation's 2 Hz rate
pub const DEFAULT_BUFFER_CAPACITY: usize = 172_800;

/// Bounded, time-ordered store of metric readings.
///
/// Oldest entries are evicted first once `capacity` is reached. All access goes
/// through a single mutex; readers take a snapshot and process it outside the lock.
#[derive(Debug)]
pub struct ReadingBuffer {
    capacity: usize,
    readings: Mutex<VecDeque<MetricReading>>,
}

impl ReadingBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// A zero capacity is bumped to one so the newest reading is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            // Full capacity is 172k entries; let the deque grow on demand
            readings: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.readings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.lock().is_empty()
    }

    /// Append a reading stamped with the current local time
    pub fn record(&self, metric: MetricKind, component: &str, value: f64) {
        self.record_at(Local::now(), metric, component, value);
    }

    pub fn record_at(
        &self,
        timestamp: DateTime<Local>,
        metric: MetricKind,
        component: &str,
        value: f64,
    ) {
        self.push(MetricReading::new(timestamp, metric, component, value));
    }

    pub fn push(&self, reading: MetricReading) {
        let mut readings = self.readings.lock();
        if readings.len() >= self.capacity {
            readings.pop_front();
        }
        readings.push_back(reading);
    }

    /// Append many readings under a single lock acquisition
    pub fn extend<I>(&self, batch: I)
    where
        I: IntoIterator<Item = MetricReading>,
    {
        let mut readings = self.readings.lock();
        for reading in batch {
            if readings.len() >= self.capacity {
                readings.pop_front();
            }
            readings.push_back(reading);
        }
    }

    /// Consistent copy of the whole buffer, oldest first
    pub fn snapshot(&self) -> Vec<MetricReading> {
        self.readings.lock().iter().cloned().collect()
    }

    /// Readings whose local calendar date equals `date`, oldest first
    pub fn readings_on(&self, date: NaiveDate) -> Vec<MetricReading> {
        self.readings
            .lock()
            .iter()
            .filter(|r| r.timestamp.date_naive() == date)
            .cloned()
            .collect()
    }

    /// Values of one metric in insertion order
    pub fn values_of(&self, metric: MetricKind) -> Vec<f64> {
        self.readings
            .lock()
            .iter()
            .filter(|r| r.metric == metric)
            .map(|r| r.value)
            .collect()
    }
}

impl Default for ReadingBuffer {
    fn default() -> Self {
        Self::new()
    }
}
