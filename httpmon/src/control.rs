//! State shared between the workers and the reporter.
//!
//! The three aggregates (errors, recommendations, latencies) live behind one
//! mutex and are only ever touched together: a worker records one request in
//! a single critical section and the reporter drains all three in another.
//! The `running` flag sits outside the lock. Workers may see it one iteration
//! late, which bounds shutdown by one request per worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Aggregates accumulated since the last drain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub errors: u64,
    pub recommendations: u64,
    /// Request latencies in seconds, in the order they were recorded.
    pub latencies: Vec<f64>,
}

impl Tally {
    pub fn requests(&self) -> u64 {
        self.latencies.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.latencies.is_empty()
    }
}

/// Outcome of one completed worker iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestRecord {
    pub failed: bool,
    pub recommendation: bool,
    pub latency_secs: f64,
}

#[derive(Debug)]
pub struct ControlState {
    running: AtomicBool,
    tally: Mutex<Tally>,
}

pub type SharedControl = Arc<ControlState>;

impl ControlState {
    /// Fresh state with `running` already set.
    pub fn new() -> Self {
        Self { running: AtomicBool::new(true), tally: Mutex::new(Tally::default()) }
    }

    pub fn shared() -> SharedControl {
        Arc::new(Self::new())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Clear `running`. Idempotent; nothing ever sets it back.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn record(&self, record: &RequestRecord) {
        let mut tally = self.lock();
        if record.failed {
            tally.errors += 1;
        }
        if record.recommendation {
            tally.recommendations += 1;
        }
        tally.latencies.push(record.latency_secs);
    }

    /// Copy out and reset all aggregates atomically.
    pub fn drain(&self) -> Tally {
        std::mem::take(&mut *self.lock())
    }

    // Every mutation is a single push or increment, so a poisoned tally is still consistent.
    fn lock(&self) -> MutexGuard<'_, Tally> {
        self.tally.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}
