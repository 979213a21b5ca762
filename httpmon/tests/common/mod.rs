#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use httpmon::reporter::Clock;
use httpmon_common::{ProbeOutcome, Prober};

/// Prober that returns a fixed outcome after an optional delay and counts its calls.
#[derive(Clone)]
pub struct StubProber {
    pub outcome: ProbeOutcome,
    pub delay: Duration,
    pub calls: Arc<AtomicU64>,
}

impl StubProber {
    pub fn new(success: bool, recommendation: bool) -> Self {
        Self {
            outcome: ProbeOutcome { success, recommendation },
            delay: Duration::from_millis(1),
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Prober for StubProber {
    fn probe(&mut self) -> ProbeOutcome {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }
}

/// Clock pinned to a fixed Unix timestamp.
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn unix_now_secs_f64(&self) -> f64 {
        self.0
    }
}

/// Value of `name=` in a report line, e.g. `"07%"` for `rr`.
pub fn field<'a>(line: &'a str, name: &str) -> &'a str {
    let start = line.find(&format!("{name}=")).expect("field missing") + name.len() + 1;
    let rest = &line[start..];
    let end = rest.find(' ').unwrap_or(rest.len());
    &rest[..end]
}
