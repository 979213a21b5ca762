use std::fmt;
use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use httpmon_common::Result;

use crate::config::REPORT_INTERVAL;
use crate::control::{SharedControl, Tally};
use crate::stats::quartiles;

/// Termination notification delivered to the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Operating-system signal, by number.
    Received(i32),
    /// Programmatic cancellation, or every sender was dropped.
    Cancelled,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Received(signo) => write!(f, "signal {signo}"),
            Signal::Cancelled => write!(f, "cancellation"),
        }
    }
}

/// Abstraction over wall-clock time for testability.
pub trait Clock: Send + Sync {
    fn unix_now_secs_f64(&self) -> f64;
}

/// Production clock backed by `SystemTime`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now_secs_f64(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
    }
}

/// One interval's worth of figures, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Unix time of the drain, fractional seconds.
    pub timestamp: f64,
    /// min, q1, median, q3, max in whole milliseconds; all zero for an empty interval.
    pub latency_ms: [u64; 5],
    pub throughput_rps: u64,
    /// Percentage of requests that carried the marker, truncated.
    pub recommendation_rate: u64,
    pub errors: u64,
    pub requests: u64,
}

impl Report {
    /// Summarise a drained tally covering `elapsed` of wall time.
    ///
    /// An interval without samples yields a zero-filled report instead of dividing by zero.
    pub fn from_tally(mut tally: Tally, elapsed: Duration, timestamp: f64) -> Self {
        let requests = tally.requests();
        let latency_ms = quartiles(&mut tally.latencies)
            .map(|q| q.to_millis())
            .unwrap_or([0; 5]);

        let elapsed_secs = elapsed.as_secs_f64();
        let throughput_rps = if elapsed_secs > 0.0 {
            (requests as f64 / elapsed_secs) as u64
        } else {
            0
        };
        let recommendation_rate = if requests > 0 {
            tally.recommendations * 100 / requests
        } else {
            0
        };

        Self {
            timestamp,
            latency_ms,
            throughput_rps,
            recommendation_rate,
            errors: tally.errors,
            requests,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [min, q1, median, q3, max] = self.latency_ms;
        write!(
            f,
            "[{:.6}] latency={:04}:{:04}:{:04}:{:04}:{:04}ms throughput={:04}rps rr={:02}% errors={:04}",
            self.timestamp,
            min,
            q1,
            median,
            q3,
            max,
            self.throughput_rps,
            self.recommendation_rate,
            self.errors,
        )
    }
}

/// Running totals over every report emitted so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub reports: u64,
    pub requests: u64,
    pub errors: u64,
    pub recommendations: u64,
}

/// Drives the report / shutdown cycle on the control thread.
pub struct Reporter<C: Clock> {
    control: SharedControl,
    clock: C,
    interval: Duration,
    last_drain: Instant,
    totals: Totals,
}

impl<C: Clock> Reporter<C> {
    pub fn new(control: SharedControl, clock: C) -> Self {
        Self::with_interval(control, clock, REPORT_INTERVAL)
    }

    pub fn with_interval(control: SharedControl, clock: C, interval: Duration) -> Self {
        Self { control, clock, interval, last_drain: Instant::now(), totals: Totals::default() }
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Report every interval until a signal arrives.
    ///
    /// The cycle in which the signal is observed still drains and reports, so
    /// shutdown always emits exactly one final report. `running` is cleared
    /// before that final drain. Returns the signal that ended the loop.
    pub fn run<W: Write>(&mut self, signals: &Receiver<Signal>, out: &mut W) -> Result<Signal> {
        loop {
            let signal = match signals.recv_timeout(self.interval) {
                Ok(signal) => Some(signal),
                Err(RecvTimeoutError::Timeout) if self.control.is_running() => None,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    Some(Signal::Cancelled)
                }
            };

            if signal.is_some() {
                self.control.stop();
            }

            self.drain_and_report(out)?;

            if let Some(signal) = signal {
                return Ok(signal);
            }
        }
    }

    /// Drain the shared tally, write one report line and return the report.
    pub fn drain_and_report<W: Write>(&mut self, out: &mut W) -> Result<Report> {
        let tally = self.control.drain();
        let now = Instant::now();
        let timestamp = self.clock.unix_now_secs_f64();

        let elapsed = now.saturating_duration_since(self.last_drain);
        self.last_drain = now;

        self.totals.reports += 1;
        self.totals.requests += tally.requests();
        self.totals.errors += tally.errors;
        self.totals.recommendations += tally.recommendations;

        let report = Report::from_tally(tally, elapsed, timestamp);
        writeln!(out, "{report}")?;
        out.flush()?;
        Ok(report)
    }
}
