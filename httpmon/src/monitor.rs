use std::io::Write;
use std::sync::mpsc::Receiver;

use httpmon_common::{Prober, Result};

use crate::config::MonitorConfig;
use crate::control::ControlState;
use crate::reporter::{Clock, Reporter, Signal, SystemClock, Totals};
use crate::worker::{join_workers, spawn_workers};

/// What a finished monitoring run observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSummary {
    pub signal: Signal,
    pub totals: Totals,
}

/// Wires the worker pool to the reporter for one run.
pub struct Monitor<C: Clock = SystemClock> {
    config: MonitorConfig,
    reporter_clock: C,
}

impl Monitor<SystemClock> {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config, reporter_clock: SystemClock }
    }
}

impl<C: Clock> Monitor<C> {
    pub fn with_clock(config: MonitorConfig, clock: C) -> Self {
        Self { config, reporter_clock: clock }
    }

    /// Start the workers, report until a signal arrives, then join every worker.
    ///
    /// After the final report a `Got <signal>, cleaning up ...` line goes to
    /// `out`. Workers are joined even when writing to `out` fails; the write
    /// error is returned afterwards.
    pub fn run<P, F, W>(self, make_prober: F, signals: &Receiver<Signal>, out: &mut W) -> Result<MonitorSummary>
    where
        P: Prober + 'static,
        F: FnMut(usize) -> Result<P>,
        W: Write,
    {
        self.config.validate()?;

        let control = ControlState::shared();
        let handles = spawn_workers(&self.config, &control, make_prober)?;
        let mut reporter = Reporter::new(control.clone(), self.reporter_clock);
        tracing::info!(
            url = %self.config.url,
            concurrency = self.config.concurrency,
            timeout_secs = self.config.timeout.as_secs(),
            "workers started"
        );

        let outcome = reporter.run(signals, out).and_then(|signal| {
            writeln!(out, "Got {signal}, cleaning up ...")?;
            Ok(signal)
        });
        control.stop();

        tracing::debug!(workers = handles.len(), "joining workers");
        join_workers(handles)?;

        let signal = outcome?;
        Ok(MonitorSummary { signal, totals: reporter.totals() })
    }
}
