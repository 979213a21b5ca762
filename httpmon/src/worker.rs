use std::thread::{self, JoinHandle};
use std::time::Instant;

use httpmon_common::{HttpMonError, Prober, Result};

use crate::config::MonitorConfig;
use crate::control::{RequestRecord, SharedControl};

/// Issue requests back-to-back until `control` stops running.
///
/// Every iteration that starts is completed and recorded exactly once; an
/// in-flight request is never abandoned, so a worker can outlive `stop()` by
/// at most one request timeout.
pub fn run_worker<P: Prober>(id: usize, mut prober: P, control: SharedControl) {
    let span = tracing::debug_span!("worker", id);
    let _enter = span.enter();
    tracing::debug!("started");

    let mut iterations: u64 = 0;
    while control.is_running() {
        control.record(&issue_one(&mut prober));
        iterations += 1;
    }

    tracing::debug!(iterations, "stopped");
}

/// Issue one request and time it.
pub fn issue_one<P: Prober>(prober: &mut P) -> RequestRecord {
    let start = Instant::now();
    let outcome = prober.probe();
    let latency_secs = start.elapsed().as_secs_f64();

    RequestRecord { failed: !outcome.success, recommendation: outcome.recommendation, latency_secs }
}

/// Start `config.concurrency` named worker threads, each with its own prober.
///
/// If building a prober or spawning a thread fails, the workers already
/// started are stopped and joined before the error is returned.
pub fn spawn_workers<P, F>(
    config: &MonitorConfig,
    control: &SharedControl,
    mut make_prober: F,
) -> Result<Vec<JoinHandle<()>>>
where
    P: Prober + 'static,
    F: FnMut(usize) -> Result<P>,
{
    let mut handles = Vec::with_capacity(config.concurrency);

    for id in 0..config.concurrency {
        let spawned = make_prober(id).and_then(|prober| {
            let control = control.clone();
            thread::Builder::new()
                .name(format!("httpmon-worker-{id}"))
                .spawn(move || run_worker(id, prober, control))
                .map_err(|e| HttpMonError::WorkerSpawn(e.to_string()))
        });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                control.stop();
                join_workers(handles).ok();
                return Err(e);
            }
        }
    }

    Ok(handles)
}

/// Wait for every worker to return. Reports the first worker that panicked,
/// after all of them have been joined.
pub fn join_workers(handles: Vec<JoinHandle<()>>) -> Result<()> {
    let mut first_panic = None;
    for (id, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            tracing::error!(worker = id, "worker thread panicked");
            first_panic.get_or_insert(id);
        }
    }
    match first_panic {
        Some(id) => Err(HttpMonError::WorkerPanicked(id)),
        None => Ok(()),
    }
}
