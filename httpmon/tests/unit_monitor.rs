mod common;

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use common::{field, FixedClock, StubProber};
use httpmon::{Monitor, MonitorConfig, Signal};
use httpmon_common::HttpMonError;

fn config(concurrency: usize) -> MonitorConfig {
    MonitorConfig { concurrency, ..MonitorConfig::new("http://stub.invalid/") }
}

// Helper: deliver `signal` after `delay` on a fresh channel.
fn signal_after(delay: Duration, signal: Signal) -> (Receiver<Signal>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        thread::sleep(delay);
        tx.send(signal).ok();
    });
    (rx, handle)
}

const SIGQUIT: i32 = 3;

// Returns the summary and the report lines; the trailing cleanup line is checked and dropped.
fn run_stub(prober: StubProber, concurrency: usize) -> (httpmon::MonitorSummary, Vec<String>) {
    let (rx, sender) = signal_after(Duration::from_millis(100), Signal::Received(SIGQUIT));
    let mut out = Vec::new();
    let summary = Monitor::with_clock(config(concurrency), FixedClock(1.0))
        .run(|_| Ok(prober.clone()), &rx, &mut out)
        .unwrap();
    sender.join().unwrap();
    let mut lines: Vec<String> =
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect();
    assert_eq!(lines.pop().as_deref(), Some("Got signal 3, cleaning up ..."));
    (summary, lines)
}

#[test]
fn test_marker_on_every_response_gives_full_rate() {
    let (summary, lines) = run_stub(StubProber::new(true, true), 4);

    assert_eq!(summary.signal, Signal::Received(SIGQUIT));
    assert_eq!(lines.len(), 1);
    assert!(summary.totals.requests > 0);
    assert_eq!(field(&lines[0], "rr"), "100%");
    assert_eq!(field(&lines[0], "errors"), "0000");
}

#[test]
fn test_marker_never_present_gives_zero_rate() {
    let (summary, lines) = run_stub(StubProber::new(true, false), 4);

    assert!(summary.totals.requests > 0);
    assert_eq!(summary.totals.recommendations, 0);
    assert_eq!(field(&lines[0], "rr"), "00%");
}

#[test]
fn test_always_failing_counts_every_request_as_error() {
    let (summary, lines) = run_stub(StubProber::new(false, false), 3);

    assert!(summary.totals.requests > 0);
    assert_eq!(summary.totals.errors, summary.totals.requests);
    let errors: u64 = field(&lines[0], "errors").parse().unwrap();
    assert_eq!(errors, summary.totals.requests);
}

#[test]
fn test_reported_requests_never_exceed_issued() {
    let prober = StubProber::new(true, false);
    let counter = prober.clone();
    let concurrency = 5;
    let (summary, _) = run_stub(prober, concurrency);

    // Iterations finishing after the final drain are completed but not reported.
    let issued = counter.calls();
    assert!(summary.totals.requests <= issued);
    assert!(issued - summary.totals.requests <= concurrency as u64);
}

#[test]
fn test_workers_joined_within_one_iteration_of_shutdown() {
    let prober = StubProber::new(true, false).with_delay(Duration::from_millis(200));
    let (rx, sender) = signal_after(Duration::from_millis(50), Signal::Cancelled);

    let started = std::time::Instant::now();
    let mut out = Vec::new();
    let summary = Monitor::with_clock(config(2), FixedClock(0.0))
        .run(|_| Ok(prober.clone()), &rx, &mut out)
        .unwrap();
    sender.join().unwrap();

    assert_eq!(summary.signal, Signal::Cancelled);
    assert_eq!(summary.totals.reports, 1);
    assert!(String::from_utf8(out).unwrap().ends_with("Got cancellation, cleaning up ...\n"));
    // Signal at ~50ms, in-flight requests end at ~200ms.
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[test]
fn test_invalid_config_starts_no_workers() {
    let prober = StubProber::new(true, false);
    let counter = prober.clone();
    let (_tx, rx) = mpsc::channel::<Signal>();
    let mut out = Vec::new();

    let result = Monitor::new(config(0)).run(|_| Ok(prober.clone()), &rx, &mut out);

    assert!(matches!(result, Err(HttpMonError::InvalidConfig(_))));
    assert_eq!(counter.calls(), 0);
    assert!(out.is_empty());
}

#[test]
fn test_prober_factory_error_is_returned() {
    let (_tx, rx) = mpsc::channel::<Signal>();
    let mut out = Vec::new();

    let result = Monitor::new(config(2)).run(
        |_| -> httpmon_common::Result<StubProber> {
            Err(HttpMonError::ClientBuild("bad url".to_string()))
        },
        &rx,
        &mut out,
    );

    assert_eq!(result.err(), Some(HttpMonError::ClientBuild("bad url".to_string())));
    assert!(out.is_empty());
}
