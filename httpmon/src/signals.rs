use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use httpmon_common::{HttpMonError, Result};
use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;

use crate::reporter::Signal;

/// Signals that end a monitoring run.
pub const TERMINATION_SIGNALS: [i32; 3] = [SIGINT, SIGQUIT, SIGTERM];

/// Take over `TERMINATION_SIGNALS` and forward each delivery to `tx` from a
/// dedicated thread. Their default actions no longer run, so neither the
/// workers nor the process as a whole are interrupted by them.
///
/// The thread exits once the receiving side is gone.
pub fn forward_termination_signals(tx: Sender<Signal>) -> Result<JoinHandle<()>> {
    let mut signals =
        Signals::new(TERMINATION_SIGNALS).map_err(|e| HttpMonError::Signal(e.to_string()))?;

    thread::Builder::new()
        .name("httpmon-signals".to_string())
        .spawn(move || {
            for signo in signals.forever() {
                tracing::debug!(signo, "termination signal received");
                if tx.send(Signal::Received(signo)).is_err() {
                    break;
                }
            }
        })
        .map_err(|e| HttpMonError::Signal(e.to_string()))
}
