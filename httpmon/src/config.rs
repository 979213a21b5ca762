use std::time::Duration;

use httpmon_common::{HttpMonError, Result};

/// Number of worker threads when `--concurrency` is not given.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// Per-request timeout (seconds) when `--timeout` is not given.
pub const DEFAULT_TIMEOUT_SECS: u64 = 9;

/// Upper bound on how long the reporter waits for a termination signal before draining.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Monitor configuration; immutable once workers start.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub url: String,
    pub concurrency: usize,
    pub timeout: Duration,
}

impl MonitorConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(HttpMonError::InvalidConfig("url must not be empty".to_string()));
        }
        if self.concurrency == 0 {
            return Err(HttpMonError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(HttpMonError::InvalidConfig("timeout must be positive".to_string()));
        }
        Ok(())
    }
}
