use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Byte value that flags a response as a recommendation when it appears anywhere in the body.
pub const RECOMMENDATION_MARKER: u8 = 128;

/// Error types for httpmon operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpMonError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No data to compute quartiles on")]
    NoData,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(String),

    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),

    #[error("Signal handler error: {0}")]
    Signal(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for HttpMonError {
    fn from(e: std::io::Error) -> Self {
        HttpMonError::Io(e.to_string())
    }
}

/// JSON error envelope returned by the target server for failing routes
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Result of issuing one request against the monitored endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// `false` on timeout, transport failure, or a non-success HTTP status.
    pub success: bool,
    /// `true` when the marker byte was seen in the response body, whatever `success` says.
    pub recommendation: bool,
}

/// A per-worker handle able to issue one blocking request to a fixed URL.
///
/// Each worker owns its prober exclusively. Implementations must not panic or
/// raise process-wide signals on request failures; failures are reported
/// through `ProbeOutcome::success`.
pub trait Prober: Send {
    fn probe(&mut self) -> ProbeOutcome;
}

/// Returns `true` if `chunk` contains `RECOMMENDATION_MARKER`.
pub fn contains_marker(chunk: &[u8]) -> bool {
    chunk.contains(&RECOMMENDATION_MARKER)
}

/// Result type for httpmon operations
pub type Result<T> = std::result::Result<T, HttpMonError>;
