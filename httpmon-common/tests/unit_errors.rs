use httpmon_common::{HttpMonError, ErrorResponse};

#[test]
fn test_error_display() {
    let err = HttpMonError::InvalidConfig("concurrency must be at least 1".to_string());
    assert_eq!(err.to_string(), "Invalid configuration: concurrency must be at least 1");
}

#[test]
fn test_error_equality() {
    let err1 = HttpMonError::WorkerPanicked(1);
    let err2 = HttpMonError::WorkerPanicked(1);
    let err3 = HttpMonError::WorkerPanicked(2);

    assert_eq!(err1, err2);
    assert_ne!(err1, err3);
}

#[test]
fn test_no_data() {
    let err = HttpMonError::NoData;
    assert_eq!(err.to_string(), "No data to compute quartiles on");
}

#[test]
fn test_client_build_error() {
    let err = HttpMonError::ClientBuild("builder error".to_string());
    assert_eq!(err.to_string(), "Failed to build HTTP client: builder error");
}

#[test]
fn test_worker_spawn_error() {
    let err = HttpMonError::WorkerSpawn("resource temporarily unavailable".to_string());
    assert_eq!(err.to_string(), "Failed to spawn worker thread: resource temporarily unavailable");
}

#[test]
fn test_signal_error() {
    let err = HttpMonError::Signal("handler already installed".to_string());
    assert_eq!(err.to_string(), "Signal handler error: handler already installed");
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let err: HttpMonError = io.into();
    assert_eq!(err, HttpMonError::Io("pipe closed".to_string()));
    assert_eq!(err.to_string(), "I/O error: pipe closed");
}

#[test]
fn test_error_response_json() {
    let json = serde_json::to_string(&ErrorResponse { error: "boom".to_string() }).unwrap();
    assert_eq!(json, r#"{"error":"boom"}"#);

    let parsed: ErrorResponse = serde_json::from_str(r#"{"error":"down"}"#).unwrap();
    assert_eq!(parsed.error, "down");
}
