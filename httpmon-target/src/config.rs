use std::time::Duration;

/// Address the target binds when `--listen` is not given.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Body served by `/ok`; contains no marker byte.
pub const PLAIN_BODY: &[u8] = b"ok\n";

/// Upper bound accepted by `/slow/:ms`.
pub const MAX_SLOW_DELAY: Duration = Duration::from_secs(60);
