//! Logging setup for hosts embedding the triage engine.
//!
//! The engine itself only emits `tracing` events (dropped catalog entries,
//! absorbed unknown-id toggles, save outcomes); these helpers give a
//! hosting application a ready-made subscriber for them.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging at the default `info` level.
///
/// `RUST_LOG` overrides the default when set.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level
/// (debug, info, warn, error); `RUST_LOG` still takes precedence.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt().with_env_filter(filter).compact().init();
}

/// Initialize logging for testing (captures logs for test output).
///
/// Safe to call from multiple tests; only the first call installs the
/// subscriber.
#[cfg(test)]
pub fn init_test() {
    let _ = fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
