//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`. Calling this more than once is harmless;
/// only the first call installs the logger.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize logging for unit and integration tests
///
/// Output is captured by the test harness instead of going straight to stderr.
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
