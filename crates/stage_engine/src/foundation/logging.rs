//! Logging utilities
//!
//! The engine logs through the `log` facade: rejected lifecycle transitions at
//! `warn`, state changes at `debug`, per-frame fan-out at `trace`.

pub use log::{debug, error, info, trace, warn};

/// Initialize logging from `RUST_LOG`, defaulting to `info`
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    init_with_filter("info");
}

/// Initialize logging with `filter` unless `RUST_LOG` is set
pub fn init_with_filter(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already initialized");
    }
}

/// Initialize logging for tests; output is captured by the test harness
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
