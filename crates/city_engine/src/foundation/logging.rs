//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Honors `RUST_LOG`; defaults to `info` when it is unset. Calling it more
/// than once is harmless, which keeps tests and the app free to both call it.
pub fn init() {
    init_with_default("info");
}

/// Initialize logging with `filter` used when `RUST_LOG` is unset
pub fn init_with_default(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    // Only fails when a logger is already installed
    let _ = env_logger::Builder::from_env(env).format_timestamp_millis().try_init();
}
