//! Diagnostic logging.
//!
//! Stdout carries the oracle output and nothing else, so every `tracing`
//! event goes to stderr.  The filter is read from `WINPROBE_LOG`
//! (e.g. `WINPROBE_LOG=debug`) and defaults to `warn`.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "WINPROBE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global stderr subscriber.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
