//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

const FALLBACK_FILTER: &str = "warn";

/// Build the log filter from a directive string, falling back to `warn`
/// when the directive does not parse.
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Install the global subscriber; logs go to stderr so command output stays clean.
///
/// Calling this more than once is harmless: later calls are ignored.
pub fn init_logging(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
