//! Diagnostic logging setup.
//!
//! The engine never errors across its public contract; malformed catalog
//! data and hand-edited URLs degrade to the nearest valid state and leave a
//! trace event behind instead. This module wires those events to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter, e.g. `hubfind=debug`.
pub const LOG_ENV: &str = "HUBFIND_LOG";

/// Install the global subscriber. Call once, from the binary entry point;
/// repeated calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
