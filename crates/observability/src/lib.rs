//! `shopdesk-observability` — tracing setup for binaries and tests.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` controls the filter; the
/// default is `info`. Safe to call more than once (later calls are no-ops),
/// which is what tests need.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init();
}

/// Human-readable output for local development.
pub fn init_pretty() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
