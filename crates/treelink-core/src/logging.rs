//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter
pub const LOG_ENV: &str = "TREELINK_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid
pub const DEFAULT_FILTER: &str = "warn";

/// Install a fmt subscriber filtered by [`LOG_ENV`]
///
/// Returns `false` when a global subscriber is already set, so calling this
/// from every test is fine.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
