//! Logging setup via `tracing` and `tracing-subscriber`.
//!
//! Verbosity comes from the CLI flags; `RUST_LOG` overrides it when set.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber, writing to stderr.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
