use std::env;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Builds the filter from `RUST_LOG`-style directives, `info` when unset or invalid.
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Installs the stdout subscriber shared by every binary.
///
/// `RUST_LOG` replaces the default `info` level, e.g. `RUST_LOG=debug` shows
/// skipped logs and parsed rows.
pub fn init_logging() {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(directives.as_deref()))
        .with(stdout_layer)
        .init();
}
