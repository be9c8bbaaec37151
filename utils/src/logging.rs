//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the tracing subscriber with sensible defaults.
///
/// Respects the `RUST_LOG` environment variable for filtering; falls back
/// to `info` when unset.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .init();
}

/// Initialize the tracing subscriber emitting one JSON object per line,
/// for log collectors.
pub fn init_tracing_json() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(default_filter())
        .init();
}
