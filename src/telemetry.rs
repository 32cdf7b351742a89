//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing/logging for the process.
///
/// `RUST_LOG` wins when set; otherwise `level` is used, falling back to
/// `warn`. Logs go to stderr so stdout carries only the accounts CSV.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(Some("debug"));
        init(Some("not a [valid filter"));
        tracing::warn!("still logging");
    }
}
