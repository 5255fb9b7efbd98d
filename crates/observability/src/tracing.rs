//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` is unset: the client crates at info,
/// everything else (reqwest, sqlx, hyper) at warn to keep transport noise
/// out of the JSON stream.
pub const DEFAULT_FILTER: &str = "warn,kerala_app=info,kerala_client=info,kerala_session=info,kerala_shell=info,kerala_catalog=info";

/// Initialize tracing/logging for the embedding process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        EnvFilter::try_new(DEFAULT_FILTER).unwrap();
    }

    #[test]
    fn init_is_reentrant() {
        init();
        init();
    }
}
