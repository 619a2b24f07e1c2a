//! Logging setup for Hearth, built on the `tracing` ecosystem.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Intended for application startup and tests. Messages are filtered based
/// on the `RUST_LOG` environment variable, defaulting to the `info` level if
/// `RUST_LOG` is not set or is invalid. Errors during initialization (e.g.,
/// if a global subscriber is already set) are ignored, so the function is
/// safe to call more than once.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
