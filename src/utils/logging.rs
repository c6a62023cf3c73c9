// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the stderr diagnostics channel, filtered by `RUST_LOG` (default `info`).
///
/// The per-run audit trail is the other channel: [`RunLog`](crate::utils::RunLog)
/// writes its own file and mirrors each line into this subscriber, so call this
/// before creating one.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();
    tracing::debug!("Logging setup complete.");
}
