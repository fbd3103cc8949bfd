//! # Logging
//!
//! Installs the process-wide `tracing` subscriber.
//!
//! `RUST_LOG` wins when set; otherwise `DEFAULT_FILTER` applies. Output goes
//! to stderr so stdout stays free for command output.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,boffo=debug,reqwest=warn";

/// Builds the filter from `RUST_LOG`, falling back to `default_filter`.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs the fmt subscriber. Later calls are no-ops.
pub fn init_tracing(default_filter: &str) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(default_filter, "Tracing initialized");
    }
}
