//! Tracing configuration for Netdata plugins.
//!
//! Logs go to the systemd journal when the agent runs with journal logging
//! configured (detected via NETDATA_SYSTEMD_JOURNAL_PATH), to stderr
//! otherwise. The agent forwards plugin stderr into its own log.

use tracing_subscriber::{EnvFilter, prelude::*};

/// Initialize tracing with automatic environment detection.
///
/// Respects RUST_LOG, otherwise uses the provided default filter. Falls back
/// to stderr when the journal is configured but unreachable.
pub fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    let journald_layer = if std::env::var_os("NETDATA_SYSTEMD_JOURNAL_PATH").is_some() {
        tracing_journald::layer().ok()
    } else {
        None
    };

    match journald_layer {
        Some(layer) => {
            registry.with(layer).init();
            tracing::info!(
                "tracing initialized, logging to systemd journal with filter '{}'",
                default_filter,
            );
        }
        None => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_ansi(false);
            registry.with(fmt_layer).init();
            tracing::info!(
                "tracing initialized, logging to stderr with filter '{}'",
                default_filter,
            );
        }
    }
}
