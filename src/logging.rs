//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. Reads the filter from `DHONDT_LOG`
/// (e.g. `DHONDT_LOG=dhondt=debug`) and falls back to `dhondt=warn`.
/// Logs go to stderr so that JSON written to stdout stays clean.
///
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("DHONDT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("dhondt=warn"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
