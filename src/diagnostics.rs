//! Internal diagnostics via `tracing`
//!
//! The crate reports its own problems (invalid filter fallbacks, failed
//! stdout writes, config changes) through `tracing` events on stderr. They
//! never mix with trace output on stdout.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber honoring `RUST_LOG`
///
/// With `debug`, everything down to `TRACE` is shown. Returns `false` if a
/// global subscriber was already installed.
pub fn init_diagnostics(debug: bool) -> bool {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
