//! # Logging
//!
//! `tracing-subscriber` setup for the binaries. Logs go to stderr so the
//! rendered config on stdout stays machine-readable.

use crate::constants;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`; defaults to `hcs_agent_helm_config=info`, or `debug`
/// when `verbose` is set. Calling it twice is harmless.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "hcs_agent_helm_config=debug"
    } else {
        constants::DEFAULT_LOG_FILTER
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        // Already initialized (tests, embedding applications)
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}
