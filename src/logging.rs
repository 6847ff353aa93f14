// Diagnostic logging to stderr. `RUST_LOG` wins when set; otherwise
// `--verbose` turns on debug output for this crate (request and response
// details) and the default only shows warnings.

use tracing_subscriber::EnvFilter;

pub fn filter_for(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "warn,xpost=debug" } else { "warn" })
    })
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
