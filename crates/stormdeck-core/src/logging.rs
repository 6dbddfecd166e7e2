//! Logging setup built on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Default directive set: workspace crates at `debug`, everything else at `info`.
pub const DEFAULT_FILTER: &str =
    "info,stormdeck=debug,stormdeck_core=debug,stormdeck_store=debug,stormdeck_layout=debug,stormdeck_pane=debug";

/// Install a global fmt subscriber. `RUST_LOG` overrides the default directives.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Install a global fmt subscriber with explicit directives.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .try_init()
        .is_ok()
}
