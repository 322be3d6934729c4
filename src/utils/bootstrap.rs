//! Process setup for binaries that embed the matchmaker.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;

/// Install a global fmt subscriber filtered by `MATCHMAKER_LOG`.
///
/// Exchange casts log at debug and "no active hosts" at warn, so
/// `MATCHMAKER_LOG=matchmaker_consul=debug` shows every resolution.
/// Falls back to `info` when the variable is unset or unparsable.
/// Panics if a global subscriber is already installed.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
