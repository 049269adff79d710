//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DEFAULT_LOG_FILTER;

/// Install the global subscriber. Falls back to the default filter when
/// `directive` does not parse. Call once, from `main`.
pub fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("ignoring invalid log filter {directive:?}: {err}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
