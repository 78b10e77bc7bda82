//! Tracing initialization.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for this process.
///
/// Respects `RUST_LOG`; safe to call more than once (subsequent calls are
/// no-ops because a global subscriber is already installed).
pub fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init();
}
