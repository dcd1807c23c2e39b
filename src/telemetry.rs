use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` level; `log` records (actix's request logger) are
/// forwarded as well.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_names(true))
        .init();
}
