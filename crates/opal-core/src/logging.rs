//! Diagnostic tracing for the opal binaries.
//!
//! Output goes to stderr so stdout carries only the dispatch result (or the
//! job outcome). Controlled by `RUST_LOG`; defaults to `warn`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the global tracing subscriber.
///
/// ```bash
/// RUST_LOG=opal_core=debug opal-dispatch builtin Echo /data 4 /out.csv k=v
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
