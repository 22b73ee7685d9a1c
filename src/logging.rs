//! Diagnostic logging to stderr
//!
//! Filtered by `AUTOREG_LOG` (falling back to `RUST_LOG`). Defaults to
//! warnings only, or debug output with `--verbose`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "AUTOREG_LOG";

pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "autoreg=debug" } else { "warn" }
}
