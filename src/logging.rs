//! Diagnostic logging.
//!
//! Progress lines for the user go to stdout through [`crate::output`]; this
//! module sets up `tracing` diagnostics on stderr. The level comes from
//! `RUST_LOG` when set (e.g. `RUST_LOG=post_import=debug`), otherwise `warn`,
//! or `debug` with `--verbose`.

use tracing_subscriber::{EnvFilter, fmt};

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Test-friendly variant; safe to call from many tests.
#[cfg(test)]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
