//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `--verbose` shows everything down to debug. Otherwise `RUST_LOG` is
/// honoured, falling back to warnings only. Later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
