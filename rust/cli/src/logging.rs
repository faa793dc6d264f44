//! Diagnostic logging setup.
//!
//! The engine reports classification details through `tracing`. The binary
//! routes them to stderr so that records written to stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter: `RUST_LOG` if set, otherwise `verbose` raises the
/// engine to `debug`.
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,handparse_engine=debug,handparse_cli=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    })
}

/// Initialize logging for the binary. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
