//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,aclrdf=debug,aclrdf_cli=debug,aclrdf_core=debug,aclrdf_dgraph=debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout carries
/// only triples.
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
