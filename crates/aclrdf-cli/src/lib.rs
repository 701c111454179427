//! # aclrdf-cli
//!
//! Command-line front end for aclrdf: argument parsing, configuration
//! validation, logging setup and the connect-then-export run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod logging;

pub use cli::Cli;
pub use config::ExportConfig;

use aclrdf_core::{ExportSummary, Result, export};
use aclrdf_dgraph::DgraphSource;

/// Checks the destination, connects, and exports.
///
/// The destination is checked before the alpha is contacted, so a run that
/// would fail to write makes no network call. The session is dropped, and its
/// channel closed, when this returns.
pub async fn run(config: &ExportConfig) -> Result<ExportSummary> {
    config.output.preflight()?;
    let source = DgraphSource::connect(&config.connect).await?;
    export(&source, &config.output).await
}
