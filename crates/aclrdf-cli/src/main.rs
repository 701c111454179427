//! aclrdf
//!
//! Reads ACL groups from a Dgraph alpha and writes their rules as RDF triples.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use aclrdf_cli::{Cli, ExportConfig, logging, run};
use aclrdf_core::triples::describe;
use anyhow::Result;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = ExportConfig::from_cli(&cli)?;
    tracing::debug!(?config, "Starting export");

    match run(&config).await {
        Ok(summary) => {
            tracing::debug!(bytes = summary.bytes, "Done: {}", describe(&summary.stats));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
