//! The export pipeline: fetch, decode, render, write.

use crate::decode::decode_groups;
use crate::error::Result;
use crate::output::OutputTarget;
use crate::source::AclSource;
use crate::triples::{RenderStats, describe, render_groups};
use crate::types::BlankNodeSequence;

/// What an export run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Rendering counters
    pub stats: RenderStats,
    /// Bytes written to the destination
    pub bytes: usize,
    /// Destination description
    pub target: String,
}

/// Runs one export from `source` into `target`.
///
/// Nothing is written unless every earlier step succeeded.
///
/// # Errors
///
/// Propagates the first failure: a bad destination (checked before the
/// source is queried), a query failure, or a parse failure.
pub async fn export(source: &dyn AclSource, target: &OutputTarget) -> Result<ExportSummary> {
    target.preflight()?;

    tracing::info!(source = %source.describe(), "Fetching ACL groups");
    let payload = source.fetch_acl_json().await?;
    tracing::debug!(bytes = payload.len(), "Received query response");

    let groups = decode_groups(&payload)?;
    tracing::info!(groups = groups.len(), "Decoded groups");

    let mut seq = BlankNodeSequence::new();
    let (batch, stats) = render_groups(&groups, &mut seq)?;

    let text = batch.into_string();
    target.write(&text)?;

    tracing::info!(destination = %target, "Exported {}", describe(&stats));

    Ok(ExportSummary {
        stats,
        bytes: text.len(),
        target: target.to_string(),
    })
}
