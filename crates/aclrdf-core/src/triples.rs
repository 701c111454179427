//! RDF triple rendering for ACL rules.
//!
//! Each rule becomes a blank node linked from its group:
//!
//! ```text
//! <0x1> <dgraph.acl.rule> _:newrule1 .
//! _:newrule1 <dgraph.rule.predicate> "name" .
//! _:newrule1 <dgraph.rule.permission> "4" .
//! ```

use crate::decode::decode_rules;
use crate::error::Result;
use crate::types::{BlankNode, BlankNodeSequence, Group, Rule};

/// Edge from a group to one of its rule nodes.
pub const ACL_RULE_PREDICATE: &str = "dgraph.acl.rule";
/// Rule node attribute naming the protected predicate.
pub const RULE_PREDICATE_PREDICATE: &str = "dgraph.rule.predicate";
/// Rule node attribute holding the permission value.
pub const RULE_PERMISSION_PREDICATE: &str = "dgraph.rule.permission";

/// Formats the three-triple block for one rule.
///
/// Pure: the blank node is chosen by the caller.
pub fn format_rule(group_uid: &str, rule: &Rule, node: BlankNode) -> String {
    format!(
        "<{group_uid}> <{ACL_RULE_PREDICATE}> {node} .\n\
         {node} <{RULE_PREDICATE_PREDICATE}> \"{predicate}\" .\n\
         {node} <{RULE_PERMISSION_PREDICATE}> \"{permission}\" .\n",
        predicate = escape_literal(&rule.predicate),
        permission = rule.permission,
    )
}

/// Escapes a string for use inside an N-Triples quoted literal.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Append-only buffer of rendered triple blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleBatch {
    text: String,
    blocks: usize,
}

impl TripleBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the block for one rule, drawing its node from `seq`.
    pub fn push_rule(&mut self, group_uid: &str, rule: &Rule, seq: &mut BlankNodeSequence) {
        let node = seq.next_node();
        self.text.push_str(&format_rule(group_uid, rule, node));
        self.blocks += 1;
    }

    /// Number of rule blocks appended.
    pub fn len(&self) -> usize {
        self.blocks
    }

    /// Returns `true` if no block has been appended.
    pub fn is_empty(&self) -> bool {
        self.blocks == 0
    }

    /// The rendered text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the batch, returning the rendered text.
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Counters describing one rendering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Groups in the response
    pub groups: usize,
    /// Groups that had no rules
    pub empty_groups: usize,
    /// Rule blocks emitted
    pub rules: usize,
}

/// Renders every rule of every group.
///
/// All rule blobs are decoded before anything is formatted, so a malformed
/// blob fails the call without producing a partial batch.
///
/// # Errors
///
/// Returns [`Error::Parse`](crate::Error::Parse) for the first group whose
/// rule blob cannot be decoded.
pub fn render_groups(
    groups: &[Group],
    seq: &mut BlankNodeSequence,
) -> Result<(TripleBatch, RenderStats)> {
    let decoded = groups
        .iter()
        .map(|group| decode_rules(group).map(|rules| (group, rules)))
        .collect::<Result<Vec<_>>>()?;

    let mut batch = TripleBatch::new();
    let mut stats = RenderStats {
        groups: groups.len(),
        ..RenderStats::default()
    };

    for (group, rules) in decoded {
        tracing::debug!(
            uid = %group.uid,
            group = %group.display_name(),
            rules = rules.len(),
            "Rendering group"
        );
        if rules.is_empty() {
            stats.empty_groups += 1;
            continue;
        }
        for rule in &rules {
            batch.push_rule(&group.uid, rule, seq);
        }
        stats.rules += rules.len();
    }

    Ok((batch, stats))
}

/// Renders a human-readable one-line summary of the stats.
pub fn describe(stats: &RenderStats) -> String {
    let mut out = format!("{} rule(s) from {} group(s)", stats.rules, stats.groups);
    if stats.empty_groups > 0 {
        out.push_str(&format!(", {} group(s) without rules", stats.empty_groups));
    }
    out
}
