//! Two-pass decoding of the group query response.
//!
//! The response envelope is decoded first ([`decode_groups`]). Each group's
//! rule list is a JSON document embedded as a string, and is decoded on its
//! own afterwards ([`decode_rules`]) so a bad blob can be reported against
//! the group that carries it.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{Group, Rule};

/// Top-level key the group query binds its results to.
pub const RESPONSE_KEY: &str = "me";

/// Longest excerpt of a payload quoted in an error message.
const EXCERPT_LEN: usize = 120;

/// Decodes the query response envelope into its groups.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the payload is not a JSON object, if the
/// [`RESPONSE_KEY`] entry is absent, or if it is not a list of groups.
pub fn decode_groups(payload: &[u8]) -> Result<Vec<Group>> {
    let envelope: Value = serde_json::from_slice(payload)
        .map_err(|e| Error::parse_with_source("response is not valid JSON", e))?;

    let Value::Object(mut fields) = envelope else {
        return Err(Error::parse(format!(
            "expected a JSON object at the top level, got: {}",
            excerpt(payload)
        )));
    };

    let groups = fields.remove(RESPONSE_KEY).ok_or_else(|| {
        Error::parse(format!(
            "unable to parse ACLs: key '{RESPONSE_KEY}' missing from response: {}",
            excerpt(payload)
        ))
    })?;

    Vec::<Group>::deserialize(groups).map_err(|e| {
        Error::parse_with_source(format!("invalid group list under '{RESPONSE_KEY}'"), e)
    })
}

/// Decodes the embedded rule blob of one group.
///
/// A missing or blank blob, or a JSON `null`, yields an empty list.
///
/// # Errors
///
/// Returns [`Error::Parse`] naming the group if the blob is not a JSON list
/// of rules.
pub fn decode_rules(group: &Group) -> Result<Vec<Rule>> {
    if !group.has_rules() {
        return Ok(Vec::new());
    }
    let blob = group.rules.as_deref().unwrap_or_default();
    let rules: Option<Vec<Rule>> = serde_json::from_str(blob).map_err(|e| {
        Error::parse_with_source(format!("invalid rules for group {}", group.uid), e)
    })?;
    Ok(rules.unwrap_or_default())
}

fn excerpt(payload: &[u8]) -> String {
    let text = String::from_utf8_lossy(payload);
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}
