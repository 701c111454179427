//! ACL group and rule records as returned by the database.

use serde::{Deserialize, Serialize};

/// A `Group` node with its ACL rules still in their embedded JSON form.
///
/// Dgraph stores a group's rules as a single string predicate
/// (`dgraph.group.acl`) whose value is itself a JSON array. The blob is kept
/// raw here and decoded in a separate step, see
/// [`decode_rules`](crate::decode::decode_rules).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Node identifier, e.g. `0x1`
    pub uid: String,

    /// Group name, used only for log context
    #[serde(rename = "dgraph.xid", default, skip_serializing_if = "Option::is_none")]
    pub xid: Option<String>,

    /// Raw JSON array of rules
    #[serde(rename = "dgraph.group.acl", default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
}

impl Group {
    /// Creates a group with no rule blob.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            xid: None,
            rules: None,
        }
    }

    /// Sets the raw rule blob.
    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// Sets the group name.
    pub fn with_xid(mut self, xid: impl Into<String>) -> Self {
        self.xid = Some(xid.into());
        self
    }

    /// Returns `true` if the group carries a non-blank rule blob.
    ///
    /// A missing blob and a blank string are treated the same way.
    pub fn has_rules(&self) -> bool {
        self.rules.as_deref().is_some_and(|r| !r.trim().is_empty())
    }

    /// Name for log output: the xid when known, otherwise the uid.
    pub fn display_name(&self) -> &str {
        self.xid.as_deref().unwrap_or(&self.uid)
    }
}

/// One (predicate, permission) pair of a group's ACL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Schema predicate the rule applies to
    pub predicate: String,

    /// Permission bitmask (read = 4, write = 2, modify = 1)
    #[serde(rename = "perm")]
    pub permission: i64,
}

impl Rule {
    /// Creates a new rule.
    pub fn new(predicate: impl Into<String>, permission: i64) -> Self {
        Self {
            predicate: predicate.into(),
            permission,
        }
    }
}
