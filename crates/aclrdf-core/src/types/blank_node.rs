//! Synthetic blank-node labels for rule entities.

use std::fmt;

/// A blank node naming one emitted rule, rendered as `_:newruleN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode(u64);

impl BlankNode {
    /// Label prefix shared by every rule node.
    pub const PREFIX: &'static str = "newrule";

    /// Creates a blank node with the given ordinal.
    pub fn new(ordinal: u64) -> Self {
        Self(ordinal)
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}{}", Self::PREFIX, self.0)
    }
}

/// Hands out blank nodes in increasing order, starting at 1.
///
/// One sequence is used for a whole export run and is never reset between
/// groups, so every rule in a single output gets a distinct label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankNodeSequence {
    next: u64,
}

impl BlankNodeSequence {
    /// Creates a sequence whose first node is `_:newrule1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next node and advances the sequence.
    pub fn next_node(&mut self) -> BlankNode {
        let node = BlankNode(self.next);
        self.next += 1;
        node
    }

    /// Number of nodes handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for BlankNodeSequence {
    fn default() -> Self {
        Self::new()
    }
}
