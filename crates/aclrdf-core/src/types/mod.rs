//! Core data model for ACL export.

mod blank_node;
mod group;
mod proptests;

pub use blank_node::{BlankNode, BlankNodeSequence};
pub use group::{Group, Rule};
