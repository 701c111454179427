#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! aclrdf core library
//!
//! Data model, decoding and RDF formatting for exporting Dgraph ACL groups.
//!
//! The crate is transport-agnostic: anything that can produce the raw JSON
//! query response implements [`AclSource`], and [`export()`] drives the rest of
//! the pipeline (decode, format, write).

pub mod decode;
pub mod error;
pub mod export;
pub mod output;
pub mod source;
pub mod triples;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use export::{ExportSummary, export};
pub use output::OutputTarget;
pub use source::{AclSource, MockAclSource};
pub use types::{BlankNode, BlankNodeSequence, Group, Rule};
