#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Dgraph adapter for aclrdf
//!
//! A minimal gRPC client for a Dgraph alpha: it logs in, runs read-only
//! queries, and exposes the ACL group query as an
//! [`AclSource`](aclrdf_core::AclSource).

pub mod client;
pub mod proto;
pub mod source;
mod status;

pub use client::{ConnectOptions, Credentials, DEFAULT_ALPHA, DgraphClient};
pub use source::{DgraphSource, GROUP_ACL_QUERY};
