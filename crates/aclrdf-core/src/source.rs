//! Source of the raw group query response.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Anything that can run the group query and hand back its JSON payload.
#[async_trait]
pub trait AclSource: Send + Sync {
    /// Runs the group query and returns the raw JSON response.
    async fn fetch_acl_json(&self) -> Result<Vec<u8>>;

    /// Short description for log output.
    fn describe(&self) -> String;
}

/// In-memory source returning a canned payload, for tests and dry runs.
#[derive(Debug)]
pub struct MockAclSource {
    response: std::result::Result<Vec<u8>, String>,
    calls: AtomicUsize,
}

impl MockAclSource {
    /// Creates a source that always returns `payload`.
    pub fn with_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Ok(payload.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a source whose query always fails with a query error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times the query has been run.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AclSource for MockAclSource {
    async fn fetch_acl_json(&self) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(payload) => Ok(payload.clone()),
            Err(message) => Err(Error::query(message.clone())),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
