//! The ACL group query, exposed as an [`AclSource`].

use aclrdf_core::{AclSource, Result};
use async_trait::async_trait;

use crate::client::{ConnectOptions, DgraphClient};

/// Fetches every `Group` node with its name and embedded ACL blob.
pub const GROUP_ACL_QUERY: &str = r#"
{
  me(func: type(Group)) {
    uid
    dgraph.xid
    dgraph.group.acl
  }
}
"#;

/// Reads ACL groups from a logged-in Dgraph session.
#[derive(Debug)]
pub struct DgraphSource {
    client: DgraphClient,
}

impl DgraphSource {
    /// Connects and logs in.
    ///
    /// # Errors
    ///
    /// See [`DgraphClient::connect`].
    pub async fn connect(options: &ConnectOptions) -> Result<Self> {
        let client = DgraphClient::connect(options).await?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AclSource for DgraphSource {
    async fn fetch_acl_json(&self) -> Result<Vec<u8>> {
        self.client.query_read_only(GROUP_ACL_QUERY).await
    }

    fn describe(&self) -> String {
        format!("dgraph alpha at {}", self.client.alpha())
    }
}
