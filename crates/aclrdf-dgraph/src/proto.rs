//! Protobuf messages of the Dgraph `api` package.
//!
//! Only the messages and fields used by the login and query calls are
//! declared. Field tags match Dgraph's `api.proto`; fields the server sends
//! that are not declared here are skipped by the decoder.

use std::collections::HashMap;
use std::fmt;

/// Fully-qualified gRPC service name.
pub const SERVICE: &str = "api.Dgraph";
/// Path of the `Login` method.
pub const LOGIN_PATH: &str = "/api.Dgraph/Login";
/// Path of the `Query` method.
pub const QUERY_PATH: &str = "/api.Dgraph/Query";

/// Credentials sent to `Login`.
#[derive(Clone, PartialEq, prost::Message)]
#[prost(skip_debug)]
pub struct LoginRequest {
    /// User id
    #[prost(string, tag = "1")]
    pub userid: String,
    /// Plain-text password
    #[prost(string, tag = "2")]
    pub password: String,
    /// Refresh token, used instead of a password to renew a session
    #[prost(string, tag = "3")]
    pub refresh_token: String,
    /// Namespace to log into (0 is the default namespace)
    #[prost(uint64, tag = "4")]
    pub namespace: u64,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("userid", &self.userid)
            .field("password", &"<redacted>")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

/// Token pair carried, serialized, in the `json` field of a login response.
#[derive(Clone, PartialEq, prost::Message)]
#[prost(skip_debug)]
pub struct Jwt {
    /// Short-lived access token
    #[prost(string, tag = "1")]
    pub access_jwt: String,
    /// Token used to obtain a new access token
    #[prost(string, tag = "2")]
    pub refresh_jwt: String,
}

impl fmt::Debug for Jwt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jwt")
            .field("access_jwt", &"<redacted>")
            .field("refresh_jwt", &"<redacted>")
            .finish()
    }
}

/// Response encoding requested from `Query`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum RespFormat {
    /// JSON payload in `Response::json`
    Json = 0,
    /// RDF payload in `Response::rdf`
    Rdf = 1,
}

/// A query (and optionally mutation) request.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Request {
    /// Transaction start timestamp (0 lets the server choose)
    #[prost(uint64, tag = "1")]
    pub start_ts: u64,
    /// DQL query text
    #[prost(string, tag = "4")]
    pub query: String,
    /// Query variables
    #[prost(map = "string, string", tag = "5")]
    pub vars: HashMap<String, String>,
    /// Run in a read-only transaction
    #[prost(bool, tag = "6")]
    pub read_only: bool,
    /// Allow stale reads (only valid with `read_only`)
    #[prost(bool, tag = "7")]
    pub best_effort: bool,
    /// Commit immediately after mutations
    #[prost(bool, tag = "13")]
    pub commit_now: bool,
    /// Requested response encoding
    #[prost(enumeration = "RespFormat", tag = "14")]
    pub resp_format: i32,
}

impl Request {
    /// Creates a read-only JSON query request.
    pub fn read_only(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            read_only: true,
            resp_format: RespFormat::Json as i32,
            ..Self::default()
        }
    }
}

/// Transaction metadata returned with a response.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TxnContext {
    /// Start timestamp
    #[prost(uint64, tag = "1")]
    pub start_ts: u64,
    /// Commit timestamp
    #[prost(uint64, tag = "2")]
    pub commit_ts: u64,
    /// Whether the transaction was aborted
    #[prost(bool, tag = "3")]
    pub aborted: bool,
    /// Conflict keys
    #[prost(string, repeated, tag = "4")]
    pub keys: Vec<String>,
    /// Predicates touched
    #[prost(string, repeated, tag = "5")]
    pub preds: Vec<String>,
}

/// Response to `Login` and `Query`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Response {
    /// JSON query result (or a serialized [`Jwt`] for `Login`)
    #[prost(bytes = "vec", tag = "1")]
    pub json: Vec<u8>,
    /// Transaction metadata
    #[prost(message, optional, tag = "2")]
    pub txn: Option<TxnContext>,
    /// Blank-node to uid assignments from mutations
    #[prost(map = "string, string", tag = "12")]
    pub uids: HashMap<String, String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_read_only_request_wire_bytes() {
        let bytes = Request::read_only("q").encode_to_vec();
        // field 4 (len-delimited) = "q", field 6 (varint) = true
        assert_eq!(bytes, vec![0x22, 0x01, b'q', 0x30, 0x01]);
    }

    #[test]
    fn test_login_request_wire_bytes() {
        let request = LoginRequest {
            userid: "u".to_string(),
            password: "p".to_string(),
            namespace: 2,
            ..LoginRequest::default()
        };
        assert_eq!(
            request.encode_to_vec(),
            vec![0x0a, 0x01, b'u', 0x12, 0x01, b'p', 0x20, 0x02]
        );
    }

    #[test]
    fn test_jwt_decodes_from_login_payload() {
        // access_jwt = "abc", refresh_jwt = "r"
        let payload = [0x0a, 0x03, b'a', b'b', b'c', 0x12, 0x01, b'r'];
        let jwt = Jwt::decode(payload.as_slice()).unwrap();
        assert_eq!(jwt.access_jwt, "abc");
        assert_eq!(jwt.refresh_jwt, "r");
    }

    #[test]
    fn test_response_skips_undeclared_fields() {
        // field 1 = "{}", field 3 (latency, undeclared) = empty message
        let payload = [0x0a, 0x02, b'{', b'}', 0x1a, 0x00];
        let response = Response::decode(payload.as_slice()).unwrap();
        assert_eq!(response.json, b"{}");
        assert!(response.txn.is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let request = LoginRequest {
            userid: "groot".to_string(),
            password: "hunter2".to_string(),
            ..LoginRequest::default()
        };
        let rendered = format!("{request:?}");
        assert!(rendered.contains("groot"));
        assert!(!rendered.contains("hunter2"));

        let jwt = Jwt {
            access_jwt: "secret-token".to_string(),
            refresh_jwt: String::new(),
        };
        assert!(!format!("{jwt:?}").contains("secret-token"));
    }
}
