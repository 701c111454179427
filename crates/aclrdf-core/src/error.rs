//! Error types for the aclrdf export pipeline.

use std::path::PathBuf;

/// Errors that can occur while exporting ACL rules.
///
/// Every variant is fatal for the run: the binary reports it and exits
/// with status 1. Nothing is retried.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The database rejected the supplied credentials.
    #[error("Authentication error: {message}")]
    Authentication {
        /// Human-readable error message
        message: String,
    },

    /// The endpoint could not be reached or the channel broke.
    #[error("Connection error ({endpoint}): {message}")]
    Connection {
        /// Endpoint address that was being contacted
        endpoint: String,
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A network call did not finish within its deadline.
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        /// Which call timed out (connect, login, query)
        operation: &'static str,
        /// Timeout duration in seconds
        seconds: u64,
    },

    /// The query was rejected or failed on the server.
    #[error("Query error: {message}")]
    Query {
        /// Human-readable error message
        message: String,
    },

    /// The response or an embedded rule blob could not be decoded.
    #[error("Parse error: {message}")]
    Parse {
        /// What was being decoded and what went wrong
        message: String,
        /// Underlying JSON error if available
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The output destination already exists and will not be overwritten.
    #[error("Write error: output file already exists: {}", path.display())]
    OutputExists {
        /// Path of the existing file
        path: PathBuf,
    },

    /// Writing the rendered triples failed.
    #[error("Write error ({target}): {source}")]
    Write {
        /// Destination description (file path or "stdout")
        target: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration (flags, endpoint address).
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for aclrdf operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns a stable, lowercase name for the error's category.
    ///
    /// Used as a structured field in log events.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Authentication { .. } => "authentication",
            Error::Connection { .. } => "connection",
            Error::Timeout { .. } => "timeout",
            Error::Query { .. } => "query",
            Error::Parse { .. } => "parse",
            Error::OutputExists { .. } | Error::Write { .. } => "write",
            Error::Config { .. } => "config",
        }
    }

    /// Creates a new authentication error.
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Error::Authentication {
            message: message.into(),
        }
    }

    /// Creates a new connection error with a source error.
    pub fn connection_with_source<E, M, S>(endpoint: E, message: M, source: S) -> Self
    where
        E: Into<String>,
        M: Into<String>,
        S: std::error::Error + Send + Sync + 'static,
    {
        Error::Connection {
            endpoint: endpoint.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new query error.
    pub fn query<S: Into<String>>(message: S) -> Self {
        Error::Query {
            message: message.into(),
        }
    }

    /// Creates a new parse error without an underlying JSON error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new parse error wrapping a JSON error.
    pub fn parse_with_source<S: Into<String>>(message: S, source: serde_json::Error) -> Self {
        Error::Parse {
            message: format!("{}: {source}", message.into()),
            source: Some(source),
        }
    }

    /// Creates a new write error.
    pub fn write<S: Into<String>>(target: S, source: std::io::Error) -> Self {
        Error::Write {
            target: target.into(),
            source,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_display() {
        let err = Error::authentication("invalid username or password");
        assert_eq!(
            err.to_string(),
            "Authentication error: invalid username or password"
        );
        assert_eq!(err.category(), "authentication");
    }

    #[test]
    fn test_connection_display_includes_endpoint() {
        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        let err = Error::connection_with_source("localhost:9180", "connection refused", refused);
        assert_eq!(
            err.to_string(),
            "Connection error (localhost:9180): connection refused"
        );
        assert_eq!(err.category(), "connection");
    }

    #[test]
    fn test_connection_with_source_keeps_source() {
        let io_error = std::io::Error::other("network failure");
        let err = Error::connection_with_source("alpha:9080", "dial failed", io_error);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "network failure");
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::Timeout {
            operation: "login",
            seconds: 3,
        };
        assert_eq!(err.to_string(), "login timed out after 3s");
        assert_eq!(err.category(), "timeout");
    }

    #[test]
    fn test_parse_with_source_mentions_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err = Error::parse_with_source("rules of group 0x1", json_err);
        assert!(err.to_string().starts_with("Parse error: rules of group 0x1: "));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.category(), "parse");
    }

    #[test]
    fn test_output_exists_is_write_category() {
        let err = Error::OutputExists {
            path: PathBuf::from("acl_rules.rdf"),
        };
        assert_eq!(
            err.to_string(),
            "Write error: output file already exists: acl_rules.rdf"
        );
        assert_eq!(err.category(), "write");
    }

    #[test]
    fn test_write_error_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::write("/root/out.rdf", io_error);
        assert_eq!(err.to_string(), "Write error (/root/out.rdf): denied");
        assert_eq!(err.category(), "write");
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("username must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: username must not be empty"
        );
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
