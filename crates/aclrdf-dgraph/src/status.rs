//! Mapping of gRPC statuses onto the export error taxonomy.

use std::time::Duration;

use aclrdf_core::Error;
use tonic::{Code, Status};

/// Which remote call produced a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Login,
    Query,
}

impl Call {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Call::Login => "login",
            Call::Query => "query",
        }
    }
}

/// Dgraph reports bad credentials with a plain error, not a dedicated code.
fn is_credential_failure(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("invalid username or password")
        || message.contains("unauthorized")
        || message.contains("no accessjwt available")
        || message.contains("token is expired")
}

pub(crate) fn status_to_error(
    endpoint: &str,
    call: Call,
    limit: Duration,
    status: Status,
) -> Error {
    match status.code() {
        Code::Unauthenticated | Code::PermissionDenied => {
            Error::authentication(status.message().to_string())
        }
        // tonic servers report an expired grpc-timeout as Cancelled
        Code::DeadlineExceeded | Code::Cancelled => Error::Timeout {
            operation: call.name(),
            seconds: limit.as_secs(),
        },
        Code::Unavailable => Error::connection_with_source(
            endpoint,
            format!("{} failed: {}", call.name(), status.message()),
            status,
        ),
        _ if is_credential_failure(status.message()) => {
            Error::authentication(status.message().to_string())
        }
        _ => match call {
            Call::Login => Error::connection_with_source(
                endpoint,
                format!("login failed: {}", status.message()),
                status,
            ),
            Call::Query => Error::query(status.message().to_string()),
        },
    }
}
