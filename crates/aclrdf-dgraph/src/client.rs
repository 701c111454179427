//! Authenticated gRPC session with a Dgraph alpha.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use aclrdf_core::{Error, Result};
use http::uri::PathAndQuery;
use prost::Message;
use tonic::codec::ProstCodec;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::{Channel, Endpoint};
use tonic::{GrpcMethod, IntoRequest};

use crate::proto::{self, Jwt, LoginRequest, Request, Response};
use crate::status::{Call, status_to_error};

/// Metadata key Dgraph reads the access token from.
const ACCESS_JWT_HEADER: &str = "accessjwt";

/// Default alpha gRPC address.
pub const DEFAULT_ALPHA: &str = "localhost:9180";

/// Username, password and namespace for `Login`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User id
    pub username: String,
    /// Password
    pub password: String,
    /// Namespace (0 is the default namespace)
    pub namespace: u64,
}

impl Credentials {
    /// Creates credentials for the default namespace.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            namespace: 0,
        }
    }

    /// Sets the namespace.
    pub fn with_namespace(mut self, namespace: u64) -> Self {
        self.namespace = namespace;
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Everything needed to open a session.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Alpha address, `host:port` or a full `http://` URI
    pub alpha: String,
    /// Login credentials
    pub credentials: Credentials,
    /// Limit for establishing the channel
    pub connect_timeout: Duration,
    /// Limit for the login call
    pub login_timeout: Duration,
    /// Limit for each query call
    pub query_timeout: Duration,
}

impl ConnectOptions {
    /// Creates options with the default timeouts (connect 5s, login 3s, query 5s).
    pub fn new(alpha: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            alpha: alpha.into(),
            credentials,
            connect_timeout: Duration::from_secs(5),
            login_timeout: Duration::from_secs(3),
            query_timeout: Duration::from_secs(5),
        }
    }
}

/// Turns an alpha address into a URI tonic can dial.
pub fn endpoint_uri(alpha: &str) -> Result<String> {
    let alpha = alpha.trim();
    if alpha.is_empty() {
        return Err(Error::config("alpha address must not be empty"));
    }
    if alpha.contains("://") {
        Ok(alpha.to_string())
    } else {
        Ok(format!("http://{alpha}"))
    }
}

async fn within<T, F>(operation: &'static str, limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| Error::Timeout {
            operation,
            seconds: limit.as_secs(),
        })?
}

/// A logged-in session. The channel is closed when the client is dropped.
pub struct DgraphClient {
    alpha: String,
    channel: Channel,
    access_jwt: MetadataValue<Ascii>,
    query_timeout: Duration,
}

impl fmt::Debug for DgraphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DgraphClient")
            .field("alpha", &self.alpha)
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}

impl DgraphClient {
    /// Opens a channel to the alpha and logs in.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the address is not a valid URI
    /// - [`Error::Connection`] if the alpha cannot be reached
    /// - [`Error::Authentication`] if the credentials are rejected
    /// - [`Error::Timeout`] if connecting or logging in takes too long
    pub async fn connect(options: &ConnectOptions) -> Result<Self> {
        let uri = endpoint_uri(&options.alpha)?;
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| Error::config(format!("invalid alpha address '{}': {e}", options.alpha)))?
            .connect_timeout(options.connect_timeout);

        tracing::debug!(alpha = %options.alpha, uri = %uri, "Connecting to Dgraph alpha");
        let channel = within("connect", options.connect_timeout, async {
            endpoint.connect().await.map_err(|e| {
                Error::connection_with_source(&options.alpha, "failed to open channel", e)
            })
        })
        .await?;

        let jwt = within(
            "login",
            options.login_timeout,
            login(channel.clone(), &options.alpha, &options.credentials, options.login_timeout),
        )
        .await?;

        let access_jwt = jwt
            .access_jwt
            .parse::<MetadataValue<Ascii>>()
            .map_err(|_| Error::authentication("login returned an unusable access token"))?;

        tracing::info!(
            alpha = %options.alpha,
            user = %options.credentials.username,
            namespace = options.credentials.namespace,
            "Logged in"
        );

        Ok(Self {
            alpha: options.alpha.clone(),
            channel,
            access_jwt,
            query_timeout: options.query_timeout,
        })
    }

    /// Address this client is connected to.
    pub fn alpha(&self) -> &str {
        &self.alpha
    }

    /// Runs `query` in a read-only transaction and returns the JSON result.
    ///
    /// # Errors
    ///
    /// - [`Error::Query`] if the server rejects the query
    /// - [`Error::Authentication`] if the session is no longer valid
    /// - [`Error::Connection`] if the channel broke
    /// - [`Error::Timeout`] if the call exceeds the query timeout
    pub async fn query_read_only(&self, query: &str) -> Result<Vec<u8>> {
        let limit = self.query_timeout;
        let response = within("query", limit, async {
            let mut request = Request::read_only(query).into_request();
            request.set_timeout(limit);
            request
                .metadata_mut()
                .insert(ACCESS_JWT_HEADER, self.access_jwt.clone());
            request
                .extensions_mut()
                .insert(GrpcMethod::new(proto::SERVICE, "Query"));

            unary::<Request, Response>(self.channel.clone(), proto::QUERY_PATH, request)
                .await
                .map_err(|status| status_to_error(&self.alpha, Call::Query, limit, status))
        })
        .await?;

        tracing::debug!(bytes = response.json.len(), "Query returned");
        Ok(response.json)
    }
}

async fn login(
    channel: Channel,
    alpha: &str,
    credentials: &Credentials,
    limit: Duration,
) -> Result<Jwt> {
    let mut request = LoginRequest {
        userid: credentials.username.clone(),
        password: credentials.password.clone(),
        namespace: credentials.namespace,
        ..LoginRequest::default()
    }
    .into_request();
    request.set_timeout(limit);
    request
        .extensions_mut()
        .insert(GrpcMethod::new(proto::SERVICE, "Login"));

    let response = unary::<LoginRequest, Response>(channel, proto::LOGIN_PATH, request)
        .await
        .map_err(|status| status_to_error(alpha, Call::Login, limit, status))?;

    let jwt = Jwt::decode(response.json.as_slice())
        .map_err(|e| Error::authentication(format!("login response carried no token: {e}")))?;
    if jwt.access_jwt.is_empty() {
        return Err(Error::authentication("login response carried an empty access token"));
    }
    Ok(jwt)
}

async fn unary<Req, Resp>(
    channel: Channel,
    path: &'static str,
    request: tonic::Request<Req>,
) -> std::result::Result<Resp, tonic::Status>
where
    Req: Message + Send + Sync + 'static,
    Resp: Message + Default + Send + Sync + 'static,
{
    let mut grpc = tonic::client::Grpc::new(channel);
    grpc.ready()
        .await
        .map_err(|e| tonic::Status::unavailable(format!("service was not ready: {e}")))?;
    let codec: ProstCodec<Req, Resp> = ProstCodec::default();
    let response = grpc
        .unary(request, PathAndQuery::from_static(path), codec)
        .await?;
    Ok(response.into_inner())
}
