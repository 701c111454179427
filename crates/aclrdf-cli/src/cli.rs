//! Command-line arguments.

use std::path::PathBuf;

use aclrdf_core::output::DEFAULT_OUTPUT_FILE;
use aclrdf_dgraph::DEFAULT_ALPHA;
use clap::Parser;

/// Export Dgraph ACL groups and rules as RDF triples
#[derive(Parser, Debug, Clone)]
#[command(name = "aclrdf", version, about, long_about = None)]
pub struct Cli {
    /// Alpha gRPC endpoint
    #[arg(long, env = "ACLRDF_ALPHA", default_value = DEFAULT_ALPHA)]
    pub alpha: String,

    /// Username
    #[arg(long, env = "ACLRDF_USERNAME", default_value = "")]
    pub username: String,

    /// Password
    #[arg(
        long,
        env = "ACLRDF_PASSWORD",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// Namespace to log into
    #[arg(long, env = "ACLRDF_NAMESPACE", default_value_t = 0)]
    pub namespace: u64,

    /// Destination file; never overwritten
    #[arg(short, long, env = "ACLRDF_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Print triples to standard output instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Seconds allowed for opening the connection
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub connect_timeout: u64,

    /// Seconds allowed for the login call
    #[arg(long, value_name = "SECS", default_value_t = 3)]
    pub login_timeout: u64,

    /// Seconds allowed for the query call
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub query_timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
