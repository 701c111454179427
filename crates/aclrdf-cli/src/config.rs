//! Validated run configuration.

use std::time::Duration;

use aclrdf_core::{Error, OutputTarget, Result};
use aclrdf_dgraph::{ConnectOptions, Credentials};

use crate::cli::Cli;

/// Everything one export run needs, checked for obvious mistakes.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// How to reach and log into the alpha
    pub connect: ConnectOptions,
    /// Where the triples go
    pub output: OutputTarget,
}

impl ExportConfig {
    /// Builds and validates a configuration from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty username or alpha address, an
    /// empty output path, or a zero timeout.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.alpha.trim().is_empty() {
            return Err(Error::config("--alpha must not be empty"));
        }
        if cli.username.trim().is_empty() {
            return Err(Error::config("--username is required"));
        }

        let output = if cli.stdout {
            OutputTarget::Stdout
        } else if cli.output.as_os_str().is_empty() {
            return Err(Error::config("--output must not be empty"));
        } else {
            OutputTarget::file(&cli.output)
        };

        let credentials = Credentials::new(cli.username.trim(), cli.password.clone())
            .with_namespace(cli.namespace);
        let mut connect = ConnectOptions::new(cli.alpha.trim(), credentials);
        connect.connect_timeout = seconds("--connect-timeout", cli.connect_timeout)?;
        connect.login_timeout = seconds("--login-timeout", cli.login_timeout)?;
        connect.query_timeout = seconds("--query-timeout", cli.query_timeout)?;

        Ok(Self { connect, output })
    }
}

fn seconds(flag: &str, value: u64) -> Result<Duration> {
    if value == 0 {
        return Err(Error::config(format!("{flag} must be at least 1 second")));
    }
    Ok(Duration::from_secs(value))
}
