//! Command implementations.

pub mod config;
pub mod hook;

use certbot_dns_stackit::{CredentialsConfig, StackitAuthenticator};
use std::path::PathBuf;
use std::time::Duration;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Merged credential settings
    pub credentials: CredentialsConfig,

    /// DNS API request timeout
    pub timeout: Option<Duration>,

    /// Propagation wait from the config file
    pub propagation_seconds: Option<u64>,

    /// Config file in use
    pub config_path: PathBuf,
}

impl Context {
    /// Create an authenticator from the configured credentials.
    pub fn authenticator(&self) -> anyhow::Result<StackitAuthenticator> {
        let mut authenticator = StackitAuthenticator::from_config(self.credentials.clone())
            .map_err(|e| {
                anyhow::anyhow!(
                    "{e}\n\n\
                     Provide credentials with one of:\n  \
                     1. --credentials <INI> (project_id, auth_token)\n  \
                     2. --service-account <JSON> --project-id <ID>\n  \
                     3. certbot-dns-stackit config set credentials_file <INI>"
                )
            })?;

        if let Some(timeout) = self.timeout {
            authenticator = authenticator.with_timeout(timeout);
        }

        Ok(authenticator)
    }
}
