//! DNS-01 challenge authenticator.

use async_trait::async_trait;
use stackit_dns_client::{
    Credentials, CredentialsConfig, ServiceAccountAuth, StackitClient, StackitClientBuilder,
};
use stackit_dns_core::Result;
use std::time::Duration;
use tracing::info;

/// Seconds to wait for DNS propagation before asking for validation
pub const DEFAULT_PROPAGATION_SECONDS: u64 = 900;

/// The capability a certificate host expects from a DNS-01 authenticator.
///
/// `domain` is the name being validated, `validation_name` the TXT record
/// name (usually `_acme-challenge.<domain>`) and `validation` the token to
/// publish. Propagation waits are the host's business.
#[async_trait]
pub trait DnsAuthenticator: Send + Sync {
    /// Publish the validation token
    async fn perform(&self, domain: &str, validation_name: &str, validation: &str) -> Result<()>;

    /// Remove the validation record again
    async fn cleanup(&self, domain: &str, validation_name: &str, validation: &str) -> Result<()>;
}

/// STACKIT DNS authenticator
///
/// Every call resolves credentials and builds a fresh client, so a service
/// account token is never reused between `perform` and `cleanup`.
#[derive(Debug, Clone)]
pub struct StackitAuthenticator {
    credentials: Credentials,
    auth: ServiceAccountAuth,
    timeout: Option<Duration>,
}

impl StackitAuthenticator {
    /// Create an authenticator using `credentials`
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            auth: ServiceAccountAuth::new(),
            timeout: None,
        }
    }

    /// Create an authenticator from host settings
    pub fn from_config(config: CredentialsConfig) -> Result<Self> {
        Ok(Self::new(config.into_credentials()?))
    }

    /// Use `auth` for service account token exchanges
    #[must_use]
    pub fn with_service_account_auth(mut self, auth: ServiceAccountAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Set the timeout for DNS API requests
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Credentials in use
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolve credentials and build a DNS API client
    pub async fn client(&self) -> Result<StackitClient> {
        let resolved = self.credentials.resolve(&self.auth).await?;
        let mut builder = StackitClientBuilder::from_credentials(&resolved);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[async_trait]
impl DnsAuthenticator for StackitAuthenticator {
    async fn perform(&self, domain: &str, validation_name: &str, validation: &str) -> Result<()> {
        let outcome = self
            .client()
            .await?
            .validation()
            .upsert(domain, validation_name, validation)
            .await?;

        info!(domain, validation_name, ?outcome, "validation record published");
        Ok(())
    }

    async fn cleanup(&self, domain: &str, validation_name: &str, validation: &str) -> Result<()> {
        let outcome = self
            .client()
            .await?
            .validation()
            .remove(domain, validation_name, validation)
            .await?;

        info!(domain, validation_name, ?outcome, "validation record removed");
        Ok(())
    }
}
