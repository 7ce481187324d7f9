//! STACKIT DNS authenticator for DNS-01 challenges.
//!
//! Publishes the ACME validation token as a TXT record through the STACKIT
//! DNS API and removes it again once the challenge is done. The
//! certificate host drives the lifecycle through [`DnsAuthenticator`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use certbot_dns_stackit::{Credentials, DnsAuthenticator, StackitAuthenticator};
//!
//! #[tokio::main]
//! async fn main() -> certbot_dns_stackit::Result<()> {
//!     let credentials = Credentials::from_ini_file("/etc/letsencrypt/stackit.ini")?;
//!     let authenticator = StackitAuthenticator::new(credentials);
//!
//!     authenticator
//!         .perform("www.example.com", "_acme-challenge.www.example.com", "token")
//!         .await?;
//!     // ... let the ACME server validate ...
//!     authenticator
//!         .cleanup("www.example.com", "_acme-challenge.www.example.com", "token")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/certbot-dns-stackit/0.1.1")]

mod authenticator;

pub use authenticator::{DnsAuthenticator, StackitAuthenticator, DEFAULT_PROPAGATION_SECONDS};

// Re-export core types
pub use stackit_dns_core::*;

// Re-export client
pub use stackit_dns_client::{
    api, Credentials, CredentialsConfig, RemoveOutcome, ResolvedCredentials, ServiceAccountAuth,
    ServiceAccountKey, StackitClient, StackitClientBuilder, UpsertOutcome, DEFAULT_BASE_URL,
    DEFAULT_TOKEN_ENDPOINT,
};
