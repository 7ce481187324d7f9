//! HTTP client for the STACKIT DNS API.
//!
//! This crate provides the [`StackitClient`] used to publish and remove
//! DNS-01 validation records, and the credential types that produce its
//! bearer token.
//!
//! ```rust,ignore
//! use stackit_dns_client::{Credentials, ServiceAccountAuth, StackitClient};
//!
//! let credentials = Credentials::from_ini_file("/etc/letsencrypt/stackit.ini")?;
//! let resolved = credentials.resolve(&ServiceAccountAuth::new()).await?;
//! let client = StackitClient::from_credentials(&resolved)?;
//!
//! client
//!     .validation()
//!     .upsert("www.example.com", "_acme-challenge.www.example.com", "token")
//!     .await?;
//! ```

#![doc(html_root_url = "https://docs.rs/stackit-dns-client/0.1.1")]

mod auth;
mod client;
mod config;
pub mod api;

pub use api::{RemoveOutcome, UpsertOutcome};
pub use auth::*;
pub use client::{StackitClient, StackitClientBuilder, DEFAULT_BASE_URL};
pub use config::*;
pub use stackit_dns_core::{Result, StackitError};
