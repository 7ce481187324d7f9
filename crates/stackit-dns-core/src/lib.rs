//! Core types and errors for the STACKIT DNS API client.
//!
//! This crate provides the foundational types shared by the client and the
//! certbot authenticator:
//!
//! - **Types**: Wire representations of zones, record sets and records, plus
//!   the request payloads sent to the DNS API
//! - **Errors**: Structured failures with [`StackitError`]
//!
//! # Example
//!
//! ```rust
//! use stackit_dns_core::{absolute_name, RecordSet};
//!
//! assert_eq!(absolute_name("_acme-challenge.example.com"), "_acme-challenge.example.com.");
//!
//! let rrset: RecordSet = serde_json::from_str(
//!     r#"{"id": "r1", "records": [{"id": "a", "content": "token"}]}"#,
//! ).unwrap();
//! assert!(rrset.contains_content("token"));
//! ```

#![doc(html_root_url = "https://docs.rs/stackit-dns-core/0.1.1")]

mod error;
pub mod types;

pub use error::{Result, StackitError};
pub use types::*;
