//! # certbot-dns-stackit-cli
//!
//! certbot manual hooks that fulfil DNS-01 challenges on STACKIT DNS.
//!
//! ```text
//! certbot certonly --manual --preferred-challenges dns \
//!     --manual-auth-hook "certbot-dns-stackit --credentials /etc/letsencrypt/stackit.ini perform" \
//!     --manual-cleanup-hook "certbot-dns-stackit --credentials /etc/letsencrypt/stackit.ini cleanup" \
//!     -d www.example.com
//! ```
//!
//! certbot passes the domain and token through `CERTBOT_DOMAIN` and
//! `CERTBOT_VALIDATION`.

pub mod cli;
pub mod config;

pub use cli::run;
