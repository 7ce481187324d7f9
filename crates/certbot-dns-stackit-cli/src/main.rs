//! certbot-dns-stackit - certbot manual hooks for STACKIT DNS
//!
//! Publishes and removes DNS-01 validation records when run as certbot's
//! `--manual-auth-hook` and `--manual-cleanup-hook`.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    certbot_dns_stackit_cli::run().await
}
