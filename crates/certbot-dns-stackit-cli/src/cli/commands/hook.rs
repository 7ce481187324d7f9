//! `certbot-dns-stackit perform|cleanup` - certbot manual hooks.

use anyhow::{Context as _, Result};
use certbot_dns_stackit::{validation_name, DnsAuthenticator, DEFAULT_PROPAGATION_SECONDS};
use std::time::Duration;
use tracing::info;

use super::Context;
use crate::cli::args::{HookArgs, PerformArgs};

pub async fn perform(ctx: Context, args: PerformArgs) -> Result<()> {
    let name = record_name(&args.hook);
    let authenticator = ctx.authenticator()?;

    authenticator
        .perform(&args.hook.domain, &name, &args.hook.validation)
        .await
        .with_context(|| format!("publishing DNS-01 validation for {}", args.hook.domain))?;

    let wait = propagation_wait(args.propagation_seconds, ctx.propagation_seconds);
    if !wait.is_zero() {
        info!(seconds = wait.as_secs(), "waiting for DNS propagation");
        tokio::time::sleep(wait).await;
    }

    Ok(())
}

pub async fn cleanup(ctx: Context, args: HookArgs) -> Result<()> {
    let name = record_name(&args);
    let authenticator = ctx.authenticator()?;

    authenticator
        .cleanup(&args.domain, &name, &args.validation)
        .await
        .with_context(|| format!("removing DNS-01 validation for {}", args.domain))?;

    Ok(())
}

/// Record name from the flag, or certbot's `_acme-challenge` convention.
fn record_name(args: &HookArgs) -> String {
    args.validation_name
        .clone()
        .unwrap_or_else(|| validation_name(&args.domain))
}

/// Flag first, then config file, then the plugin default.
fn propagation_wait(flag: Option<u64>, config: Option<u64>) -> Duration {
    Duration::from_secs(flag.or(config).unwrap_or(DEFAULT_PROPAGATION_SECONDS))
}
