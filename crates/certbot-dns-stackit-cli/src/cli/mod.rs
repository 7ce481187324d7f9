//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use certbot_dns_stackit::CredentialsConfig;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_init(cli.verbose);

    // Load configuration
    let config_path = match cli.config_file {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;
    tracing::debug!(path = %config_path.display(), "loaded configuration");

    // Flags and env vars win over the config file
    let credentials = config.credentials(CredentialsConfig {
        credentials_file: cli.credentials,
        service_account_file: cli.service_account,
        project_id: cli.project_id,
        base_url: cli.base_url,
    });

    // Create context for commands
    let ctx = commands::Context {
        credentials,
        timeout: cli.timeout.or(config.timeout_secs).map(Duration::from_secs),
        propagation_seconds: config.propagation_seconds,
        config_path,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Perform(args) => commands::hook::perform(ctx, args).await,
        Commands::Cleanup(args) => commands::hook::cleanup(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Log to stderr so certbot shows hook diagnostics.
fn tracing_init(verbose: bool) {
    let default_filter = if verbose {
        "certbot_dns_stackit=debug,stackit_dns_client=debug,certbot_dns_stackit_cli=debug"
    } else {
        "certbot_dns_stackit=info,stackit_dns_client=info,certbot_dns_stackit_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
