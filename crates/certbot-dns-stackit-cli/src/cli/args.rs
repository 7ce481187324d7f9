//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// certbot manual hooks for STACKIT DNS
///
/// Run `perform` as --manual-auth-hook and `cleanup` as
/// --manual-cleanup-hook. certbot provides CERTBOT_DOMAIN and
/// CERTBOT_VALIDATION.
#[derive(Parser, Debug)]
#[command(name = "certbot-dns-stackit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// INI credentials file with project_id and auth_token
    #[arg(short = 'c', long, env = "STACKIT_CREDENTIALS", global = true)]
    pub credentials: Option<PathBuf>,

    /// Service account key file (takes priority over --credentials)
    #[arg(long, env = "STACKIT_SERVICE_ACCOUNT_KEY_PATH", global = true)]
    pub service_account: Option<PathBuf>,

    /// STACKIT project id, required with --service-account
    #[arg(long, env = "STACKIT_PROJECT_ID", global = true)]
    pub project_id: Option<String>,

    /// DNS API base URL
    #[arg(long, env = "STACKIT_DNS_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// DNS API request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Configuration file (default: platform config dir)
    #[arg(long = "config", global = true)]
    pub config_file: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish the validation token (manual auth hook)
    Perform(PerformArgs),

    /// Remove the validation record (manual cleanup hook)
    Cleanup(HookArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Hook commands
// ============================================================================

#[derive(Args, Debug)]
pub struct HookArgs {
    /// Domain being validated
    #[arg(long, env = "CERTBOT_DOMAIN")]
    pub domain: String,

    /// Validation token
    #[arg(long, env = "CERTBOT_VALIDATION")]
    pub validation: String,

    /// TXT record name (default: _acme-challenge.<domain>)
    #[arg(long)]
    pub validation_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct PerformArgs {
    #[command(flatten)]
    pub hook: HookArgs,

    /// Seconds to wait for DNS propagation after publishing (0 disables)
    #[arg(long)]
    pub propagation_seconds: Option<u64>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (credentials_file, service_account_file,
        /// project_id, base_url, propagation_seconds, timeout_secs)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}
