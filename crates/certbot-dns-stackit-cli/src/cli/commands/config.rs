//! `certbot-dns-stackit config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&ctx, &key, &value),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load_from(&ctx.config_path)?;
    let unset = || "(not set)".dimmed().to_string();

    println!("{}", "Current Configuration:".bold());
    println!();
    println!(
        "  {} {}",
        "credentials_file:".bold(),
        config
            .credentials_file
            .map_or_else(unset, |p| p.display().to_string())
    );
    println!(
        "  {} {}",
        "service_account_file:".bold(),
        config
            .service_account_file
            .map_or_else(unset, |p| p.display().to_string())
    );
    println!(
        "  {} {}",
        "project_id:".bold(),
        config.project_id.unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        "base_url:".bold(),
        config.base_url.unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        "propagation_seconds:".bold(),
        config
            .propagation_seconds
            .map_or_else(unset, |s| s.to_string())
    );
    println!(
        "  {} {}",
        "timeout_secs:".bold(),
        config.timeout_secs.map_or_else(unset, |s| s.to_string())
    );

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_from(&ctx.config_path)?;
    config.set(key, value)?;
    config.save_to(&ctx.config_path)?;

    println!("{} {} = {}", "Saved".green(), key.bold(), value);
    Ok(())
}
