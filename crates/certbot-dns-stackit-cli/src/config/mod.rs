//! Configuration management.

use anyhow::Result;
use certbot_dns_stackit::CredentialsConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// INI credentials file.
    pub credentials_file: Option<PathBuf>,

    /// Service account key file.
    pub service_account_file: Option<PathBuf>,

    /// STACKIT project id.
    pub project_id: Option<String>,

    /// DNS API base URL.
    pub base_url: Option<String>,

    /// Seconds `perform` waits for DNS propagation.
    pub propagation_seconds: Option<u64>,

    /// DNS API request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("cloud", "stackit", "certbot-dns-stackit")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default file.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it does
    /// not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set a value by key name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "credentials_file" => self.credentials_file = Some(PathBuf::from(value)),
            "service_account_file" => self.service_account_file = Some(PathBuf::from(value)),
            "project_id" => self.project_id = Some(value.to_string()),
            "base_url" => self.base_url = Some(value.to_string()),
            "propagation_seconds" => self.propagation_seconds = Some(value.parse()?),
            "timeout_secs" => self.timeout_secs = Some(value.parse()?),
            _ => anyhow::bail!(
                "Unknown config key: {key}\n\n\
                 Valid keys: credentials_file, service_account_file, project_id, \
                 base_url, propagation_seconds, timeout_secs"
            ),
        }

        Ok(())
    }

    /// Credential settings, with `overrides` taking precedence per field.
    #[must_use]
    pub fn credentials(&self, overrides: CredentialsConfig) -> CredentialsConfig {
        CredentialsConfig {
            credentials_file: overrides
                .credentials_file
                .or_else(|| self.credentials_file.clone()),
            service_account_file: overrides
                .service_account_file
                .or_else(|| self.service_account_file.clone()),
            project_id: overrides.project_id.or_else(|| self.project_id.clone()),
            base_url: overrides.base_url.or_else(|| self.base_url.clone()),
        }
    }
}
