//! Credential configuration types.
//!
//! The host hands over either a certbot-style INI credentials file carrying a
//! static token, or a service account key file plus project id. Both resolve
//! into [`ResolvedCredentials`], which is all a [`crate::StackitClient`]
//! needs.

use crate::auth::{ServiceAccountAuth, ServiceAccountKey};
use crate::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use stackit_dns_core::{Result, StackitError};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix certbot puts in front of plugin credential keys
const CERTBOT_KEY_PREFIX: &str = "dns_stackit_";

/// Raw credential settings as provided by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// INI file with `project_id`, `auth_token` and optional `base_url`
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,

    /// Service account key file (JSON)
    #[serde(default)]
    pub service_account_file: Option<PathBuf>,

    /// Project id, required with a service account
    #[serde(default)]
    pub project_id: Option<String>,

    /// DNS API base URL override
    #[serde(default)]
    pub base_url: Option<String>,
}

impl CredentialsConfig {
    /// Decide which credentials to use.
    ///
    /// A service account takes priority over a credentials file.
    pub fn into_credentials(self) -> Result<Credentials> {
        if let Some(key_file) = self.service_account_file {
            let project_id = self.project_id.filter(|p| !p.is_empty()).ok_or_else(|| {
                StackitError::Config("a project id is required with a service account file".into())
            })?;

            return Ok(Credentials::ServiceAccount {
                key_file,
                project_id,
                base_url: self.base_url,
            });
        }

        match self.credentials_file {
            Some(path) => {
                let credentials = Credentials::from_ini_file(&path)?;
                Ok(match (credentials, self.base_url) {
                    (
                        Credentials::Static {
                            auth_token,
                            project_id,
                            base_url: None,
                        },
                        Some(base_url),
                    ) => Credentials::Static {
                        auth_token,
                        project_id,
                        base_url: Some(base_url),
                    },
                    (credentials, _) => credentials,
                })
            }
            None => Err(StackitError::Config(
                "either a credentials file or a service account file is required".into(),
            )),
        }
    }
}

/// How to authenticate against the DNS API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A long-lived API token
    Static {
        auth_token: String,
        project_id: String,
        base_url: Option<String>,
    },
    /// A service account key exchanged for a short-lived token
    ServiceAccount {
        key_file: PathBuf,
        project_id: String,
        base_url: Option<String>,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static {
                project_id,
                base_url,
                ..
            } => f
                .debug_struct("Static")
                .field("project_id", project_id)
                .field("base_url", base_url)
                .finish_non_exhaustive(),
            Self::ServiceAccount {
                key_file,
                project_id,
                base_url,
            } => f
                .debug_struct("ServiceAccount")
                .field("key_file", key_file)
                .field("project_id", project_id)
                .field("base_url", base_url)
                .finish(),
        }
    }
}

impl Credentials {
    /// Read static credentials from an INI credentials file
    pub fn from_ini_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StackitError::Config(format!(
                "could not read credentials file {}: {e}",
                path.display()
            ))
        })?;

        Self::from_ini(&content).map_err(|e| match e {
            StackitError::Config(msg) => {
                StackitError::Config(format!("credentials file {}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parse static credentials from INI content.
    ///
    /// Keys may carry certbot's `dns_stackit_` prefix.
    pub fn from_ini(content: &str) -> Result<Self> {
        let mut values = parse_ini(content)?;
        let mut take = |key: &str| values.remove(key).filter(|v| !v.is_empty());

        let project_id = take("project_id")
            .ok_or_else(|| StackitError::Config("missing required key project_id".into()))?;
        let auth_token = take("auth_token")
            .ok_or_else(|| StackitError::Config("missing required key auth_token".into()))?;
        let base_url = take("base_url");

        Ok(Self::Static {
            auth_token,
            project_id,
            base_url,
        })
    }

    /// Project the credentials belong to
    #[must_use]
    pub fn project_id(&self) -> &str {
        match self {
            Self::Static { project_id, .. } | Self::ServiceAccount { project_id, .. } => project_id,
        }
    }

    /// Produce a bearer token, exchanging a service account key if needed
    pub async fn resolve(&self, auth: &ServiceAccountAuth) -> Result<ResolvedCredentials> {
        match self {
            Self::Static {
                auth_token,
                project_id,
                base_url,
            } => Ok(ResolvedCredentials::new(
                auth_token.clone(),
                project_id.clone(),
                base_url.clone(),
            )),
            Self::ServiceAccount {
                key_file,
                project_id,
                base_url,
            } => {
                debug!(key_file = %key_file.display(), "using service account credentials");
                let key = ServiceAccountKey::load(key_file)?;
                let token = auth.access_token(&key).await?;
                Ok(ResolvedCredentials::new(
                    token,
                    project_id.clone(),
                    base_url.clone(),
                ))
            }
        }
    }
}

/// A bearer token ready for API calls
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    /// Bearer token
    pub token: String,
    /// Project id
    pub project_id: String,
    /// DNS API base URL
    pub base_url: String,
}

impl ResolvedCredentials {
    /// Bundle a token, falling back to the default base URL
    #[must_use]
    pub fn new(token: String, project_id: String, base_url: Option<String>) -> Self {
        Self {
            token,
            project_id,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Parse `key = value` lines. Sections are ignored, keys are lowercased and
/// stripped of the certbot prefix, values of surrounding quotes.
fn parse_ini(content: &str) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(['#', ';']) || line.starts_with('[') {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| {
            StackitError::Config(format!("line {}: expected `key = value`", lineno + 1))
        })?;

        let key = key.trim().to_ascii_lowercase();
        let key = key.strip_prefix(CERTBOT_KEY_PREFIX).unwrap_or(&key).to_string();
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);

        values.insert(key, value.to_string());
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_certbot_ini() {
        let credentials = Credentials::from_ini(
            "# STACKIT credentials\n\
             dns_stackit_project_id = project-1\n\
             dns_stackit_auth_token = \"secret\"\n",
        )
        .unwrap();

        assert_eq!(
            credentials,
            Credentials::Static {
                auth_token: "secret".into(),
                project_id: "project-1".into(),
                base_url: None,
            }
        );
        assert!(!format!("{credentials:?}").contains("secret"));
    }

    #[test]
    fn test_parse_bare_keys_with_base_url() {
        let credentials = Credentials::from_ini(
            "[stackit]\nproject_id=p\nauth_token=t\nbase_url = https://dns.example\n",
        )
        .unwrap();
        assert_eq!(credentials.project_id(), "p");
        assert!(matches!(
            credentials,
            Credentials::Static { base_url: Some(ref url), .. } if url == "https://dns.example"
        ));
    }

    #[test]
    fn test_missing_fields() {
        let err = Credentials::from_ini("project_id = p\n").unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("auth_token"));

        let err = Credentials::from_ini("auth_token = \n").unwrap_err();
        assert!(err.to_string().contains("project_id"));

        let err = Credentials::from_ini("garbage\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_service_account_takes_priority() {
        let config = CredentialsConfig {
            credentials_file: Some(PathBuf::from("/nonexistent/credentials.ini")),
            service_account_file: Some(PathBuf::from("/etc/stackit/sa.json")),
            project_id: Some("project-1".into()),
            base_url: None,
        };

        assert_eq!(
            config.into_credentials().unwrap(),
            Credentials::ServiceAccount {
                key_file: PathBuf::from("/etc/stackit/sa.json"),
                project_id: "project-1".into(),
                base_url: None,
            }
        );
    }

    #[test]
    fn test_service_account_requires_project() {
        let config = CredentialsConfig {
            service_account_file: Some(PathBuf::from("sa.json")),
            ..CredentialsConfig::default()
        };
        assert!(config.into_credentials().unwrap_err().is_config_error());
        assert!(CredentialsConfig::default()
            .into_credentials()
            .unwrap_err()
            .is_config_error());
    }

    #[test]
    fn test_credentials_file_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stackit.ini");
        std::fs::write(&path, "dns_stackit_project_id = p\ndns_stackit_auth_token = t\n").unwrap();

        let config = CredentialsConfig {
            credentials_file: Some(path),
            base_url: Some("https://override.example".into()),
            ..CredentialsConfig::default()
        };

        assert_eq!(
            config.into_credentials().unwrap(),
            Credentials::Static {
                auth_token: "t".into(),
                project_id: "p".into(),
                base_url: Some("https://override.example".into()),
            }
        );
    }

    #[test]
    fn test_unreadable_credentials_file() {
        let err = Credentials::from_ini_file("/nonexistent/stackit.ini").unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("/nonexistent/stackit.ini"));
    }

    #[tokio::test]
    async fn test_resolve_static_makes_no_calls() {
        let credentials = Credentials::Static {
            auth_token: "t".into(),
            project_id: "p".into(),
            base_url: None,
        };
        let auth = ServiceAccountAuth::new().with_token_endpoint("http://127.0.0.1:9/token");

        let resolved = credentials.resolve(&auth).await.unwrap();
        assert_eq!(resolved.token, "t");
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_resolve_service_account() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh"})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let key_file = dir.path().join("sa.json");
        std::fs::write(
            &key_file,
            json!({
                "credentials": {
                    "kid": "k",
                    "iss": "i",
                    "sub": "s",
                    "aud": "a",
                    "privateKey": include_str!("../testdata/service_account_key.pem")
                }
            })
            .to_string(),
        )
        .unwrap();

        let credentials = Credentials::ServiceAccount {
            key_file,
            project_id: "p".into(),
            base_url: Some("https://dns.example".into()),
        };
        let auth = ServiceAccountAuth::new().with_token_endpoint(format!("{}/token", server.uri()));

        let resolved = credentials.resolve(&auth).await.unwrap();
        assert_eq!(resolved.token, "fresh");
        assert_eq!(resolved.project_id, "p");
        assert_eq!(resolved.base_url, "https://dns.example");
    }

    #[tokio::test]
    async fn test_resolve_missing_key_file() {
        let credentials = Credentials::ServiceAccount {
            key_file: PathBuf::from("/nonexistent/sa.json"),
            project_id: "p".into(),
            base_url: None,
        };
        let err = credentials
            .resolve(&ServiceAccountAuth::new())
            .await
            .unwrap_err();
        assert!(err.is_config_error());
    }
}
