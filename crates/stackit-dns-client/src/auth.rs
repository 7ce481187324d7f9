//! Service account authentication.
//!
//! A service account key signs a short-lived JWT assertion which the STACKIT
//! token endpoint exchanges for a bearer access token (RFC 7523). Nothing is
//! cached: every exchange signs a fresh assertion.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use stackit_dns_core::{Result, StackitError};
use std::fmt;
use std::path::Path;
use tracing::{debug, error, info};
use uuid::Uuid;

/// STACKIT service account token endpoint
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://service-account.api.stackit.cloud/token";

/// Lifetime of a signed assertion in seconds
pub const ASSERTION_LIFETIME_SECS: i64 = 900;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Signing material of a STACKIT service account key
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Key id, placed in the JWT header
    #[serde(rename = "kid", alias = "keyId")]
    pub key_id: String,

    /// Assertion issuer
    #[serde(rename = "iss", alias = "issuer")]
    pub issuer: String,

    /// Assertion subject
    #[serde(rename = "sub", alias = "subject")]
    pub subject: String,

    /// Assertion audience
    #[serde(rename = "aud", alias = "audience")]
    pub audience: String,

    /// PEM encoded RSA private key
    #[serde(rename = "privateKey", alias = "private_key")]
    private_key: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_id", &self.key_id)
            .field("issuer", &self.issuer)
            .field("subject", &self.subject)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

/// Key file layouts: the one STACKIT hands out nests the signing material
/// under `credentials`.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyFile {
    Nested { credentials: ServiceAccountKey },
    Flat(ServiceAccountKey),
}

/// Claims of the signed assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl ServiceAccountKey {
    /// Parse a service account key file's JSON content
    pub fn from_json(content: &str) -> Result<Self> {
        let file: KeyFile = serde_json::from_str(content)
            .map_err(|e| StackitError::Config(format!("malformed service account key: {e}")))?;

        Ok(match file {
            KeyFile::Nested { credentials } => credentials,
            KeyFile::Flat(key) => key,
        })
    }

    /// Read and parse a service account key file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "could not read service account key file");
            StackitError::Config(format!(
                "could not read service account key file {}: {e}",
                path.display()
            ))
        })?;

        Self::from_json(&content)
    }

    /// Sign an assertion valid from now for [`ASSERTION_LIFETIME_SECS`]
    pub fn assertion(&self) -> Result<String> {
        self.assertion_at(Utc::now().timestamp())
    }

    /// Sign an assertion issued at `now` (seconds since the epoch)
    pub fn assertion_at(&self, now: i64) -> Result<String> {
        let claims = AssertionClaims {
            iss: self.issuer.clone(),
            sub: self.subject.clone(),
            aud: self.audience.clone(),
            exp: now + ASSERTION_LIFETIME_SECS,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::RS512);
        header.kid = Some(self.key_id.clone());

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| StackitError::Config(format!("invalid service account private key: {e}")))?;

        jsonwebtoken::encode(&header, &claims, &key)
            .map_err(|e| StackitError::Config(format!("could not sign service account assertion: {e}")))
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchanges service account assertions for access tokens
#[derive(Debug, Clone)]
pub struct ServiceAccountAuth {
    http: HttpClient,
    token_endpoint: String,
}

impl Default for ServiceAccountAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceAccountAuth {
    /// Use the STACKIT token endpoint
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
        }
    }

    /// Send exchanges to `endpoint` instead (useful for testing)
    #[must_use]
    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    /// Use an existing HTTP client
    #[must_use]
    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    /// Endpoint assertions are exchanged at
    #[must_use]
    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }

    /// Sign a fresh assertion with `key` and exchange it for an access token
    pub async fn access_token(&self, key: &ServiceAccountKey) -> Result<String> {
        let assertion = key.assertion()?;
        debug!(endpoint = %self.token_endpoint, key_id = %key.key_id, "exchanging service account assertion");

        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StackitError::TokenExchange {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| StackitError::TokenExchange {
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(StackitError::TokenExchange {
                status: Some(status.as_u16()),
                message: format!("HTTP {}: {body}", status.as_u16()),
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| StackitError::TokenExchange {
                status: Some(status.as_u16()),
                message: format!("invalid token response: {e}"),
            })?;

        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(StackitError::MissingAccessToken)?;

        info!(expires_in = ?token.expires_in, "obtained service account access token");
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PRIVATE_KEY: &str = include_str!("../testdata/service_account_key.pem");
    const PUBLIC_KEY: &str = include_str!("../testdata/service_account_key.pub.pem");

    fn key_json() -> serde_json::Value {
        json!({
            "id": "key-uuid",
            "keyAlgorithm": "RSA_2048",
            "active": true,
            "credentials": {
                "kid": "key-id-1",
                "iss": "sa@sa.stackit.cloud",
                "sub": "subject-uuid",
                "aud": "https://stackit-service-account-prod.apps.01.cf.eu01.stackit.cloud",
                "privateKey": PRIVATE_KEY
            }
        })
    }

    fn test_key() -> ServiceAccountKey {
        ServiceAccountKey::from_json(&key_json().to_string()).unwrap()
    }

    #[test]
    fn test_parse_nested_and_flat_layouts() {
        let nested = test_key();
        assert_eq!(nested.key_id, "key-id-1");
        assert_eq!(nested.issuer, "sa@sa.stackit.cloud");

        let flat = ServiceAccountKey::from_json(
            &json!({
                "keyId": "key-id-2",
                "issuer": "iss",
                "subject": "sub",
                "audience": "aud",
                "privateKey": PRIVATE_KEY
            })
            .to_string(),
        )
        .unwrap();
        assert_eq!(flat.key_id, "key-id-2");
        assert_eq!(flat.audience, "aud");
    }

    #[test]
    fn test_malformed_key_file_is_config_error() {
        let err = ServiceAccountKey::from_json(r#"{"credentials": {"kid": "x"}}"#).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_missing_key_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceAccountKey::load(dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sa.json");
        std::fs::write(&path, key_json().to_string()).unwrap();

        let key = ServiceAccountKey::load(&path).unwrap();
        assert_eq!(key.subject, "subject-uuid");
        assert!(!format!("{key:?}").contains("PRIVATE KEY"));
    }

    #[test]
    fn test_assertion_is_rs512_with_kid_and_claims() {
        let key = test_key();
        let now = Utc::now().timestamp();
        let token = key.assertion_at(now).unwrap();

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::RS512);
        assert_eq!(header.kid.as_deref(), Some("key-id-1"));

        let mut validation = Validation::new(Algorithm::RS512);
        validation.set_audience(&[key.audience.as_str()]);
        validation.set_issuer(&[key.issuer.as_str()]);
        let data = jsonwebtoken::decode::<AssertionClaims>(
            &token,
            &DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.sub, "subject-uuid");
        assert_eq!(data.claims.iat, now);
        assert_eq!(data.claims.exp, now + 900);
        assert!(Uuid::parse_str(&data.claims.jti).is_ok());
    }

    #[test]
    fn test_assertions_have_unique_ids() {
        let key = test_key();
        assert_ne!(key.assertion().unwrap(), key.assertion().unwrap());
    }

    #[test]
    fn test_invalid_private_key_is_config_error() {
        let mut key = test_key();
        key.private_key = "not a pem".to_string();
        assert!(key.assertion().unwrap_err().is_config_error());
    }

    #[tokio::test]
    async fn test_access_token_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains(
                "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
            ))
            .and(body_string_contains("assertion="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "short-lived",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = ServiceAccountAuth::new().with_token_endpoint(format!("{}/token", server.uri()));
        let token = auth.access_token(&test_key()).await.unwrap();
        assert_eq!(token, "short-lived");
    }

    #[tokio::test]
    async fn test_access_token_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let auth = ServiceAccountAuth::new().with_token_endpoint(format!("{}/token", server.uri()));
        let err = auth.access_token(&test_key()).await.unwrap_err();
        assert!(err.is_auth_error());
        assert_eq!(err.status_code(), Some(403));
        assert!(err.to_string().contains("forbidden"));
    }

    #[tokio::test]
    async fn test_access_token_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
            .mount(&server)
            .await;

        let auth = ServiceAccountAuth::new().with_token_endpoint(format!("{}/token", server.uri()));
        let err = auth.access_token(&test_key()).await.unwrap_err();
        assert!(matches!(err, StackitError::MissingAccessToken));
    }
}
