//! Zone endpoints.

use crate::client::ApiResponse;
use crate::StackitClient;
use reqwest::StatusCode;
use stackit_dns_core::{zone_candidates, Result, StackitError, Zone, ZoneList};
use tracing::debug;

/// Zone endpoints
pub struct ZonesApi<'a> {
    client: &'a StackitClient,
}

impl<'a> ZonesApi<'a> {
    pub(crate) const fn new(client: &'a StackitClient) -> Self {
        Self { client }
    }

    /// List active zones whose DNS name equals `dns_name`
    pub async fn list(&self, dns_name: &str) -> Result<Vec<Zone>> {
        let response = self.query(dns_name).await?;
        if response.status != StatusCode::OK {
            return Err(StackitError::ZoneNotFound {
                domain: dns_name.to_string(),
                status: response.code(),
                body: response.body,
            });
        }

        Ok(response.json::<ZoneList>()?.zones)
    }

    /// Find the id of the most specific zone containing `domain`.
    ///
    /// `domain` need not be the zone apex: candidates are tried from the full
    /// name towards the top-level domain and the first active match wins.
    pub async fn resolve(&self, domain: &str) -> Result<String> {
        let mut last_body = String::new();

        for candidate in zone_candidates(domain) {
            let response = self.query(candidate).await?;
            if response.status != StatusCode::OK {
                return Err(StackitError::ZoneNotFound {
                    domain: domain.to_string(),
                    status: response.code(),
                    body: response.body,
                });
            }

            if let Some(zone) = response.json::<ZoneList>()?.into_first() {
                debug!(domain, zone = candidate, zone_id = %zone.id, "zone resolved");
                return Ok(zone.id);
            }

            last_body = response.body;
        }

        Err(StackitError::ZoneNotFound {
            domain: domain.to_string(),
            status: StatusCode::OK.as_u16(),
            body: last_body,
        })
    }

    async fn query(&self, dns_name: &str) -> Result<ApiResponse> {
        self.client
            .get(
                &self.client.project_path("zones"),
                &[("dnsName[eq]", dns_name), ("active[eq]", "true")],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> StackitClient {
        StackitClient::builder("test_token", "test_project")
            .base_url(base_url)
            .build()
            .unwrap()
    }

    async fn mount_zone(server: &MockServer, dns_name: &str, zones: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v1/projects/test_project/zones"))
            .and(query_param("dnsName[eq]", dns_name))
            .and(query_param("active[eq]", "true"))
            .and(header("Authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "zones": zones })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_resolve_single_label() {
        let server = MockServer::start().await;
        mount_zone(&server, "test_domain", json!([{"id": "12345"}])).await;

        let client = test_client(&server.uri());
        let zone_id = client.zones().resolve("test_domain").await.unwrap();
        assert_eq!(zone_id, "12345");
    }

    #[tokio::test]
    async fn test_resolve_walks_towards_apex() {
        let server = MockServer::start().await;
        mount_zone(&server, "_acme-challenge.www.example.com", json!([])).await;
        mount_zone(&server, "www.example.com", json!([])).await;
        mount_zone(&server, "example.com", json!([{"id": "zone-example"}])).await;
        Mock::given(method("GET"))
            .and(query_param("dnsName[eq]", "com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"zones": [{"id": "zone-com"}]})))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let zone_id = client
            .zones()
            .resolve("_acme-challenge.www.example.com")
            .await
            .unwrap();
        assert_eq!(zone_id, "zone-example");
    }

    #[tokio::test]
    async fn test_resolve_prefers_most_specific_zone() {
        let server = MockServer::start().await;
        mount_zone(&server, "sub.example.com", json!([{"id": "zone-sub"}])).await;
        Mock::given(method("GET"))
            .and(query_param("dnsName[eq]", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"zones": [{"id": "zone-parent"}]})))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let zone_id = client.zones().resolve("sub.example.com").await.unwrap();
        assert_eq!(zone_id, "zone-sub");
    }

    #[tokio::test]
    async fn test_resolve_exhausted() {
        let server = MockServer::start().await;
        mount_zone(&server, "example.org", json!([])).await;
        mount_zone(&server, "org", json!([])).await;

        let client = test_client(&server.uri());
        let err = client.zones().resolve("example.org").await.unwrap_err();
        assert!(err.is_provider_error());
        assert_eq!(
            err.to_string(),
            r#"Could not find zone id for domain example.org, Response: {"zones":[]}"#
        );
    }

    #[tokio::test]
    async fn test_list_returns_zone_details() {
        let server = MockServer::start().await;
        mount_zone(
            &server,
            "example.com",
            json!([{"id": "z1", "dnsName": "example.com", "state": "CREATE_SUCCEEDED", "active": true}]),
        )
        .await;

        let client = test_client(&server.uri());
        let zones = client.zones().list("example.com").await.unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].dns_name.as_deref(), Some("example.com"));
        assert_eq!(zones[0].active, Some(true));
    }

    #[tokio::test]
    async fn test_resolve_unexpected_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/projects/test_project/zones"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.zones().resolve("test_domain").await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(
            err.to_string(),
            "Could not find zone id for domain test_domain, Response: not found"
        );
    }
}
