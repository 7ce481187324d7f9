//! Record set endpoints.
//!
//! Creation, record updates and deletion are processed asynchronously by the
//! API, so they answer `202 Accepted`; any other status is a failure.

use crate::StackitClient;
use reqwest::StatusCode;
use stackit_dns_core::{
    absolute_name, CreateRecordSetPayload, RecordSet, RecordSetList, Result, StackitError,
    UpdateRecordsPayload, TXT,
};
use tracing::info;

/// Record set endpoints
pub struct RecordSetsApi<'a> {
    client: &'a StackitClient,
}

impl<'a> RecordSetsApi<'a> {
    pub(crate) const fn new(client: &'a StackitClient) -> Self {
        Self { client }
    }

    /// Find the active TXT record set called `name` in `zone_id`.
    ///
    /// An empty listing is not an error and yields `None`.
    pub async fn find(&self, zone_id: &str, name: &str) -> Result<Option<RecordSet>> {
        let name = absolute_name(name);
        let response = self
            .client
            .get(
                &self.client.project_path(&format!("zones/{zone_id}/rrsets")),
                &[
                    ("name[eq]", name.as_str()),
                    ("type[eq]", TXT),
                    ("active[eq]", "true"),
                ],
            )
            .await?;

        if response.status != StatusCode::OK {
            return Err(StackitError::RecordSetLookup {
                zone_id: zone_id.to_string(),
                name,
                status: response.code(),
                body: response.body,
            });
        }

        Ok(response.json::<RecordSetList>()?.into_first())
    }

    /// Create a TXT record set called `name` holding `content`
    pub async fn create(&self, zone_id: &str, name: &str, content: &str) -> Result<()> {
        let name = absolute_name(name);
        let payload = CreateRecordSetPayload::txt(name.as_str(), content);
        let response = self
            .client
            .post(
                &self.client.project_path(&format!("zones/{zone_id}/rrsets")),
                &payload,
            )
            .await?;

        if response.status != StatusCode::ACCEPTED {
            return Err(StackitError::RecordSetCreate {
                zone_id: zone_id.to_string(),
                status: response.code(),
                body: response.body,
            });
        }

        info!(zone_id, name = %name, "created TXT record set");
        Ok(())
    }

    /// Add a record holding `content` to an existing record set
    pub async fn append(&self, zone_id: &str, rrset_id: &str, content: &str) -> Result<()> {
        let response = self
            .client
            .patch(
                &self
                    .client
                    .project_path(&format!("zones/{zone_id}/rrsets/{rrset_id}/records")),
                &UpdateRecordsPayload::add(content),
            )
            .await?;

        if response.status != StatusCode::ACCEPTED {
            return Err(StackitError::RecordAppend {
                rrset_id: rrset_id.to_string(),
                status: response.code(),
                body: response.body,
            });
        }

        info!(zone_id, rrset_id, "added record to TXT record set");
        Ok(())
    }

    /// Delete a record set with all of its records
    pub async fn delete(&self, zone_id: &str, rrset_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(
                &self
                    .client
                    .project_path(&format!("zones/{zone_id}/rrsets/{rrset_id}")),
            )
            .await?;

        if response.status != StatusCode::ACCEPTED {
            return Err(StackitError::RecordSetDelete {
                rrset_id: rrset_id.to_string(),
                status: response.code(),
                body: response.body,
            });
        }

        info!(zone_id, rrset_id, "deleted TXT record set");
        Ok(())
    }
}
