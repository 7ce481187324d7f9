//! DNS-01 validation operations composed from the zone and record set
//! endpoints.
//!
//! Both operations re-resolve the zone and record set on every call. Two
//! concurrent `upsert`s for the same name may both see no record set and
//! create two; callers are expected to serialize challenges per name.

use crate::StackitClient;
use stackit_dns_core::Result;
use tracing::debug;

/// Outcome of [`ValidationApi::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record set was created
    Created,
    /// The value was appended to an existing record set
    Appended,
    /// The value was already published
    Unchanged,
}

/// Outcome of [`ValidationApi::remove`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The record set was deleted
    Deleted,
    /// No record set existed
    Absent,
}

/// DNS-01 validation operations
pub struct ValidationApi<'a> {
    client: &'a StackitClient,
}

impl<'a> ValidationApi<'a> {
    pub(crate) const fn new(client: &'a StackitClient) -> Self {
        Self { client }
    }

    /// Ensure `value` is published in the TXT record set `name`.
    ///
    /// `domain` is any name inside the target zone; the zone is found by
    /// suffix search.
    pub async fn upsert(&self, domain: &str, name: &str, value: &str) -> Result<UpsertOutcome> {
        let zone_id = self.client.zones().resolve(domain).await?;
        let rrsets = self.client.rrsets();

        match rrsets.find(&zone_id, name).await? {
            None => {
                rrsets.create(&zone_id, name, value).await?;
                Ok(UpsertOutcome::Created)
            }
            Some(rrset) if rrset.contains_content(value) => {
                debug!(zone_id = %zone_id, rrset_id = %rrset.id, "validation already present");
                Ok(UpsertOutcome::Unchanged)
            }
            Some(rrset) => {
                rrsets.append(&zone_id, &rrset.id, value).await?;
                Ok(UpsertOutcome::Appended)
            }
        }
    }

    /// Remove the TXT record set `name`.
    ///
    /// The whole record set goes, including values other than `value`;
    /// `value` only mirrors [`Self::upsert`]'s signature.
    pub async fn remove(&self, domain: &str, name: &str, value: &str) -> Result<RemoveOutcome> {
        let _ = value;
        let zone_id = self.client.zones().resolve(domain).await?;
        let rrsets = self.client.rrsets();

        match rrsets.find(&zone_id, name).await? {
            Some(rrset) => {
                rrsets.delete(&zone_id, &rrset.id).await?;
                Ok(RemoveOutcome::Deleted)
            }
            None => {
                debug!(zone_id = %zone_id, "no record set to remove");
                Ok(RemoveOutcome::Absent)
            }
        }
    }
}
