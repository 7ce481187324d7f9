use serde::{Deserialize, Serialize};

/// A DNS zone as listed by the STACKIT DNS API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Provider-assigned zone id
    pub id: String,

    /// Zone name, e.g. `example.com`
    #[serde(default)]
    pub dns_name: Option<String>,

    /// Display name of the zone
    #[serde(default)]
    pub name: Option<String>,

    /// Lifecycle state reported by the API
    #[serde(default)]
    pub state: Option<String>,

    /// Whether the zone is active
    #[serde(default)]
    pub active: Option<bool>,
}

/// Response of the zone listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneList {
    /// Zones matching the filter
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl ZoneList {
    /// Take the first zone of the listing
    #[must_use]
    pub fn into_first(self) -> Option<Zone> {
        self.zones.into_iter().next()
    }
}
