use serde::{Deserialize, Serialize};

/// Record type used for DNS-01 validations
pub const TXT: &str = "TXT";

/// TTL given to validation record sets
pub const VALIDATION_TTL: u32 = 60;

/// A single record within a record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record content, the validation string for TXT records
    pub content: String,

    /// Provider-assigned record id
    #[serde(default)]
    pub id: String,
}

/// A named, typed set of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSet {
    /// Provider-assigned record set id
    pub id: String,

    /// Fully qualified record set name
    #[serde(default)]
    pub name: Option<String>,

    /// Record type
    #[serde(default, rename = "type")]
    pub record_type: Option<String>,

    /// Time to live in seconds
    #[serde(default)]
    pub ttl: Option<u32>,

    /// Member records
    #[serde(default)]
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Returns true if a member record carries `content`
    #[must_use]
    pub fn contains_content(&self, content: &str) -> bool {
        self.records.iter().any(|r| r.content == content)
    }

    /// Contents of all member records
    pub fn contents(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.content.as_str())
    }
}

/// Response of the record set listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSetList {
    /// Record sets matching the filter
    #[serde(default, rename = "rrSets")]
    pub rr_sets: Vec<RecordSet>,
}

impl RecordSetList {
    /// Take the first record set of the listing
    #[must_use]
    pub fn into_first(self) -> Option<RecordSet> {
        self.rr_sets.into_iter().next()
    }
}

/// Record content as sent in create and update payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    /// Record content
    pub content: String,
}

impl RecordPayload {
    /// Create a payload for `content`
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Body of a record set creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordSetPayload {
    /// Fully qualified record set name
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,

    /// Time to live in seconds
    pub ttl: u32,

    /// Initial records
    pub records: Vec<RecordPayload>,
}

impl CreateRecordSetPayload {
    /// A TXT record set holding one validation value
    #[must_use]
    pub fn txt(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: TXT.to_string(),
            ttl: VALIDATION_TTL,
            records: vec![RecordPayload::new(content)],
        }
    }
}

/// Partial update action on the records of a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordAction {
    /// Add the listed records
    Add,
}

/// Body of a record partial update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecordsPayload {
    /// What to do with the listed records
    pub action: RecordAction,

    /// Records the action applies to
    pub records: Vec<RecordPayload>,
}

impl UpdateRecordsPayload {
    /// Add one record with `content`
    #[must_use]
    pub fn add(content: impl Into<String>) -> Self {
        Self {
            action: RecordAction::Add,
            records: vec![RecordPayload::new(content)],
        }
    }
}
