use thiserror::Error;

/// Result type alias for STACKIT DNS operations
pub type Result<T> = std::result::Result<T, StackitError>;

/// Errors that can occur while fulfilling a DNS-01 challenge against STACKIT
///
/// Provider variants keep the identifiers and raw response body of the failed
/// call; the rendered message is what certbot shows to the operator.
#[derive(Error, Debug)]
pub enum StackitError {
    /// No zone matched any suffix of the domain, or a zone query failed
    #[error("Could not find zone id for domain {domain}, Response: {body}")]
    ZoneNotFound {
        /// Domain whose zone was searched
        domain: String,
        /// HTTP status of the last zone query
        status: u16,
        /// Raw body of the last zone query
        body: String,
    },

    /// Record set lookup returned an unexpected status
    #[error("Could not find rrset id for zone id {zone_id} and validation name {name}, Response: {body}")]
    RecordSetLookup {
        /// Zone that was searched
        zone_id: String,
        /// Fully qualified record name that was searched
        name: String,
        /// HTTP status returned by the API
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Record set creation was not accepted
    #[error("Could not create rrset for zone id {zone_id}. Response: {body}")]
    RecordSetCreate {
        /// Zone the record set was created in
        zone_id: String,
        /// HTTP status returned by the API
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Appending a record to an existing record set was not accepted
    #[error("Could not add record to rrset {rrset_id}. Response: {body}")]
    RecordAppend {
        /// Record set the record was appended to
        rrset_id: String,
        /// HTTP status returned by the API
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Record set deletion was not accepted
    #[error("Could not delete rrset id {rrset_id}. Response: {body}")]
    RecordSetDelete {
        /// Record set that was deleted
        rrset_id: String,
        /// HTTP status returned by the API
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The service account token exchange failed
    #[error("service account token exchange failed: {message}")]
    TokenExchange {
        /// HTTP status, absent when the request never got an answer
        status: Option<u16>,
        /// Underlying failure
        message: String,
    },

    /// The token endpoint answered without an access token
    #[error("service account token exchange returned no access_token")]
    MissingAccessToken,

    /// Credentials or key material are missing or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request to the DNS API failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StackitError {
    /// Returns true if the DNS API answered with an unexpected status
    #[must_use]
    pub const fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::ZoneNotFound { .. }
                | Self::RecordSetLookup { .. }
                | Self::RecordSetCreate { .. }
                | Self::RecordAppend { .. }
                | Self::RecordSetDelete { .. }
        )
    }

    /// Returns true if obtaining an access token failed
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::TokenExchange { .. } | Self::MissingAccessToken)
    }

    /// Returns true if the error stems from local configuration
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the HTTP status code if the error carries one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ZoneNotFound { status, .. }
            | Self::RecordSetLookup { status, .. }
            | Self::RecordSetCreate { status, .. }
            | Self::RecordAppend { status, .. }
            | Self::RecordSetDelete { status, .. } => Some(*status),
            Self::TokenExchange { status, .. } => *status,
            _ => None,
        }
    }
}
