//! API endpoint modules.

mod rrsets;
mod validation;
mod zones;

pub use rrsets::RecordSetsApi;
pub use validation::{RemoveOutcome, UpsertOutcome, ValidationApi};
pub use zones::ZonesApi;
