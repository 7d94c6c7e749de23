//! Search dispatcher request/response types.

use serde::{Deserialize, Serialize};

use super::cause::Cause;
use super::citizen::Citizen;
use super::vehicle::Vehicle;

/// Shortest query (in characters, after trimming) that reaches a store.
pub const MIN_QUERY_CHARS: usize = 2;

wire_enum! {
    /// Which record store a search addresses.
    pub enum SearchKind {
        Vehicles => "vehiculos",
        Citizens => "personas",
        Causes => "causas",
    }
}

/// Search response. Only the addressed collection is present, except for
/// too-short queries where all three are present and empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<Vec<Vehicle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizens: Option<Vec<Citizen>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub causes: Option<Vec<Cause>>,
}

impl SearchResults {
    pub fn empty() -> Self {
        Self {
            vehicles: Some(Vec::new()),
            citizens: Some(Vec::new()),
            causes: Some(Vec::new()),
        }
    }
}
