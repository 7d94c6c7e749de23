//! Application role model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TribunalError;

/// The single internal role a user holds.
///
/// Wire names are the portal's Spanish identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "juez")]
    Judge,
    #[serde(rename = "fiscal")]
    Prosecutor,
    #[serde(rename = "policia")]
    Police,
    #[serde(rename = "abogado")]
    Lawyer,
    #[default]
    #[serde(rename = "civil")]
    Civilian,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Judge,
        Role::Prosecutor,
        Role::Police,
        Role::Lawyer,
        Role::Civilian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Judge => "juez",
            Role::Prosecutor => "fiscal",
            Role::Police => "policia",
            Role::Lawyer => "abogado",
            Role::Civilian => "civil",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TribunalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| TribunalError::validation(format!("unknown role: {s}")))
    }
}
