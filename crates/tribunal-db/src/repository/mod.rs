//! SurrealDB repository implementations.

mod cause;
mod citation;
mod citizen;
mod confiscation;
mod session;
mod user;
mod vehicle;
mod warrant;

pub use cause::SurrealCauseRepository;
pub use citation::SurrealCitationRepository;
pub use citizen::SurrealCitizenRepository;
pub use confiscation::SurrealConfiscationRepository;
pub use session::SurrealSessionRepository;
pub use user::SurrealUserRepository;
pub use vehicle::SurrealVehicleRepository;
pub use warrant::SurrealWarrantRepository;

use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::DbError;

pub(crate) fn parse_uuid(what: &str, raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::decode(what, e))
}

pub(crate) fn parse_wire<T>(what: &str, raw: &str) -> Result<T, DbError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e| DbError::decode(what, e))
}

/// Decode an embedded document list (evidence, background, ...).
pub(crate) fn from_document<T: DeserializeOwned>(
    what: &str,
    value: serde_json::Value,
) -> Result<T, DbError> {
    serde_json::from_value(value).map_err(|e| DbError::decode(what, e))
}

pub(crate) fn to_document<T: Serialize>(what: &str, value: &T) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(value).map_err(|e| DbError::decode(what, e))
}

/// Case-insensitive substring match used by the store searches.
pub(crate) fn matches_query<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.trim().to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_match_ignores_case_and_padding() {
        assert!(matches_query(" toyota ", ["Toyota Corolla", "ABCD12"]));
        assert!(!matches_query("ford", ["Toyota Corolla", "ABCD12"]));
    }
}
