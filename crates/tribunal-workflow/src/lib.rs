//! Tribunal Workflow — the portal's operations on top of the repository
//! traits: cause lifecycle, warrant approvals, ancillary records and the
//! search dispatcher.

use tribunal_core::error::{TribunalError, TribunalResult};
use uuid::Uuid;

pub mod causes;
pub mod records;
pub mod search;
pub mod warrants;

pub use causes::CauseService;
pub use records::{CaseRecordService, CitizenService, VehicleService};
pub use search::SearchDispatcher;
pub use warrants::WarrantService;

/// Parse a client-supplied record id. A malformed id names no record.
pub fn parse_id(entity: &str, raw: &str) -> TribunalResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| TribunalError::not_found(entity, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_id("cause", "abc").unwrap_err();
        assert!(matches!(err, TribunalError::NotFound { .. }));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("cause", &format!(" {id} ")).unwrap(), id);
    }
}
