//! Vehicle registry domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::Schema;

wire_enum! {
    pub enum VehicleStatus {
        Operational => "operativo",
        Stolen => "robado",
        UnderReview => "en_revision",
        Decommissioned => "dado_de_baja",
        Immobilized => "inmovilizado",
        Seized => "embargado",
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Operational
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    /// License plate, unique, stored upper case.
    pub plate: String,
    pub make: Option<String>,
    pub model: String,
    pub color: Option<String>,
    pub owner_national_id: String,
    pub status: VehicleStatus,
    pub stolen_report: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateVehicle {
    #[validate(length(min = 1, message = "Plate is required"))]
    pub plate: String,
    pub make: Option<String>,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    pub color: Option<String>,
    #[validate(length(min = 1, message = "Owner national id is required"))]
    pub owner_national_id: String,
    pub status: Option<VehicleStatus>,
}

impl Schema for CreateVehicle {
    const FIELDS: &'static [&'static str] = &["plate", "model", "owner_national_id"];
}

/// Canonical form of a plate: trimmed, upper case.
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plates_are_upper_cased() {
        assert_eq!(normalize_plate(" abcd12 "), "ABCD12");
    }

    #[test]
    fn create_reports_missing_model_before_owner() {
        let input = CreateVehicle {
            plate: "ABCD12".into(),
            ..Default::default()
        };
        assert_eq!(input.check().unwrap_err().to_string(), "Model is required");
    }
}
