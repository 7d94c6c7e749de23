//! Citizen (identity card) domain model.
//!
//! One canonical, versioned document shape. Older flat records are
//! converted through [`LegacyCitizen`] instead of being stored side by side.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::Schema;

pub const CITIZEN_SCHEMA_VERSION: u32 = 2;

/// A criminal-record entry ("antecedente").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundEntry {
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Place is required"))]
    pub place: String,
    #[validate(length(min = 1, message = "Officer is required"))]
    pub officer: String,
    pub penal_code: Option<String>,
}

impl Schema for BackgroundEntry {
    const FIELDS: &'static [&'static str] = &["title", "description", "place", "officer"];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub kind: String,
    pub issued_on: Option<NaiveDate>,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Fine {
    pub date: NaiveDate,
    pub reason: String,
    pub place: String,
    pub amount: i64,
    pub officer: String,
    pub paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Citizen {
    pub id: Uuid,
    pub schema_version: u32,
    /// RUT, unique.
    pub national_id: String,
    pub full_name: String,
    pub nationality: Option<String>,
    /// Free-text notes (the legacy single-string background).
    pub notes: Option<String>,
    pub background: Vec<BackgroundEntry>,
    pub licenses: Vec<License>,
    pub fines: Vec<Fine>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCitizen {
    #[validate(length(min = 1, message = "National id (RUT) is required"))]
    pub national_id: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    pub nationality: Option<String>,
    pub notes: Option<String>,
    pub licenses: Vec<License>,
    pub fines: Vec<Fine>,
}

impl Schema for CreateCitizen {
    const FIELDS: &'static [&'static str] = &["national_id", "full_name"];
}

/// The original flat citizen record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyCitizen {
    pub rut: String,
    pub nombre: String,
    pub antecedentes: Option<String>,
}

impl From<LegacyCitizen> for CreateCitizen {
    fn from(legacy: LegacyCitizen) -> Self {
        CreateCitizen {
            national_id: legacy.rut,
            full_name: legacy.nombre,
            nationality: None,
            notes: legacy.antecedentes.filter(|s| !s.trim().is_empty()),
            licenses: Vec::new(),
            fines: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_background_string_becomes_notes() {
        let legacy: LegacyCitizen = serde_json::from_value(serde_json::json!({
            "rut": "9.876.543-2",
            "nombre": "Roberto Andrés Muñoz Vera",
            "antecedentes": "Falta menor - Conducción sin licencia (2023)"
        }))
        .unwrap();
        let current = CreateCitizen::from(legacy);
        assert_eq!(current.national_id, "9.876.543-2");
        assert_eq!(
            current.notes.as_deref(),
            Some("Falta menor - Conducción sin licencia (2023)")
        );
    }

    #[test]
    fn blank_legacy_background_is_dropped() {
        let legacy = LegacyCitizen {
            rut: "11.222.333-4".into(),
            nombre: "María Fernanda López Soto".into(),
            antecedentes: Some("  ".into()),
        };
        assert_eq!(CreateCitizen::from(legacy).notes, None);
    }

    #[test]
    fn background_entry_requires_officer() {
        let entry = BackgroundEntry {
            title: "Hurto".into(),
            description: "Hurto simple".into(),
            place: "Centro".into(),
            ..Default::default()
        };
        assert_eq!(entry.check().unwrap_err().to_string(), "Officer is required");
    }
}
