//! Input schema validation.
//!
//! Inputs derive [`validator::Validate`]; [`Schema`] adds the declaration
//! order of their fields so that a failure reports the first violated field,
//! not whichever one the error map yields first.

use validator::{Validate, ValidationErrors};

use crate::error::{TribunalError, TribunalResult};

pub trait Schema: Validate {
    /// Rust field names in declaration order.
    const FIELDS: &'static [&'static str];

    fn check(&self) -> TribunalResult<()> {
        self.validate()
            .map_err(|errors| TribunalError::validation(first_violation(&errors, Self::FIELDS)))
    }
}

/// Message of the first violated field in `order`.
pub fn first_violation(errors: &ValidationErrors, order: &[&str]) -> String {
    let fields = errors.field_errors();

    let named = order
        .iter()
        .find_map(|name| fields.get(*name).map(|errs| (*name, *errs)));

    let (name, errs) = match named {
        Some(found) => found,
        None => {
            // Field missing from `order`; fall back to a stable choice.
            match fields.keys().min() {
                Some(key) => {
                    let name: &str = key;
                    (name, fields[key])
                }
                None => return "invalid input".into(),
            }
        }
    };

    errs.first()
        .and_then(|e| e.message.as_ref())
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("{name} is invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "first is required"))]
        first: String,
        #[validate(length(min = 1, message = "second is required"))]
        second: String,
        #[validate(length(min = 3))]
        third: String,
    }

    impl Schema for Probe {
        const FIELDS: &'static [&'static str] = &["first", "second", "third"];
    }

    #[test]
    fn reports_first_field_in_declaration_order() {
        let probe = Probe {
            first: String::new(),
            second: String::new(),
            third: String::new(),
        };
        let err = probe.check().unwrap_err();
        assert_eq!(err.to_string(), "first is required");
    }

    #[test]
    fn skips_valid_fields() {
        let probe = Probe {
            first: "ok".into(),
            second: String::new(),
            third: "long enough".into(),
        };
        assert_eq!(probe.check().unwrap_err().to_string(), "second is required");
    }

    #[test]
    fn falls_back_to_field_name_without_message() {
        let probe = Probe {
            first: "ok".into(),
            second: "ok".into(),
            third: "x".into(),
        };
        assert_eq!(probe.check().unwrap_err().to_string(), "third is invalid");
    }

    #[test]
    fn valid_input_passes() {
        let probe = Probe {
            first: "a".into(),
            second: "b".into(),
            third: "abc".into(),
        };
        assert!(probe.check().is_ok());
    }
}
