//! Input validation for assignment runs.
//!
//! Checks structural integrity of the roster and the slot axis before
//! model construction. Detects:
//! - Duplicate participant names
//! - Duplicate slots on the axis
//! - Participants without any availability window
//!
//! Validation is advisory: the engine tolerates all of these, but a
//! duplicate name makes the hours ledger ambiguous and a duplicate slot
//! double-counts its coverage reward, so callers should surface them.

use std::collections::HashSet;

use crate::models::{Participant, TimeSlot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two participants share the same name.
    DuplicateName,
    /// The slot axis contains the same slot twice.
    DuplicateSlot,
    /// A participant declared neither normal nor if-needed availability.
    NoAvailability,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for an assignment run.
///
/// Checks:
/// 1. No duplicate participant names
/// 2. No duplicate slots
/// 3. Every participant has at least one availability window
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(participants: &[Participant], slots: &[TimeSlot]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for p in participants {
        if !names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate participant name: {}", p.name),
            ));
        }
        if !p.has_any_availability() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoAvailability,
                format!("Participant '{}' has no availability", p.name),
            ));
        }
    }

    let mut seen = HashSet::new();
    for slot in slots {
        if !seen.insert(*slot) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!("Duplicate slot: {} to {}", slot.start, slot.end),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Interval;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn person(name: &str) -> Participant {
        Participant::new(name)
            .unwrap()
            .with_availability(Interval::new(dt(9), dt(11)).unwrap())
    }

    #[test]
    fn test_valid_input() {
        let people = vec![person("Anna"), person("Jan")];
        let slots = vec![
            TimeSlot::new(dt(9), dt(10)).unwrap(),
            TimeSlot::new(dt(10), dt(11)).unwrap(),
        ];
        assert!(validate_input(&people, &slots).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let people = vec![person("Anna"), person("Anna")];
        let errors = validate_input(&people, &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateName));
    }

    #[test]
    fn test_duplicate_slot() {
        let slot = TimeSlot::new(dt(9), dt(10)).unwrap();
        let errors = validate_input(&[person("Anna")], &[slot, slot]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateSlot));
    }

    #[test]
    fn test_no_availability() {
        let bare = Participant::new("Idle").unwrap();
        let errors = validate_input(&[bare], &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NoAvailability));
    }

    #[test]
    fn test_multiple_errors() {
        let slot = TimeSlot::new(dt(9), dt(10)).unwrap();
        let people = vec![person("Anna"), person("Anna"), Participant::new("Idle").unwrap()];
        let errors = validate_input(&people, &[slot, slot]).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
