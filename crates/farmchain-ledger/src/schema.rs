//! Per-kind validation for record drafts.
//!
//! The open `payload` map stays schemaless, but each record kind has a
//! minimal set of required fields and environmental readings are
//! range-checked when present.

use farmchain_types::RecordKind;

use crate::error::LedgerError;
use crate::records::RecordDraft;

const TEMPERATURE_RANGE_C: (f64, f64) = (-90.0, 70.0);
const HUMIDITY_RANGE_PCT: (f64, f64) = (0.0, 100.0);

/// Validate a draft against the per-kind schema.
pub fn validate(draft: &RecordDraft) -> Result<(), LedgerError> {
    let missing = |field: &'static str| LedgerError::Validation {
        field,
        reason: format!("required for {} records", draft.kind),
    };

    match draft.kind {
        RecordKind::Harvest | RecordKind::Processing | RecordKind::Retail => {
            if blank(&draft.location) {
                return Err(missing("location"));
            }
        }
        RecordKind::Storage => {
            if blank(&draft.storage_conditions) {
                return Err(missing("storage_conditions"));
            }
        }
        RecordKind::Transport => {
            if blank(&draft.transport_method) {
                return Err(missing("transport_method"));
            }
        }
        RecordKind::QualityCheck => {
            if blank(&draft.notes) {
                return Err(missing("notes"));
            }
        }
    }

    if let Some(t) = draft.temperature {
        check_range("temperature", t, TEMPERATURE_RANGE_C)?;
    }
    if let Some(h) = draft.humidity {
        check_range("humidity", h, HUMIDITY_RANGE_PCT)?;
    }

    Ok(())
}

fn blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), LedgerError> {
    if !value.is_finite() || value < min || value > max {
        return Err(LedgerError::Validation {
            field,
            reason: format!("{value} outside [{min}, {max}]"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use farmchain_types::{ActorId, BatchId};

    use super::*;

    fn draft(kind: RecordKind) -> RecordDraft {
        RecordDraft::new(BatchId::new(), ActorId::new("actor-1"), kind)
    }

    #[test]
    fn harvest_requires_location() {
        let err = validate(&draft(RecordKind::Harvest)).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "location", .. }));

        let mut ok = draft(RecordKind::Harvest);
        ok.location = Some("Field 3".into());
        validate(&ok).unwrap();
    }

    #[test]
    fn blank_location_counts_as_missing() {
        let mut d = draft(RecordKind::Retail);
        d.location = Some("   ".into());
        assert!(validate(&d).is_err());
    }

    #[test]
    fn storage_requires_conditions() {
        let mut d = draft(RecordKind::Storage);
        assert!(validate(&d).is_err());
        d.storage_conditions = Some("cold room".into());
        validate(&d).unwrap();
    }

    #[test]
    fn transport_requires_method() {
        let mut d = draft(RecordKind::Transport);
        assert!(validate(&d).is_err());
        d.transport_method = Some("refrigerated truck".into());
        validate(&d).unwrap();
    }

    #[test]
    fn quality_check_requires_notes() {
        let mut d = draft(RecordKind::QualityCheck);
        assert!(validate(&d).is_err());
        d.notes = Some("grade A".into());
        validate(&d).unwrap();
    }

    #[test]
    fn temperature_range_is_enforced() {
        let mut d = draft(RecordKind::Storage);
        d.storage_conditions = Some("freezer".into());
        d.temperature = Some(-120.0);
        let err = validate(&d).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "temperature", .. }));

        d.temperature = Some(-18.0);
        validate(&d).unwrap();
    }

    #[test]
    fn humidity_range_is_enforced() {
        let mut d = draft(RecordKind::Storage);
        d.storage_conditions = Some("cellar".into());
        d.humidity = Some(130.0);
        assert!(validate(&d).is_err());
        d.humidity = Some(65.0);
        validate(&d).unwrap();
    }

    #[test]
    fn non_finite_readings_are_rejected() {
        let mut d = draft(RecordKind::Storage);
        d.storage_conditions = Some("cold room".into());
        d.temperature = Some(f64::NAN);
        assert!(validate(&d).is_err());
    }
}
