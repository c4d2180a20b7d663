//! Workout record entity and form input validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::metrics::calculator::{duration_minutes, format_hhmm, volume};

/// A single logged exercise session entry.
///
/// Records are append-only: they are created once and never edited in
/// place. The derived fields (`volume_kg`, `duration_min`) are computed by
/// the constructor from their inputs and are not written anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Unique identifier
    pub id: Uuid,
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Start time of day
    pub start: NaiveTime,
    /// End time of day
    pub end: NaiveTime,
    /// Exercise name (free text)
    pub exercise: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Load in kilograms
    pub weight_kg: f64,
    /// Derived total volume: sets x reps x weight
    pub volume_kg: f64,
    /// Rest between sets in seconds
    pub rest_secs: Option<u32>,
    /// Derived session length in minutes
    pub duration_min: u32,
    /// Rate of Perceived Exertion (subjective effort scalar)
    pub rpe: Option<f64>,
    /// Free-text notes, may be empty
    pub notes: String,
}

impl WorkoutRecord {
    /// Create a record, computing the derived volume and duration fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exercise: String,
        sets: u32,
        reps: u32,
        weight_kg: f64,
        rest_secs: Option<u32>,
        rpe: Option<f64>,
        notes: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            start,
            end,
            exercise,
            sets,
            reps,
            weight_kg,
            volume_kg: volume(sets, reps, weight_kg),
            rest_secs,
            duration_min: duration_minutes(start, end),
            rpe,
            notes,
        }
    }

    /// Session duration formatted as HH:MM.
    pub fn duration_hhmm(&self) -> String {
        format_hhmm(self.duration_min)
    }
}

/// Raw form input for a new record, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub date: String,
    pub start: String,
    pub end: String,
    pub exercise: String,
    pub sets: String,
    pub reps: String,
    pub weight: String,
    pub rest: String,
    pub rpe: String,
    pub notes: String,
}

impl RecordDraft {
    /// Validate the draft and build a record from it.
    ///
    /// Required fields must be present, otherwise submission is blocked
    /// with a field-level error and nothing is persisted. Numeric fields
    /// that fail to parse count as zero rather than blocking entry, so a
    /// garbage weight produces a zero-volume record, not a crash.
    pub fn build(&self) -> Result<WorkoutRecord, FormError> {
        let required = [
            ("date", &self.date),
            ("start", &self.start),
            ("end", &self.end),
            ("exercise", &self.exercise),
            ("sets", &self.sets),
            ("reps", &self.reps),
            ("weight", &self.weight),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(name));
            }
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(self.date.trim().to_string()))?;
        let start = parse_time(&self.start)?;
        let end = parse_time(&self.end)?;

        let sets = self.sets.trim().parse().unwrap_or(0);
        let reps = self.reps.trim().parse().unwrap_or(0);
        let weight_kg = self.weight.trim().parse().unwrap_or(0.0);
        let rest_secs = match self.rest.trim() {
            "" => None,
            s => s.parse().ok(),
        };
        let rpe = match self.rpe.trim() {
            "" => None,
            s => s.parse().ok(),
        };

        Ok(WorkoutRecord::new(
            date,
            start,
            end,
            self.exercise.trim().to_string(),
            sets,
            reps,
            weight_kg,
            rest_secs,
            rpe,
            self.notes.trim().to_string(),
        ))
    }
}

/// Parse a time-of-day field, accepting HH:MM and HH:MM:SS.
fn parse_time(value: &str) -> Result<NaiveTime, FormError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| FormError::InvalidTime(trimmed.to_string()))
}

/// Errors from validating raw form input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// A required field was left empty
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    /// Date did not parse as YYYY-MM-DD
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Time did not parse as HH:MM
    #[error("Invalid time: {0}")]
    InvalidTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> RecordDraft {
        RecordDraft {
            date: "2026-08-28".to_string(),
            start: "07:00".to_string(),
            end: "07:45".to_string(),
            exercise: "Agachamento".to_string(),
            sets: "4".to_string(),
            reps: "8".to_string(),
            weight: "80".to_string(),
            rest: "90".to_string(),
            rpe: "8.5".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_build_computes_derived_fields() {
        let record = filled_draft().build().unwrap();
        assert_eq!(record.volume_kg, 4.0 * 8.0 * 80.0);
        assert_eq!(record.duration_min, 45);
        assert_eq!(record.duration_hhmm(), "00:45");
        assert_eq!(record.rest_secs, Some(90));
        assert_eq!(record.rpe, Some(8.5));
    }

    #[test]
    fn test_missing_required_field_blocks_submission() {
        let mut draft = filled_draft();
        draft.exercise = "  ".to_string();
        assert_eq!(draft.build(), Err(FormError::MissingField("exercise")));
    }

    #[test]
    fn test_non_numeric_input_yields_zero_volume() {
        let mut draft = filled_draft();
        draft.weight = "heavy".to_string();
        let record = draft.build().unwrap();
        assert_eq!(record.weight_kg, 0.0);
        assert_eq!(record.volume_kg, 0.0);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut draft = filled_draft();
        draft.date = "28/08/2026".to_string();
        assert!(matches!(draft.build(), Err(FormError::InvalidDate(_))));
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let mut draft = filled_draft();
        draft.rest = String::new();
        draft.rpe = " ".to_string();
        let record = draft.build().unwrap();
        assert_eq!(record.rest_secs, None);
        assert_eq!(record.rpe, None);
    }

    #[test]
    fn test_duration_wraps_past_midnight() {
        let mut draft = filled_draft();
        draft.start = "23:30".to_string();
        draft.end = "00:15".to_string();
        let record = draft.build().unwrap();
        assert_eq!(record.duration_min, 45);
    }
}
