//! Aggregation of the training log into daily totals and progression.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::training::types::WorkoutRecord;

/// Volume accumulated on a single date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    /// Session date
    pub date: NaiveDate,
    /// Summed volume for the date
    pub volume_kg: f64,
    /// Number of records contributing to the total
    pub entries: usize,
}

/// Load trend for one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgress {
    /// Exercise name
    pub exercise: String,
    /// Heaviest load ever recorded
    pub max_weight_kg: f64,
    /// Load from the most recent session
    pub last_weight_kg: f64,
    /// Date of the most recent session
    pub last_date: NaiveDate,
}

/// Aggregated view of the whole log for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSummary {
    /// Per-date totals, newest first
    pub daily: Vec<DailyTotal>,
    /// Per-exercise progression, alphabetical by exercise
    pub progression: Vec<ExerciseProgress>,
    /// Volume summed across all records
    pub total_volume_kg: f64,
}

/// Summarize records in a single pass.
///
/// Daily totals start at zero and accumulate in input order; addition is
/// associative, so the input ordering does not matter for them. For
/// progression, the first record seen per exercise is authoritative for
/// "last" and is replaced only when a later-or-equal date shows up again
/// in the scan. Over a newest-first log this picks the most recent session
/// and breaks same-date ties in favor of the record seen later.
pub fn summarize(records: &[WorkoutRecord]) -> TrainingSummary {
    let mut daily: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    let mut progression: BTreeMap<String, ExerciseProgress> = BTreeMap::new();
    let mut total_volume_kg = 0.0;

    for record in records {
        let entry = daily.entry(record.date).or_insert((0.0, 0));
        entry.0 += record.volume_kg;
        entry.1 += 1;
        total_volume_kg += record.volume_kg;

        match progression.get_mut(&record.exercise) {
            None => {
                progression.insert(
                    record.exercise.clone(),
                    ExerciseProgress {
                        exercise: record.exercise.clone(),
                        max_weight_kg: record.weight_kg,
                        last_weight_kg: record.weight_kg,
                        last_date: record.date,
                    },
                );
            }
            Some(progress) => {
                if record.weight_kg > progress.max_weight_kg {
                    progress.max_weight_kg = record.weight_kg;
                }
                if record.date >= progress.last_date {
                    progress.last_date = record.date;
                    progress.last_weight_kg = record.weight_kg;
                }
            }
        }
    }

    TrainingSummary {
        daily: daily
            .into_iter()
            .rev()
            .map(|(date, (volume_kg, entries))| DailyTotal {
                date,
                volume_kg,
                entries,
            })
            .collect(),
        progression: progression.into_values().collect(),
        total_volume_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn record(date: &str, exercise: &str, weight_kg: f64) -> WorkoutRecord {
        WorkoutRecord::new(
            date.parse().unwrap(),
            NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            exercise.to_string(),
            3,
            10,
            weight_kg,
            None,
            None,
            String::new(),
        )
    }

    #[test]
    fn test_empty_log_summarizes_to_default() {
        assert_eq!(summarize(&[]), TrainingSummary::default());
    }

    #[test]
    fn test_daily_totals_group_by_date() {
        let records = [
            record("2026-08-20", "Agachamento", 80.0),
            record("2026-08-20", "Supino reto", 60.0),
            record("2026-08-18", "Agachamento", 70.0),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.daily.len(), 2);
        // Newest first
        assert_eq!(summary.daily[0].date.to_string(), "2026-08-20");
        assert_eq!(summary.daily[0].volume_kg, 30.0 * 80.0 + 30.0 * 60.0);
        assert_eq!(summary.daily[0].entries, 2);
        assert_eq!(summary.daily[1].entries, 1);
        assert_eq!(
            summary.total_volume_kg,
            summary.daily[0].volume_kg + summary.daily[1].volume_kg
        );
    }

    #[test]
    fn test_progression_tracks_max_and_last() {
        // Newest-first input, the way the log stores records
        let records = [
            record("2026-08-25", "Agachamento", 82.5),
            record("2026-08-20", "Agachamento", 90.0),
            record("2026-08-15", "Agachamento", 75.0),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.progression.len(), 1);
        let progress = &summary.progression[0];
        assert_eq!(progress.max_weight_kg, 90.0);
        assert_eq!(progress.last_weight_kg, 82.5);
        assert_eq!(progress.last_date.to_string(), "2026-08-25");
    }

    #[test]
    fn test_same_date_tie_takes_record_seen_later() {
        let records = [
            record("2026-08-25", "Supino reto", 60.0),
            record("2026-08-25", "Supino reto", 62.5),
        ];
        let summary = summarize(&records);

        let progress = &summary.progression[0];
        assert_eq!(progress.last_weight_kg, 62.5);
        assert_eq!(progress.max_weight_kg, 62.5);
    }

    #[test]
    fn test_progression_sorted_by_exercise_name() {
        let records = [
            record("2026-08-25", "Supino reto", 60.0),
            record("2026-08-25", "Agachamento", 80.0),
            record("2026-08-25", "Remada curvada", 50.0),
        ];
        let summary = summarize(&records);

        let names: Vec<_> = summary
            .progression
            .iter()
            .map(|p| p.exercise.as_str())
            .collect();
        assert_eq!(names, ["Agachamento", "Remada curvada", "Supino reto"]);
    }
}
