//! Tests for CSV export/import round-tripping through the full log.

use chrono::NaiveTime;
use liftlog::export::csv::{export_csv, import_csv, CSV_HEADER};
use liftlog::training::log::TrainingLog;
use liftlog::training::types::WorkoutRecord;

fn record(
    date: &str,
    exercise: &str,
    weight_kg: f64,
    rest_secs: Option<u32>,
    rpe: Option<f64>,
    notes: &str,
) -> WorkoutRecord {
    WorkoutRecord::new(
        date.parse().unwrap(),
        NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        NaiveTime::from_hms_opt(19, 20, 0).unwrap(),
        exercise.to_string(),
        4,
        6,
        weight_kg,
        rest_secs,
        rpe,
        notes.to_string(),
    )
}

#[test]
fn test_full_log_round_trip() {
    let mut log = TrainingLog::new();
    log.insert(record("2026-08-20", "Agachamento", 82.5, Some(120), Some(8.5), ""));
    log.insert(record("2026-08-22", "Supino reto", 62.5, None, None, "Pausa longa"));
    log.insert(record(
        "2026-08-25",
        "Levantamento terra",
        120.0,
        Some(180),
        Some(9.0),
        "Pegada mista, sem straps",
    ));

    let csv = export_csv(log.records()).unwrap();
    let imported = TrainingLog::from_records(import_csv(&csv).unwrap());

    assert_eq!(imported.len(), log.len());
    for (a, b) in log.records().iter().zip(imported.records()) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.start, b.start);
        assert_eq!(a.end, b.end);
        assert_eq!(a.exercise, b.exercise);
        assert_eq!(a.sets, b.sets);
        assert_eq!(a.reps, b.reps);
        assert_eq!(a.weight_kg, b.weight_kg);
        assert_eq!(a.volume_kg, b.volume_kg);
        assert_eq!(a.rest_secs, b.rest_secs);
        assert_eq!(a.duration_min, b.duration_min);
        assert_eq!(a.rpe, b.rpe);
        assert_eq!(a.notes, b.notes);
    }
}

#[test]
fn test_round_trip_with_multiline_notes() {
    let mut log = TrainingLog::new();
    log.insert(record(
        "2026-08-20",
        "Agachamento",
        80.0,
        Some(90),
        Some(8.0),
        "Primeira serie leve,\ndepois carga cheia",
    ));
    log.insert(record("2026-08-21", "Supino reto", 60.0, None, None, ""));

    let csv = export_csv(log.records()).unwrap();
    let imported = import_csv(&csv).unwrap();

    assert_eq!(imported.len(), 2);
    let squat = imported
        .iter()
        .find(|r| r.exercise == "Agachamento")
        .unwrap();
    assert_eq!(squat.notes, "Primeira serie leve,\ndepois carga cheia");
}

#[test]
fn test_round_trip_keeps_log_ordering() {
    let mut log = TrainingLog::new();
    log.insert(record("2026-08-25", "Agachamento", 80.0, None, None, ""));
    log.insert(record("2026-08-20", "Agachamento", 75.0, None, None, ""));

    let csv = export_csv(log.records()).unwrap();
    let imported = TrainingLog::from_records(import_csv(&csv).unwrap());

    let dates: Vec<_> = imported
        .records()
        .iter()
        .map(|r| r.date.to_string())
        .collect();
    assert_eq!(dates, ["2026-08-25", "2026-08-20"]);
}

#[test]
fn test_header_only_export_imports_empty() {
    let csv = export_csv(&[]).unwrap();
    assert_eq!(csv.trim_end(), CSV_HEADER);
    assert!(import_csv(&csv).unwrap().is_empty());
}

#[test]
fn test_import_is_strict_about_shape() {
    // Truncated row
    let bad = format!("{}\n2026-08-20,18:30,19:20,Remada\n", CSV_HEADER);
    assert!(import_csv(&bad).is_err());

    // Foreign header
    assert!(import_csv("Date,Start\n").is_err());
}
