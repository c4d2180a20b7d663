//! Ordered collection of workout records.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::training::types::WorkoutRecord;

/// Append-only log of workout records, kept sorted newest-first.
///
/// The ordering invariant is descending by `(date, start)` and is restored
/// after every insertion, so readers can always rely on the first record
/// being the most recent one.
#[derive(Debug, Clone, Default)]
pub struct TrainingLog {
    records: Vec<WorkoutRecord>,
}

impl TrainingLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from records in any order.
    pub fn from_records(records: Vec<WorkoutRecord>) -> Self {
        let mut log = Self { records };
        log.resort();
        log
    }

    /// Append a record and restore the ordering invariant.
    pub fn insert(&mut self, record: WorkoutRecord) {
        self.records.push(record);
        self.resort();
    }

    /// All records, newest first.
    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove every record. The only destructive operation on the log.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn resort(&mut self) {
        self.records
            .sort_by(|a, b| (b.date, b.start).cmp(&(a.date, a.start)));
    }
}

/// Example records seeded on first launch so the UI is not empty.
pub fn seed_records(today: NaiveDate) -> Vec<WorkoutRecord> {
    let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);

    vec![
        WorkoutRecord::new(
            today - Duration::days(2),
            hm(7, 0),
            hm(7, 40),
            "Agachamento".to_string(),
            4,
            8,
            80.0,
            Some(90),
            Some(8.0),
            String::new(),
        ),
        WorkoutRecord::new(
            today - Duration::days(2),
            hm(7, 40),
            hm(8, 5),
            "Supino reto".to_string(),
            3,
            10,
            60.0,
            Some(60),
            Some(7.5),
            String::new(),
        ),
        WorkoutRecord::new(
            today - Duration::days(1),
            hm(18, 30),
            hm(19, 10),
            "Levantamento terra".to_string(),
            5,
            5,
            100.0,
            Some(120),
            Some(9.0),
            "Pegada mista".to_string(),
        ),
    ]
}
