//! Pure derivation functions for per-record metrics.

use chrono::{Duration, NaiveTime};

/// Total load moved in a session: sets x reps x weight.
pub fn volume(sets: u32, reps: u32, weight_kg: f64) -> f64 {
    sets as f64 * reps as f64 * weight_kg
}

/// Session length in whole minutes.
///
/// An end time earlier than the start means the session wrapped past
/// midnight, so a full day is added before taking the difference.
pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> u32 {
    let mut delta = end.signed_duration_since(start);
    if delta < Duration::zero() {
        delta = delta + Duration::hours(24);
    }
    delta.num_minutes() as u32
}

/// Format a minute count as HH:MM.
pub fn format_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
