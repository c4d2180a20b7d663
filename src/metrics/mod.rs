//! Derived training metrics and log summaries.

pub mod calculator;
pub mod summary;

pub use calculator::{duration_minutes, format_hhmm, volume};
pub use summary::{summarize, DailyTotal, ExerciseProgress, TrainingSummary};
