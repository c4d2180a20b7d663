//! Workout records and the ordered training log.

pub mod log;
pub mod types;

pub use log::TrainingLog;
pub use types::WorkoutRecord;
