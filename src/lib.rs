//! LiftLog - Resistance Training Logger
//!
//! A local-only workout logger built in Rust. Records exercise sessions,
//! derives volume and duration metrics, persists them on the local machine,
//! and renders tabular summaries and per-exercise progression trends.

pub mod export;
pub mod metrics;
pub mod storage;
pub mod training;
pub mod ui;

// Re-export commonly used types
pub use metrics::summary::TrainingSummary;
pub use storage::config::AppConfig;
pub use storage::store::{FileStore, RecordStore};
pub use training::log::TrainingLog;
pub use training::types::WorkoutRecord;
