//! Export and import of the training log.

pub mod csv;

pub use csv::{export_csv, generate_csv_filename, import_csv};
