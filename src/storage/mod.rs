//! Persistence: record blob store and application configuration.

pub mod config;
pub mod store;
