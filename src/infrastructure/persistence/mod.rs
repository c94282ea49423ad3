//! Persistence adapters.

pub mod json_snapshot;

pub use json_snapshot::{JsonSnapshotStore, SCHEMA_VERSION};
