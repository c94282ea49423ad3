//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces at the board's seams:
//! - `SnapshotStore`: durable storage for the signal map
//! - `TaskExecutor`: external execution and quality measurement
//!
//! These traits keep the domain independent of specific infrastructure
//! implementations.

pub mod snapshot_store;
pub mod task_executor;

pub use snapshot_store::{NullSnapshotStore, SnapshotStore};
pub use task_executor::TaskExecutor;
