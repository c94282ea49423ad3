//! Snapshot store port.

use async_trait::async_trait;

use crate::domain::errors::BoardResult;
use crate::domain::models::SignalMap;

/// Durable storage for the full signal map.
///
/// The board flushes a whole-map snapshot after every mutation and rebuilds
/// from it on startup. The store holds serialized state only, never a live
/// reference into the board.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the persisted signal map.
    ///
    /// A missing snapshot is not an error: implementations return an empty
    /// map so the board starts fresh.
    async fn load(&self) -> BoardResult<SignalMap>;

    /// Persist the full signal map, replacing any previous snapshot.
    async fn save(&self, signals: &SignalMap) -> BoardResult<()>;
}

/// A no-op snapshot store that persists nothing.
///
/// Use this for ephemeral boards (tests, demos) where durability across
/// restarts is not wanted.
#[derive(Debug, Clone, Default)]
pub struct NullSnapshotStore;

impl NullSnapshotStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SnapshotStore for NullSnapshotStore {
    async fn load(&self) -> BoardResult<SignalMap> {
        Ok(SignalMap::new())
    }

    async fn save(&self, _signals: &SignalMap) -> BoardResult<()> {
        Ok(())
    }
}
