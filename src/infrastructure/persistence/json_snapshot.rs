//! JSON-file snapshot store.
//!
//! One document holds the whole board: a schema version plus one record per
//! task, each an ordered list of signals. Writes go through a temp file and
//! rename so a crash mid-write never leaves a torn snapshot behind.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;

use crate::domain::errors::{BoardError, BoardResult};
use crate::domain::models::{Signal, SignalMap};
use crate::domain::ports::SnapshotStore;

/// Snapshot schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotDocRef<'a> {
    schema_version: u32,
    tasks: &'a SignalMap,
}

#[derive(Deserialize)]
struct SnapshotDoc {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    #[serde(default)]
    tasks: HashMap<String, Vec<serde_json::Value>>,
}

// Pre-versioning snapshots carry no version field; treat them as v1.
const fn default_schema_version() -> u32 {
    1
}

/// Snapshot store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a store writing to `path`. Parent directories are created on
    /// first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load(&self) -> BoardResult<SignalMap> {
        let raw = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SignalMap::new());
            }
            Err(err) => return Err(err.into()),
        };

        let doc: SnapshotDoc = serde_json::from_slice(&raw)
            .map_err(|err| BoardError::MalformedSnapshot(err.to_string()))?;

        if doc.schema_version > SCHEMA_VERSION {
            return Err(BoardError::UnsupportedSchema {
                found: doc.schema_version,
                supported: SCHEMA_VERSION,
            });
        }

        // Decode record by record: one corrupt signal degrades the load,
        // it does not abort it.
        let mut map = SignalMap::new();
        for (task_id, records) in doc.tasks {
            let mut signals = Vec::with_capacity(records.len());
            for record in records {
                match serde_json::from_value::<Signal>(record) {
                    Ok(signal) => signals.push(signal),
                    Err(err) => {
                        warn!(%task_id, error = %err, "skipping malformed signal record");
                    }
                }
            }
            if !signals.is_empty() {
                map.insert(task_id, signals);
            }
        }
        Ok(map)
    }

    async fn save(&self, signals: &SignalMap) -> BoardResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let doc = SnapshotDocRef {
            schema_version: SCHEMA_VERSION,
            tasks: signals,
        };
        let json = serde_json::to_vec_pretty(&doc)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_map() -> SignalMap {
        let now = Utc::now();
        let mut map = SignalMap::new();
        map.insert(
            "t1".to_string(),
            vec![
                Signal::new("t1", "bfs", 0.9, "a1", now),
                Signal::new("t1", "dfs", 0.4, "a2", now),
            ],
        );
        map.insert("t2".to_string(), vec![Signal::new("t2", "greedy", 0.7, "a1", now)]);
        map
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("signals.json"));

        let map = sample_map();
        store.save(&map).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, map);
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("nope.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("deep/nested/signals.json"));
        store.save(&sample_map()).await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_malformed_record_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.json");
        let doc = serde_json::json!({
            "schema_version": 1,
            "tasks": {
                "t1": [
                    {
                        "task_id": "t1",
                        "approach": "good",
                        "strength": 50.0,
                        "timestamp": Utc::now(),
                        "deposited_by": "a1",
                        "success_metric": 0.5
                    },
                    { "approach": "truncated" }
                ]
            }
        });
        std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

        let store = JsonSnapshotStore::new(path);
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded["t1"].len(), 1);
        assert_eq!(loaded["t1"][0].approach, "good");
    }

    #[tokio::test]
    async fn test_garbage_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.json");
        std::fs::write(&path, b"not json at all").unwrap();

        let store = JsonSnapshotStore::new(path);
        assert!(matches!(
            store.load().await,
            Err(BoardError::MalformedSnapshot(_))
        ));
    }

    #[tokio::test]
    async fn test_newer_schema_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.json");
        std::fs::write(&path, br#"{"schema_version": 99, "tasks": {}}"#).unwrap();

        let store = JsonSnapshotStore::new(path);
        assert!(matches!(
            store.load().await,
            Err(BoardError::UnsupportedSchema { found: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_versionless_snapshot_is_v1() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.json");
        std::fs::write(&path, br#"{"tasks": {}}"#).unwrap();

        let store = JsonSnapshotStore::new(path);
        assert!(store.load().await.unwrap().is_empty());
    }
}
