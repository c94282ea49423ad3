//! Stigmergy - shared coordination board for independent agents
//!
//! Agents coordinate the way ants do: by modifying a shared environment
//! instead of talking to each other. Each agent deposits a strength signal
//! for the approach it tried on a task; signals decay exponentially with
//! age, endorsing deposits amplify them, and dissenting deposits attenuate
//! them. Reading the board and choosing proportionally to signal strength
//! is all the coordination there is.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Signal model, errors, and port traits
//! - **Service Layer** (`services`): The board and the coordinating agent
//! - **Infrastructure Layer** (`infrastructure`): Snapshot persistence,
//!   configuration, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stigmergy::domain::models::BoardConfig;
//! use stigmergy::domain::ports::NullSnapshotStore;
//! use stigmergy::services::SignalBoard;
//!
//! #[tokio::main]
//! async fn main() {
//!     let board = SignalBoard::new(Arc::new(NullSnapshotStore::new()), BoardConfig::default());
//!     board.deposit_signal("task_001", "approach_a", 0.9, "agent_0").await;
//!     let strongest = board.strongest_signal("task_001").await;
//!     assert!(strongest.is_some());
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{BoardError, BoardResult};
pub use domain::models::{
    BoardConfig, BoardSnapshot, Config, CoordinationConfig, LoggingConfig, Signal, SignalMap,
    SignalReading, StorageConfig,
};
pub use domain::ports::{NullSnapshotStore, SnapshotStore, TaskExecutor};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::persistence::JsonSnapshotStore;
pub use services::{DepositOutcome, PruneReport, SignalBoard, SwarmAgent};
