//! Domain models.

pub mod config;
pub mod signal;

pub use config::{BoardConfig, Config, CoordinationConfig, LoggingConfig, StorageConfig};
pub use signal::{
    clamp_unit, BoardSnapshot, Signal, SignalMap, SignalReading, SignalState, MAX_STRENGTH,
    METRIC_SMOOTHING,
};
