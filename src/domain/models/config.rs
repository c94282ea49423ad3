//! Configuration model for the stigmergy board.

use serde::{Deserialize, Serialize};

/// Main configuration structure for the stigmergy crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Board decay and reinforcement tuning.
    #[serde(default)]
    pub board: BoardConfig,

    /// Snapshot persistence configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Agent-side coordination configuration.
    #[serde(default)]
    pub coordination: CoordinationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Decay and reinforcement parameters, one set per board instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BoardConfig {
    /// Time constant of exponential decay, in seconds.
    #[serde(default = "default_decay_constant_secs")]
    pub decay_constant_secs: f64,

    /// Multiplier applied to an endorsing deposit's contribution.
    #[serde(default = "default_amplification_factor")]
    pub amplification_factor: f64,

    /// Multiplier applied to current strength on a non-endorsing deposit.
    #[serde(default = "default_attenuation_factor")]
    pub attenuation_factor: f64,

    /// Success metric above which any agent's deposit counts as endorsement.
    #[serde(default = "default_consensus_threshold")]
    pub consensus_threshold: f64,

    /// Decayed strength at or below which a signal is dead.
    #[serde(default = "default_prune_floor")]
    pub prune_floor: f64,
}

const fn default_decay_constant_secs() -> f64 {
    3600.0
}

const fn default_amplification_factor() -> f64 {
    1.5
}

const fn default_attenuation_factor() -> f64 {
    0.7
}

const fn default_consensus_threshold() -> f64 {
    0.7
}

const fn default_prune_floor() -> f64 {
    1.0
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            decay_constant_secs: default_decay_constant_secs(),
            amplification_factor: default_amplification_factor(),
            attenuation_factor: default_attenuation_factor(),
            consensus_threshold: default_consensus_threshold(),
            prune_floor: default_prune_floor(),
        }
    }
}

/// Snapshot persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Path to the JSON snapshot file.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_snapshot_path() -> String {
    ".stigmergy/signals.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

/// Agent-side coordination configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CoordinationConfig {
    /// Approaches an agent falls back to when a task has no live signals.
    #[serde(default = "default_approaches")]
    pub default_approaches: Vec<String>,
}

fn default_approaches() -> Vec<String> {
    vec![
        "approach_a".to_string(),
        "approach_b".to_string(),
        "approach_c".to_string(),
    ]
}

impl Default for CoordinationConfig {
    fn default() -> Self {
        Self {
            default_approaches: default_approaches(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
