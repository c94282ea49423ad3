//! Configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid decay_constant_secs: {0}. Must be positive")]
    InvalidDecayConstant(f64),

    #[error("Invalid amplification_factor: {0}. Must be positive")]
    InvalidAmplificationFactor(f64),

    #[error("Invalid attenuation_factor: {0}. Must be in (0, 1)")]
    InvalidAttenuationFactor(f64),

    #[error("Invalid consensus_threshold: {0}. Must be in [0, 1]")]
    InvalidConsensusThreshold(f64),

    #[error("Invalid prune_floor: {0}. Must be non-negative")]
    InvalidPruneFloor(f64),

    #[error("Snapshot path cannot be empty")]
    EmptySnapshotPath,

    #[error("Default approach set cannot be empty")]
    EmptyDefaultApproaches,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .stigmergy/config.yaml (project config)
    /// 3. .stigmergy/local.yaml (project local overrides, optional)
    /// 4. Environment variables (STIGMERGY_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".stigmergy/config.yaml"))
            .merge(Yaml::file(".stigmergy/local.yaml"))
            .merge(Env::prefixed("STIGMERGY_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let board = &config.board;

        if board.decay_constant_secs <= 0.0 {
            return Err(ConfigError::InvalidDecayConstant(board.decay_constant_secs));
        }

        if board.amplification_factor <= 0.0 {
            return Err(ConfigError::InvalidAmplificationFactor(
                board.amplification_factor,
            ));
        }

        if board.attenuation_factor <= 0.0 || board.attenuation_factor >= 1.0 {
            return Err(ConfigError::InvalidAttenuationFactor(
                board.attenuation_factor,
            ));
        }

        if !(0.0..=1.0).contains(&board.consensus_threshold) {
            return Err(ConfigError::InvalidConsensusThreshold(
                board.consensus_threshold,
            ));
        }

        if board.prune_floor < 0.0 {
            return Err(ConfigError::InvalidPruneFloor(board.prune_floor));
        }

        if config.storage.snapshot_path.is_empty() {
            return Err(ConfigError::EmptySnapshotPath);
        }

        if config.coordination.default_approaches.is_empty() {
            return Err(ConfigError::EmptyDefaultApproaches);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
