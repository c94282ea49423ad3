//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides (STIGMERGY_*)
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
