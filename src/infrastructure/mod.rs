//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - JSON snapshot persistence
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod persistence;
