//! Domain layer for the stigmergy coordination board.
//!
//! This module contains core business logic and domain models.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{BoardError, BoardResult};
