//! Service layer: the signal board and its coordinating agents.

pub mod agent;
pub mod board;

pub use agent::SwarmAgent;
pub use board::{DepositOutcome, PruneReport, SignalBoard, SYSTEM_AGENT};
