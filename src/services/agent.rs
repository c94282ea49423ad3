//! Coordinating agent: reads the board, picks an approach, reports back.
//!
//! Agents never talk to each other. Each one reads the current signal
//! strengths for a task, makes a weighted random choice, does the work
//! through its executor, and deposits the measured quality as a new signal.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::errors::BoardResult;
use crate::domain::models::{clamp_unit, CoordinationConfig};
use crate::domain::ports::{SnapshotStore, TaskExecutor};
use crate::services::board::SignalBoard;

/// An agent that coordinates through the signal board.
///
/// The random source is owned by the agent and seedable, so selection is
/// reproducible under test.
pub struct SwarmAgent<S: SnapshotStore> {
    agent_id: String,
    board: Arc<SignalBoard<S>>,
    executor: Arc<dyn TaskExecutor>,
    default_approaches: Vec<String>,
    rng: Mutex<StdRng>,
}

impl<S: SnapshotStore> SwarmAgent<S> {
    /// Create an agent with an entropy-seeded random source.
    pub fn new(
        agent_id: impl Into<String>,
        board: Arc<SignalBoard<S>>,
        executor: Arc<dyn TaskExecutor>,
        default_approaches: Vec<String>,
    ) -> Self {
        // An empty fallback set would leave the agent with nothing to pick
        // on a quiet board; substitute the stock defaults.
        let default_approaches = if default_approaches.is_empty() {
            CoordinationConfig::default().default_approaches
        } else {
            default_approaches
        };
        Self {
            agent_id: agent_id.into(),
            board,
            executor,
            default_approaches,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seed the agent's random source for deterministic selection.
    pub fn with_rng_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// This agent's identifier.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Pick an approach for a task, weighted by current signal strengths.
    ///
    /// With no live signals the choice is uniform over the configured
    /// default approaches.
    pub async fn select_approach(&self, task_id: &str) -> String {
        let readings = self.board.read_signals(task_id, &self.agent_id).await;
        let mut rng = self.rng.lock().await;

        if readings.is_empty() {
            let index = rng.random_range(0..self.default_approaches.len());
            let approach = self.default_approaches[index].clone();
            debug!(agent_id = %self.agent_id, task_id, %approach, "no signals, uniform fallback");
            return approach;
        }

        let total: f64 = readings.iter().map(|r| r.strength).sum();
        if total <= f64::EPSILON {
            return readings[0].approach.clone();
        }

        let draw = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for reading in &readings {
            cumulative += reading.strength;
            if draw <= cumulative {
                debug!(agent_id = %self.agent_id, task_id, approach = %reading.approach,
                    strength = reading.strength, "selected approach");
                return reading.approach.clone();
            }
        }

        // Floating-point shortfall: fall back to the last (weakest) entry.
        readings[readings.len() - 1].approach.clone()
    }

    /// Select an approach, execute the task, and deposit the outcome.
    ///
    /// The executor's metric is clamped to `[0, 1]` before deposit. Returns
    /// the approach taken and the clamped metric.
    pub async fn execute_and_report(&self, task_id: &str) -> BoardResult<(String, f64)> {
        let approach = self.select_approach(task_id).await;
        let metric = clamp_unit(self.executor.execute(task_id, &approach).await?);

        self.board
            .deposit_signal(task_id, &approach, metric, &self.agent_id)
            .await;

        Ok((approach, metric))
    }
}
