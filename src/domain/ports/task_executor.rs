//! Task executor port.

use async_trait::async_trait;

use crate::domain::errors::BoardResult;

/// External collaborator that performs the actual work for a task.
///
/// The board does not interpret what execution means; it only needs the
/// quality of the outcome, a success metric in `[0, 1]`, to deposit back
/// onto the board. Out-of-range values are clamped by the caller.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Execute `task_id` using `approach` and measure the outcome quality.
    async fn execute(&self, task_id: &str, approach: &str) -> BoardResult<f64>;
}
