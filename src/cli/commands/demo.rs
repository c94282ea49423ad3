//! Multi-agent coordination demo.
//!
//! Spins up several agents against a single task. Each cycle, every agent
//! reads the board, picks an approach, "executes" it with a random outcome,
//! and deposits the result. Watch consensus form as one approach's signal
//! outgrows the rest.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::cli::commands::board::open_board;
use crate::cli::display::list_table;
use crate::domain::errors::BoardResult;
use crate::domain::models::Config;
use crate::domain::ports::TaskExecutor;
use crate::services::SwarmAgent;

/// Executor that fakes work with a random quality in `[0.5, 0.95)`.
struct RandomOutcomeExecutor {
    rng: Mutex<StdRng>,
}

impl RandomOutcomeExecutor {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl TaskExecutor for RandomOutcomeExecutor {
    async fn execute(&self, _task_id: &str, _approach: &str) -> BoardResult<f64> {
        Ok(self.rng.lock().await.random_range(0.5..0.95))
    }
}

/// Handle the demo command.
pub async fn run(
    config: &Config,
    agent_count: usize,
    cycles: usize,
    task_id: &str,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let board = Arc::new(open_board(config).await);
    let executor: Arc<dyn TaskExecutor> = Arc::new(RandomOutcomeExecutor::new(seed));

    let agents: Vec<_> = (0..agent_count)
        .map(|i| {
            let agent = SwarmAgent::new(
                format!("agent_{i}"),
                board.clone(),
                executor.clone(),
                config.coordination.default_approaches.clone(),
            );
            match seed {
                Some(seed) => agent.with_rng_seed(seed.wrapping_add(i as u64)),
                None => agent,
            }
        })
        .collect();

    for cycle in 1..=cycles {
        if !json {
            println!("--- cycle {cycle} ---");
        }
        for agent in &agents {
            let (approach, metric) = agent.execute_and_report(task_id).await?;
            if !json {
                println!(
                    "{}: '{approach}' on '{task_id}' (quality {metric:.2})",
                    agent.agent_id()
                );
            }
        }

        if !json {
            let snapshot = board.snapshot().await;
            if let Some(states) = snapshot.tasks.get(task_id) {
                let mut table = list_table(&["approach", "strength", "age"]);
                for state in states {
                    table.add_row(vec![
                        state.approach.clone(),
                        format!("{:.1}", state.strength),
                        format!("{:.0}s", state.age_secs),
                    ]);
                }
                println!("{table}\n");
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&board.snapshot().await)?);
    } else if let Some(strongest) = board.strongest_signal(task_id).await {
        println!(
            "consensus: '{}' at strength {:.1}",
            strongest.approach, strongest.strength
        );
    }
    Ok(())
}
