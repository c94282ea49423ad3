//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stigmergy")]
#[command(about = "Stigmergic coordination board for independent agents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from a specific file instead of the default lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deposit a signal about an approach to a task
    Deposit {
        /// Task identifier
        task_id: String,

        /// Approach label
        approach: String,

        /// Observed success metric in [0, 1]
        success_metric: f64,

        /// Depositing agent identifier
        #[arg(short, long, default_value = "cli")]
        agent: String,
    },

    /// Read the live signals for a task, strongest first
    Signals {
        /// Task identifier
        task_id: String,

        /// Reading agent identifier (controls the from-self annotation)
        #[arg(short, long, default_value = "system")]
        agent: String,
    },

    /// Show the strongest live signal for a task
    Strongest {
        /// Task identifier
        task_id: String,
    },

    /// Run a prune sweep, removing dead signals
    Decay,

    /// Show the whole board with current decayed strengths
    Board,

    /// Run a multi-agent coordination demo against one task
    Demo {
        /// Number of agents
        #[arg(short, long, default_value_t = 5)]
        agents: usize,

        /// Number of cycles, each agent acting once per cycle
        #[arg(short, long, default_value_t = 3)]
        cycles: usize,

        /// Task identifier to coordinate on
        #[arg(short, long, default_value = "task_001")]
        task_id: String,

        /// Seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,
    },
}
