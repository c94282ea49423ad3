//! Stigmergy CLI entry point.

use clap::Parser;

use stigmergy::cli::{handle_error, Cli, Commands};
use stigmergy::infrastructure::config::ConfigLoader;
use stigmergy::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err:#}");
            std::process::exit(2);
        }
    };

    if let Err(err) = init_logging(&config.logging) {
        eprintln!("Logging setup error: {err:#}");
        std::process::exit(2);
    }

    let result = match cli.command {
        Commands::Deposit {
            task_id,
            approach,
            success_metric,
            agent,
        } => {
            stigmergy::cli::commands::board::deposit(
                &config,
                &task_id,
                &approach,
                success_metric,
                &agent,
                cli.json,
            )
            .await
        }
        Commands::Signals { task_id, agent } => {
            stigmergy::cli::commands::board::signals(&config, &task_id, &agent, cli.json).await
        }
        Commands::Strongest { task_id } => {
            stigmergy::cli::commands::board::strongest(&config, &task_id, cli.json).await
        }
        Commands::Decay => stigmergy::cli::commands::board::decay(&config, cli.json).await,
        Commands::Board => stigmergy::cli::commands::board::board_state(&config, cli.json).await,
        Commands::Demo {
            agents,
            cycles,
            task_id,
            seed,
        } => {
            stigmergy::cli::commands::demo::run(&config, agents, cycles, &task_id, seed, cli.json)
                .await
        }
    };

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
