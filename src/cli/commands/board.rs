//! Board subcommands: deposit, signals, strongest, decay, board view.

use std::sync::Arc;

use anyhow::Result;

use crate::cli::display::list_table;
use crate::domain::models::{Config, SignalReading};
use crate::infrastructure::persistence::JsonSnapshotStore;
use crate::services::{DepositOutcome, SignalBoard};

/// Open the configured board, seeded from the snapshot file.
pub async fn open_board(config: &Config) -> SignalBoard<JsonSnapshotStore> {
    let store = Arc::new(JsonSnapshotStore::new(config.storage.snapshot_path.clone()));
    SignalBoard::load(store, config.board.clone()).await
}

/// Handle the deposit command.
pub async fn deposit(
    config: &Config,
    task_id: &str,
    approach: &str,
    success_metric: f64,
    agent: &str,
    json: bool,
) -> Result<()> {
    let board = open_board(config).await;
    let outcome = board
        .deposit_signal(task_id, approach, success_metric, agent)
        .await;

    let (action, previous) = match outcome {
        DepositOutcome::Created { .. } => ("created", None),
        DepositOutcome::Amplified { previous, .. } => ("amplified", Some(previous)),
        DepositOutcome::Attenuated { previous, .. } => ("attenuated", Some(previous)),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "task_id": task_id,
                "approach": approach,
                "action": action,
                "previous_strength": previous,
                "strength": outcome.strength(),
            }))?
        );
    } else {
        match previous {
            Some(previous) => println!(
                "{action} '{approach}' on '{task_id}': {previous:.1} -> {:.1}",
                outcome.strength()
            ),
            None => println!(
                "created '{approach}' on '{task_id}' with strength {:.1}",
                outcome.strength()
            ),
        }
    }
    Ok(())
}

/// Handle the signals command.
pub async fn signals(config: &Config, task_id: &str, agent: &str, json: bool) -> Result<()> {
    let board = open_board(config).await;
    let readings = board.read_signals(task_id, agent).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&readings)?);
    } else if readings.is_empty() {
        println!("No live signals for '{task_id}'.");
    } else {
        println!("{}", signal_table(&readings));
    }
    Ok(())
}

/// Handle the strongest command.
pub async fn strongest(config: &Config, task_id: &str, json: bool) -> Result<()> {
    let board = open_board(config).await;
    let strongest = board.strongest_signal(task_id).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&strongest)?);
    } else {
        match strongest {
            Some(reading) => println!(
                "'{}' at strength {:.1} (metric {:.2})",
                reading.approach, reading.strength, reading.success_metric
            ),
            None => println!("No live signals for '{task_id}'."),
        }
    }
    Ok(())
}

/// Handle the decay command.
pub async fn decay(config: &Config, json: bool) -> Result<()> {
    let board = open_board(config).await;
    let report = board.decay().await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "pruned_signals": report.pruned_signals,
                "pruned_tasks": report.pruned_tasks,
            }))?
        );
    } else {
        println!(
            "Pruned {} signal(s) and {} empty task(s).",
            report.pruned_signals, report.pruned_tasks
        );
    }
    Ok(())
}

/// Handle the board command.
pub async fn board_state(config: &Config, json: bool) -> Result<()> {
    let board = open_board(config).await;
    let snapshot = board.snapshot().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else if snapshot.total_tasks == 0 {
        println!("Board is empty.");
    } else {
        println!(
            "{} task(s), {} signal(s):",
            snapshot.total_tasks, snapshot.total_signals
        );
        let mut table = list_table(&["task", "approach", "strength", "age"]);
        for (task_id, states) in &snapshot.tasks {
            for state in states {
                table.add_row(vec![
                    task_id.clone(),
                    state.approach.clone(),
                    format!("{:.1}", state.strength),
                    format_age(state.age_secs),
                ]);
            }
        }
        println!("{table}");
    }
    Ok(())
}

fn signal_table(readings: &[SignalReading]) -> comfy_table::Table {
    let mut table = list_table(&["approach", "strength", "metric", "age", "from self"]);
    for reading in readings {
        table.add_row(vec![
            reading.approach.clone(),
            format!("{:.1}", reading.strength),
            format!("{:.2}", reading.success_metric),
            format_age(reading.age_secs),
            if reading.from_self { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

fn format_age(age_secs: f64) -> String {
    if age_secs >= 3600.0 {
        format!("{:.1}h", age_secs / 3600.0)
    } else if age_secs >= 60.0 {
        format!("{:.1}m", age_secs / 60.0)
    } else {
        format!("{age_secs:.0}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(42.0), "42s");
        assert_eq!(format_age(90.0), "1.5m");
        assert_eq!(format_age(5400.0), "1.5h");
    }
}
