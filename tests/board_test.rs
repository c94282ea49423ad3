//! Integration tests for board deposit/read/decay semantics.

use std::sync::Arc;

use chrono::{Duration, Utc};
use stigmergy::{BoardConfig, DepositOutcome, NullSnapshotStore, SignalBoard};

fn board() -> Arc<SignalBoard<NullSnapshotStore>> {
    Arc::new(SignalBoard::new(
        Arc::new(NullSnapshotStore::new()),
        BoardConfig::default(),
    ))
}

#[tokio::test]
async fn rapid_self_reinforcement_caps_at_max() {
    // deposit(0.9) then deposit(0.95) by the same agent with negligible
    // elapsed time: min(90 + 95 * 1.5, 100) = 100.
    let board = board();
    let now = Utc::now();

    board.deposit_signal_at("T1", "X", 0.9, "a1", now).await;
    let outcome = board.deposit_signal_at("T1", "X", 0.95, "a1", now).await;

    assert!((outcome.strength() - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn dissent_attenuates_by_fixed_factor() {
    // An 80-strength signal hit by a different agent reporting 0.5
    // (below the consensus threshold): 80 * 0.7 = 56.
    let board = board();
    let now = Utc::now();

    board.deposit_signal_at("T1", "Y", 0.8, "a1", now).await;
    let outcome = board.deposit_signal_at("T1", "Y", 0.5, "a2", now).await;

    assert!((outcome.strength() - 56.0).abs() < 1e-9);
}

#[tokio::test]
async fn amplification_never_decreases_strength() {
    let board = board();
    let mut now = Utc::now();

    board.deposit_signal_at("T1", "X", 0.6, "a1", now).await;

    for step in 0..20 {
        now += Duration::minutes(10);
        let metric = 0.05 * f64::from(step % 20);
        let before = board
            .strongest_signal_at("T1", now)
            .await
            .map_or(0.0, |r| r.strength);
        let outcome = board.deposit_signal_at("T1", "X", metric, "a1", now).await;
        assert!(
            outcome.strength() >= before - 1e-9,
            "self re-deposit decreased strength: {before} -> {}",
            outcome.strength()
        );
    }
}

#[tokio::test]
async fn attenuation_never_increases_strength() {
    let board = board();
    let mut now = Utc::now();

    board.deposit_signal_at("T1", "X", 0.9, "a1", now).await;

    for step in 0..10 {
        now += Duration::minutes(5);
        let metric = 0.07 * f64::from(step); // always <= 0.7
        let before = board
            .strongest_signal_at("T1", now)
            .await
            .map_or(0.0, |r| r.strength);
        let outcome = board
            .deposit_signal_at("T1", "X", metric, &format!("other_{step}"), now)
            .await;
        if let DepositOutcome::Attenuated { strength, .. } = outcome {
            assert!(
                strength <= before + 1e-9,
                "attenuation increased strength: {before} -> {strength}"
            );
        }
    }
}

#[tokio::test]
async fn creator_keeps_amplification_rights_after_dissent() {
    let board = board();
    let now = Utc::now();

    board.deposit_signal_at("T1", "X", 0.9, "a1", now).await;
    board.deposit_signal_at("T1", "X", 0.5, "a2", now).await;

    let before = board.strongest_signal_at("T1", now).await.unwrap().strength;
    let outcome = board.deposit_signal_at("T1", "X", 0.5, "a1", now).await;

    assert!(matches!(outcome, DepositOutcome::Amplified { .. }));
    assert!(
        outcome.strength() >= before,
        "creator re-deposit decreased strength: {before} -> {}",
        outcome.strength()
    );
}

#[tokio::test]
async fn reads_never_return_dead_signals() {
    let board = board();
    let now = Utc::now();

    board.deposit_signal_at("T1", "a", 0.9, "a1", now).await;
    board.deposit_signal_at("T1", "b", 0.05, "a1", now).await;

    for hours in 0..10 {
        let at = now + Duration::hours(hours);
        for reading in board.read_signals_at("T1", "a1", at).await {
            assert!(reading.strength > 1.0);
        }
    }
}

#[tokio::test]
async fn prune_sweep_twice_is_noop() {
    let board = board();
    let now = Utc::now();

    for i in 0..5 {
        board
            .deposit_signal_at(&format!("task_{i}"), "a", 0.8, "a1", now)
            .await;
    }

    let later = now + Duration::hours(8);
    let first = board.decay_at(later).await;
    assert_eq!(first.pruned_signals, 5);
    assert_eq!(first.pruned_tasks, 5);

    let second = board.decay_at(later).await;
    assert_eq!(second.pruned_signals, 0);
    assert_eq!(second.pruned_tasks, 0);
}

#[tokio::test]
async fn concurrent_deposits_are_all_visible() {
    let board = board();

    let mut handles = Vec::new();
    for i in 0..32 {
        let board = board.clone();
        handles.push(tokio::spawn(async move {
            board
                .deposit_signal("shared", &format!("approach_{i}"), 0.8, &format!("agent_{i}"))
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let readings = board.read_signals("shared", "observer").await;
    assert_eq!(readings.len(), 32);
    assert!(readings.iter().all(|r| r.strength > 70.0));
}

#[tokio::test]
async fn deposit_is_visible_to_subsequent_reads() {
    let board = board();

    board.deposit_signal("T1", "fresh", 0.9, "writer").await;
    let readings = board.read_signals("T1", "reader").await;

    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].approach, "fresh");
    assert!(!readings[0].from_self);
}

#[tokio::test]
async fn concurrent_reinforcement_of_one_signal_stays_consistent() {
    let board = board();
    board.deposit_signal("T1", "only", 0.5, "owner").await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let board = board.clone();
        handles.push(tokio::spawn(async move {
            // Mix of endorsements and dissent from distinct agents.
            let metric = if i % 2 == 0 { 0.9 } else { 0.3 };
            board
                .deposit_signal("T1", "only", metric, &format!("agent_{i}"))
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let snapshot = board.snapshot().await;
    assert_eq!(snapshot.total_signals, 1);
    let strength = snapshot.tasks["T1"][0].strength;
    assert!((0.0..=100.0).contains(&strength));
}

#[tokio::test]
async fn custom_prune_floor_is_honored() {
    let config = BoardConfig {
        prune_floor: 40.0,
        ..BoardConfig::default()
    };
    let board = SignalBoard::new(Arc::new(NullSnapshotStore::new()), config);
    let now = Utc::now();

    board.deposit_signal_at("T1", "weak", 0.3, "a1", now).await;
    board.deposit_signal_at("T1", "strong", 0.9, "a1", now).await;

    let readings = board.read_signals_at("T1", "a1", now).await;
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].approach, "strong");

    let report = board.decay_at(now).await;
    assert_eq!(report.pruned_signals, 1);
}
