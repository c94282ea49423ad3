//! Signal board service: deposit, read, decay, prune.
//!
//! The board is the single shared mutable surface through which agents
//! coordinate. One coarse mutex guards the whole signal map, so a deposit
//! that returned is visible to every later read from any agent. Snapshot
//! persistence runs inside the critical section; a failed write is logged
//! and the board keeps serving from memory.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::models::{
    clamp_unit, BoardConfig, BoardSnapshot, Signal, SignalMap, SignalReading, SignalState,
    MAX_STRENGTH,
};
use crate::domain::ports::SnapshotStore;

/// Agent id used for reads that belong to no particular agent.
pub const SYSTEM_AGENT: &str = "system";

/// What a deposit did to the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepositOutcome {
    /// First deposit for this `(task, approach)` pair.
    Created {
        /// Initial strength.
        strength: f64,
    },
    /// Endorsing deposit on an existing signal.
    Amplified {
        /// Decayed strength before the deposit.
        previous: f64,
        /// Strength after amplification.
        strength: f64,
    },
    /// Non-endorsing deposit from another agent.
    Attenuated {
        /// Decayed strength before the deposit.
        previous: f64,
        /// Strength after attenuation.
        strength: f64,
    },
}

impl DepositOutcome {
    /// Strength of the signal after the deposit.
    pub fn strength(&self) -> f64 {
        match self {
            Self::Created { strength }
            | Self::Amplified { strength, .. }
            | Self::Attenuated { strength, .. } => *strength,
        }
    }
}

/// Report from a prune sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Signals removed because they fell at or below the prune floor.
    pub pruned_signals: usize,
    /// Task entries removed because they were left empty.
    pub pruned_tasks: usize,
}

/// The shared coordination board.
///
/// All operations take the board-wide lock, compute decay against a single
/// read of the clock, and release. No operation ever fails from an agent's
/// point of view.
pub struct SignalBoard<S: SnapshotStore> {
    config: BoardConfig,
    store: Arc<S>,
    signals: Mutex<SignalMap>,
}

impl<S: SnapshotStore> SignalBoard<S> {
    /// Create an empty board.
    pub fn new(store: Arc<S>, config: BoardConfig) -> Self {
        Self {
            config,
            store,
            signals: Mutex::new(SignalMap::new()),
        }
    }

    /// Create a board seeded from the snapshot store.
    ///
    /// A missing or unreadable snapshot starts the board empty; timestamps
    /// in a good snapshot are absolute, so decay continues across restarts.
    pub async fn load(store: Arc<S>, config: BoardConfig) -> Self {
        let signals = match store.load().await {
            Ok(map) => {
                let count: usize = map.values().map(Vec::len).sum();
                debug!(tasks = map.len(), signals = count, "loaded signal snapshot");
                map
            }
            Err(err) => {
                warn!(error = %err, "failed to load signal snapshot, starting empty");
                SignalMap::new()
            }
        };
        Self {
            config,
            store,
            signals: Mutex::new(signals),
        }
    }

    /// Board tuning parameters.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Deposit a signal about an approach to a task.
    ///
    /// `success_metric` is clamped to `[0, 1]`. Deposits never fail; the
    /// returned outcome says whether the signal was created, amplified, or
    /// attenuated.
    pub async fn deposit_signal(
        &self,
        task_id: &str,
        approach: &str,
        success_metric: f64,
        agent_id: &str,
    ) -> DepositOutcome {
        self.deposit_signal_at(task_id, approach, success_metric, agent_id, Utc::now())
            .await
    }

    /// Deposit with an explicit clock.
    pub async fn deposit_signal_at(
        &self,
        task_id: &str,
        approach: &str,
        success_metric: f64,
        agent_id: &str,
        now: DateTime<Utc>,
    ) -> DepositOutcome {
        let metric = clamp_unit(success_metric);
        let mut signals = self.signals.lock().await;

        let entry = signals.entry(task_id.to_string()).or_default();
        let outcome = match entry.iter_mut().find(|s| s.approach == approach) {
            Some(signal) => {
                let current = signal.decayed_strength(now, self.config.decay_constant_secs);

                // Consensus test: the original depositor reaffirming, or any
                // agent endorsing above the threshold, amplifies. Everything
                // else attenuates someone else's unconfirmed approach.
                let endorsing = signal.deposited_by == agent_id
                    || metric > self.config.consensus_threshold;

                let new_strength = if endorsing {
                    current + metric * MAX_STRENGTH * self.config.amplification_factor
                } else {
                    current * self.config.attenuation_factor
                };
                let new_strength = new_strength.min(MAX_STRENGTH);

                signal.strength = new_strength;
                signal.timestamp = now;
                signal.smooth_metric(metric);

                if endorsing {
                    info!(task_id, approach, previous = current, strength = new_strength,
                        "amplifying signal");
                    DepositOutcome::Amplified {
                        previous: current,
                        strength: new_strength,
                    }
                } else {
                    info!(task_id, approach, previous = current, strength = new_strength,
                        "attenuating signal");
                    DepositOutcome::Attenuated {
                        previous: current,
                        strength: new_strength,
                    }
                }
            }
            None => {
                let signal = Signal::new(task_id, approach, metric, agent_id, now);
                let strength = signal.strength;
                entry.push(signal);
                info!(task_id, approach, strength, "new signal");
                DepositOutcome::Created { strength }
            }
        };

        self.persist(&signals).await;
        outcome
    }

    /// Read the live signals for a task, strongest first.
    ///
    /// Signals at or below the prune floor are filtered out (but not yet
    /// removed; that is the sweep's job). Equal strengths keep deposit
    /// order.
    pub async fn read_signals(&self, task_id: &str, agent_id: &str) -> Vec<SignalReading> {
        self.read_signals_at(task_id, agent_id, Utc::now()).await
    }

    /// Read with an explicit clock.
    pub async fn read_signals_at(
        &self,
        task_id: &str,
        agent_id: &str,
        now: DateTime<Utc>,
    ) -> Vec<SignalReading> {
        let signals = self.signals.lock().await;

        let Some(entry) = signals.get(task_id) else {
            return Vec::new();
        };

        let mut readings: Vec<SignalReading> = entry
            .iter()
            .filter_map(|signal| {
                let strength = signal.decayed_strength(now, self.config.decay_constant_secs);
                (strength > self.config.prune_floor).then(|| SignalReading {
                    approach: signal.approach.clone(),
                    strength,
                    success_metric: signal.success_metric,
                    age_secs: signal.age_secs(now),
                    from_self: signal.deposited_by == agent_id,
                })
            })
            .collect();

        // Stable sort: ties stay in first-deposited order.
        readings.sort_by(|a, b| {
            b.strength
                .partial_cmp(&a.strength)
                .unwrap_or(Ordering::Equal)
        });
        readings
    }

    /// The strongest live signal for a task, if any.
    pub async fn strongest_signal(&self, task_id: &str) -> Option<SignalReading> {
        self.strongest_signal_at(task_id, Utc::now()).await
    }

    /// Strongest signal with an explicit clock.
    pub async fn strongest_signal_at(
        &self,
        task_id: &str,
        now: DateTime<Utc>,
    ) -> Option<SignalReading> {
        self.read_signals_at(task_id, SYSTEM_AGENT, now)
            .await
            .into_iter()
            .next()
    }

    /// Run a prune sweep: drop dead signals and empty task entries.
    ///
    /// Idempotent at a fixed instant; running it twice with no elapsed time
    /// removes nothing the second time.
    pub async fn decay(&self) -> PruneReport {
        self.decay_at(Utc::now()).await
    }

    /// Prune sweep with an explicit clock.
    pub async fn decay_at(&self, now: DateTime<Utc>) -> PruneReport {
        let mut signals = self.signals.lock().await;
        let mut report = PruneReport::default();

        signals.retain(|task_id, entry| {
            let before = entry.len();
            entry.retain(|signal| {
                signal.decayed_strength(now, self.config.decay_constant_secs)
                    > self.config.prune_floor
            });
            report.pruned_signals += before - entry.len();
            if entry.is_empty() {
                debug!(%task_id, "task has no live signals, removing entry");
                report.pruned_tasks += 1;
                false
            } else {
                true
            }
        });

        if report.pruned_signals > 0 {
            info!(
                pruned_signals = report.pruned_signals,
                pruned_tasks = report.pruned_tasks,
                "prune sweep complete"
            );
        }

        self.persist(&signals).await;
        report
    }

    /// Read-only view of the whole board with current decayed strengths.
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.snapshot_at(Utc::now()).await
    }

    /// Snapshot with an explicit clock.
    pub async fn snapshot_at(&self, now: DateTime<Utc>) -> BoardSnapshot {
        let signals = self.signals.lock().await;

        let tasks: std::collections::BTreeMap<String, Vec<SignalState>> = signals
            .iter()
            .map(|(task_id, entry)| {
                let states = entry
                    .iter()
                    .map(|signal| SignalState {
                        approach: signal.approach.clone(),
                        strength: signal.decayed_strength(now, self.config.decay_constant_secs),
                        age_secs: signal.age_secs(now),
                    })
                    .collect();
                (task_id.clone(), states)
            })
            .collect();

        BoardSnapshot {
            total_tasks: tasks.len(),
            total_signals: tasks.values().map(Vec::len).sum(),
            tasks,
        }
    }

    /// Flush the map to the snapshot store, logging failures.
    async fn persist(&self, signals: &SignalMap) {
        if let Err(err) = self.store.save(signals).await {
            warn!(error = %err, "failed to persist signal snapshot, continuing in memory");
        }
    }
}
