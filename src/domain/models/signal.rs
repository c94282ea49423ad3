//! Signal domain model.
//!
//! A signal is one agent's endorsement of an approach to a task. Signals
//! live on the shared board, lose strength exponentially with age, and are
//! pruned once they fall below the configured floor. Decay is computed at
//! read time; the stored `strength` is only rewritten by deposits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The full signal map: task id to the task's live signals.
///
/// Per-task signal lists keep insertion order, which is what breaks ties
/// between equal strengths on read.
pub type SignalMap = HashMap<String, Vec<Signal>>;

/// Upper bound on deposited strength.
pub const MAX_STRENGTH: f64 = 100.0;

/// Weight of the newest observation when smoothing `success_metric`.
pub const METRIC_SMOOTHING: f64 = 0.3;

/// Clamp a quality observation into the unit interval.
///
/// Out-of-range metrics are clamped rather than rejected: a deposit must
/// never fail, and a runaway executor reporting `1.7` should count as a
/// strong endorsement, not a poisoned record.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// A signal deposited on the coordination board.
///
/// At most one live signal exists per `(task_id, approach)` pair; repeat
/// deposits mutate the existing record in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Task this signal coordinates.
    pub task_id: String,
    /// Strategy label, unique within the task.
    pub approach: String,
    /// Deposited confidence in `[0, MAX_STRENGTH]`, before decay.
    pub strength: f64,
    /// When strength was last deposited or adjusted; decay baseline.
    pub timestamp: DateTime<Utc>,
    /// Agent that first deposited this signal; baseline for the consensus
    /// test on later deposits.
    pub deposited_by: String,
    /// Exponentially smoothed quality observation in `[0, 1]`.
    pub success_metric: f64,
}

impl Signal {
    /// Create a fresh signal from a first deposit.
    pub fn new(
        task_id: impl Into<String>,
        approach: impl Into<String>,
        success_metric: f64,
        agent_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let metric = clamp_unit(success_metric);
        Self {
            task_id: task_id.into(),
            approach: approach.into(),
            strength: metric * MAX_STRENGTH,
            timestamp: now,
            deposited_by: agent_id.into(),
            success_metric: metric,
        }
    }

    /// Signal age in seconds at `now`.
    ///
    /// A clock that went backwards yields zero rather than a negative age.
    pub fn age_secs(&self, now: DateTime<Utc>) -> f64 {
        let millis = now.signed_duration_since(self.timestamp).num_milliseconds();
        (millis.max(0) as f64) / 1000.0
    }

    /// Current strength after exponential decay.
    ///
    /// Pure: never mutates the signal. `decay_constant_secs` is the time
    /// constant of the exponential, configured per board.
    pub fn decayed_strength(&self, now: DateTime<Utc>, decay_constant_secs: f64) -> f64 {
        self.strength * (-self.age_secs(now) / decay_constant_secs).exp()
    }

    /// Fold a new quality observation into the smoothed metric.
    pub fn smooth_metric(&mut self, observation: f64) {
        let observation = clamp_unit(observation);
        self.success_metric =
            self.success_metric * (1.0 - METRIC_SMOOTHING) + observation * METRIC_SMOOTHING;
    }
}

/// One surviving signal as seen by a reading agent.
///
/// Strength here is already decayed to the read instant.
#[derive(Debug, Clone, Serialize)]
pub struct SignalReading {
    /// Strategy label.
    pub approach: String,
    /// Decayed strength at read time.
    pub strength: f64,
    /// Smoothed quality observation.
    pub success_metric: f64,
    /// Seconds since the signal was last deposited.
    pub age_secs: f64,
    /// Whether the reading agent originally deposited this signal.
    pub from_self: bool,
}

/// Read-only view of one signal for observability.
#[derive(Debug, Clone, Serialize)]
pub struct SignalState {
    /// Strategy label.
    pub approach: String,
    /// Decayed strength at snapshot time.
    pub strength: f64,
    /// Seconds since the last deposit.
    pub age_secs: f64,
}

/// Read-only view of the whole board for observability.
///
/// Produced by `SignalBoard::snapshot`; never feeds back into the board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    /// Number of tasks with at least one live signal.
    pub total_tasks: usize,
    /// Number of live signals across all tasks.
    pub total_signals: usize,
    /// Per-task signal states, keyed by task id.
    pub tasks: BTreeMap<String, Vec<SignalState>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_signal_shape() {
        let now = Utc::now();
        let signal = Signal::new("t1", "bfs", 0.9, "agent-1", now);

        assert_eq!(signal.task_id, "t1");
        assert_eq!(signal.approach, "bfs");
        assert!((signal.strength - 90.0).abs() < f64::EPSILON);
        assert!((signal.success_metric - 0.9).abs() < f64::EPSILON);
        assert_eq!(signal.deposited_by, "agent-1");
        assert_eq!(signal.timestamp, now);
    }

    #[test]
    fn test_new_signal_clamps_metric() {
        let now = Utc::now();
        let high = Signal::new("t1", "a", 1.7, "x", now);
        assert!((high.success_metric - 1.0).abs() < f64::EPSILON);
        assert!((high.strength - MAX_STRENGTH).abs() < f64::EPSILON);

        let low = Signal::new("t1", "b", -0.3, "x", now);
        assert!(low.success_metric.abs() < f64::EPSILON);
        assert!(low.strength.abs() < f64::EPSILON);
    }

    #[test]
    fn test_decay_is_monotone_non_increasing() {
        let now = Utc::now();
        let signal = Signal::new("t1", "a", 0.8, "x", now);

        let mut previous = signal.decayed_strength(now, 3600.0);
        for minutes in 1..=120 {
            let current = signal.decayed_strength(now + Duration::minutes(minutes), 3600.0);
            assert!(current <= previous, "decay increased at minute {minutes}");
            previous = current;
        }
    }

    #[test]
    fn test_decay_at_zero_age_is_identity() {
        let now = Utc::now();
        let signal = Signal::new("t1", "a", 0.8, "x", now);
        assert!((signal.decayed_strength(now, 3600.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_decay_one_time_constant() {
        let now = Utc::now();
        let signal = Signal::new("t1", "a", 1.0, "x", now);
        let later = now + Duration::seconds(3600);
        let expected = MAX_STRENGTH * (-1.0f64).exp();
        assert!((signal.decayed_strength(later, 3600.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_age_never_negative() {
        let now = Utc::now();
        let signal = Signal::new("t1", "a", 0.5, "x", now);
        assert!(signal.age_secs(now - Duration::seconds(30)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_smooth_metric_fixed_weight() {
        let now = Utc::now();
        let mut signal = Signal::new("t1", "a", 0.5, "x", now);
        signal.smooth_metric(1.0);
        assert!((signal.success_metric - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_smooth_metric_stays_in_unit_interval() {
        let now = Utc::now();
        let mut signal = Signal::new("t1", "a", 1.0, "x", now);
        signal.smooth_metric(5.0);
        assert!(signal.success_metric <= 1.0);
        signal.smooth_metric(-5.0);
        assert!(signal.success_metric >= 0.0);
    }
}
