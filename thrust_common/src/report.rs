//! Report snapshots and sinks.
//!
//! The allocator publishes a [`Snapshot`] of the whole registry at fixed
//! points of a solve: before the first round, after every round and after
//! normalization. A [`ReportSink`] decides what to do with it; the allocator
//! itself never formats anything.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Point in the solve at which a snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotPhase {
    /// Registry as built, before any round.
    Initial,
    /// After allocation round `n` (1-based).
    Round(usize),
    /// After throttles were divided by the group maximum.
    Normalized,
}

impl fmt::Display for SnapshotPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => f.write_str("initial"),
            Self::Round(n) => write!(f, "round {n}"),
            Self::Normalized => f.write_str("normalized"),
        }
    }
}

/// One actuator's coefficients and throttle at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorSnapshot {
    /// Registry identifier.
    pub id: String,
    /// Signed torque produced at throttle 1.0.
    pub torque_coeff: f64,
    /// Thrust produced at throttle 1.0.
    pub thrust_coeff: f64,
    /// Throttle at snapshot time (may exceed 1.0 before normalization).
    pub throttle: f64,
}

/// Registry state plus aggregates, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SnapshotPhase,
    pub actuators: Vec<ActuatorSnapshot>,
    pub net_torque: f64,
    pub net_thrust: f64,
}

impl Snapshot {
    /// Throttle of the actuator with the given id, if present.
    pub fn throttle_of(&self, id: &str) -> Option<f64> {
        self.actuators
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.throttle)
    }
}

/// Receiver of allocation progress.
pub trait ReportSink {
    /// Called with every published snapshot, in solve order.
    fn record(&mut self, snapshot: &Snapshot);
}

/// Discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn record(&mut self, _snapshot: &Snapshot) {}
}

/// Keeps every snapshot in arrival order.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    snapshots: Vec<Snapshot>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Last snapshot recorded, normally the normalized one.
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Number of round snapshots recorded.
    pub fn rounds(&self) -> usize {
        self.snapshots
            .iter()
            .filter(|s| matches!(s.phase, SnapshotPhase::Round(_)))
            .count()
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl ReportSink for CollectingSink {
    fn record(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

/// Emits each snapshot as structured `tracing` events.
///
/// The aggregate line is logged at INFO, per-actuator lines at DEBUG.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn record(&mut self, snapshot: &Snapshot) {
        for a in &snapshot.actuators {
            tracing::debug!(
                phase = %snapshot.phase,
                id = %a.id,
                torque_coeff = a.torque_coeff,
                thrust_coeff = a.thrust_coeff,
                throttle = a.throttle,
                "actuator"
            );
        }
        tracing::info!(
            phase = %snapshot.phase,
            net_torque = snapshot.net_torque,
            net_thrust = snapshot.net_thrust,
            actuators = snapshot.actuators.len(),
            "allocation snapshot"
        );
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn record(&mut self, snapshot: &Snapshot) {
        (**self).record(snapshot);
    }
}
