//! Greedy torque-balancing allocator.
//!
//! Each round commits the unallocated actuator with the smallest torque
//! magnitude (the pivot) to full throttle, then walks the remaining
//! unallocated actuators in registry order, letting every opposite-signed
//! one counterbalance what is left of the net torque. After the rounds, all
//! throttles are divided by the largest one so the group fits `[0, 1]`.
//!
//! ## Lifecycle
//!
//! `Unsolved → (N ≤ len-1 rounds) → Normalized`. A registry is solved once;
//! nothing here resets throttles.

use thrust_common::consts::{MIN_ACTUATORS, THROTTLE_FULL};
use thrust_common::report::{NullSink, ReportSink, SnapshotPhase};
use tracing::{debug, info};

use crate::actuator::{ActuatorId, sign};
use crate::config::StopRule;
use crate::error::AllocationError;
use crate::registry::Registry;

/// Outcome of a successful [`Allocator::solve`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Solution {
    /// Net torque left after normalization. Zero for an exact solution.
    pub net_torque: f64,
    /// Net thrust after normalization.
    pub net_thrust: f64,
    /// Allocation rounds executed.
    pub rounds: usize,
    /// Divisor used by normalization (the pre-normalization max throttle).
    pub max_throttle: f64,
}

impl Solution {
    /// True when the residual torque is exactly zero.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.net_torque == 0.0
    }
}

/// Drives one registry through allocation and normalization.
///
/// Borrows the registry mutably for its whole lifetime; only throttles are
/// written.
pub struct Allocator<'a> {
    registry: &'a mut Registry,
    stop_rule: StopRule,
}

impl<'a> Allocator<'a> {
    /// Allocator with the default (first imperfect round) stop rule.
    pub fn new(registry: &'a mut Registry) -> Self {
        Self::with_stop_rule(registry, StopRule::default())
    }

    pub fn with_stop_rule(registry: &'a mut Registry, stop_rule: StopRule) -> Self {
        Self {
            registry,
            stop_rule,
        }
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    pub fn stop_rule(&self) -> StopRule {
        self.stop_rule
    }

    // ─── Aggregate Queries ──────────────────────────────────────────

    /// Sum of current torque, accumulated in registry order.
    pub fn net_torque(&self) -> f64 {
        self.registry
            .iter()
            .fold(0.0, |acc, (_, a)| acc + a.current_torque())
    }

    /// Sum of current thrust, accumulated in registry order.
    pub fn net_thrust(&self) -> f64 {
        self.registry
            .iter()
            .fold(0.0, |acc, (_, a)| acc + a.current_thrust())
    }

    /// Largest throttle in the registry, or 0.0 when empty.
    pub fn max_throttle(&self) -> f64 {
        self.registry
            .iter()
            .map(|(_, a)| a.throttle())
            .fold(0.0, f64::max)
    }

    /// Ids with throttle below 1.0, in registry order.
    ///
    /// Evaluated lazily against current state; call again after a mutation.
    pub fn unallocated(&self) -> impl Iterator<Item = &ActuatorId> + '_ {
        self.registry
            .iter()
            .filter(|(_, a)| a.is_unallocated())
            .map(|(id, _)| id)
    }

    /// Unallocated id with the smallest `|torque_coeff|`; first one wins ties.
    pub fn pivot_smallest_magnitude(&self) -> Result<&ActuatorId, AllocationError> {
        self.pivot_index()
            .map(|i| self.registry.entry(i).0)
            .ok_or(AllocationError::NoUnallocatedActuators)
    }

    /// Unallocated id with the most negative torque coefficient.
    pub fn most_negative_torque(&self) -> Option<&ActuatorId> {
        self.extreme_unallocated(|candidate, best| candidate < best)
    }

    /// Unallocated id with the most positive torque coefficient.
    pub fn most_positive_torque(&self) -> Option<&ActuatorId> {
        self.extreme_unallocated(|candidate, best| candidate > best)
    }

    // ─── Allocation ─────────────────────────────────────────────────

    /// One pivot-and-counterbalance round.
    ///
    /// # Errors
    /// `AllocationError::NoUnallocatedActuators` if every actuator is
    /// already at or above full throttle. The registry is untouched then.
    pub fn run_allocation_round(&mut self) -> Result<(), AllocationError> {
        let pivot = self
            .pivot_index()
            .ok_or(AllocationError::NoUnallocatedActuators)?;

        self.registry.actuator_mut(pivot).set_throttle(THROTTLE_FULL);
        let mut remaining = self.net_torque();
        {
            let (id, a) = self.registry.entry(pivot);
            debug!(pivot = %id, torque_coeff = a.torque_coeff(), remaining, "pivot committed");
        }

        for i in 0..self.registry.len() {
            if !self.registry.entry(i).1.is_unallocated() {
                continue;
            }
            if remaining == 0.0 {
                break;
            }
            let actuator = self.registry.actuator_mut(i);
            if sign(actuator.torque_coeff()) == sign(remaining) {
                continue;
            }
            remaining = actuator.counterbalance(remaining);

            let (id, a) = self.registry.entry(i);
            debug!(
                id = %id,
                torque_coeff = a.torque_coeff(),
                throttle = a.throttle(),
                remaining,
                "counterbalanced"
            );
        }
        Ok(())
    }

    /// Solve without reporting.
    pub fn solve(&mut self) -> Result<Solution, AllocationError> {
        self.solve_with_sink(&mut NullSink)
    }

    /// Run up to `len - 1` rounds under the stop rule, then normalize.
    ///
    /// The loop also ends once no actuator is left below full throttle.
    ///
    /// `sink` receives the initial state, every round and the normalized
    /// result.
    ///
    /// # Errors
    /// - `InsufficientActuators` for fewer than two actuators, before any mutation
    /// - `DegenerateSolution` if the largest throttle is zero or not finite
    pub fn solve_with_sink<S: ReportSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<Solution, AllocationError> {
        let count = self.registry.len();
        if count < MIN_ACTUATORS {
            return Err(AllocationError::InsufficientActuators { count });
        }

        sink.record(&self.registry.snapshot(SnapshotPhase::Initial));

        let max_rounds = count - 1;
        let mut rounds = 0;
        while rounds < max_rounds {
            // Equal and opposite pairs can commit everything before the
            // round budget runs out. That state is final, not an error.
            if self.unallocated().next().is_none() {
                debug!(round = rounds, "every actuator committed");
                break;
            }
            self.run_allocation_round()?;
            rounds += 1;

            let net_torque = self.net_torque();
            sink.record(&self.registry.snapshot(SnapshotPhase::Round(rounds)));
            debug!(round = rounds, net_torque, "round complete");

            if self.stop_rule.should_stop(net_torque) {
                info!(
                    round = rounds,
                    max_rounds,
                    net_torque,
                    stop_rule = %self.stop_rule,
                    "stop rule triggered"
                );
                break;
            }
        }

        let max_throttle = self.normalize()?;
        sink.record(&self.registry.snapshot(SnapshotPhase::Normalized));

        let solution = Solution {
            net_torque: self.net_torque(),
            net_thrust: self.net_thrust(),
            rounds,
            max_throttle,
        };
        info!(
            rounds,
            net_torque = solution.net_torque,
            net_thrust = solution.net_thrust,
            exact = solution.is_exact(),
            "allocation solved"
        );
        Ok(solution)
    }

    /// Divide every throttle by the group maximum; returns the divisor.
    fn normalize(&mut self) -> Result<f64, AllocationError> {
        let max_throttle = self.max_throttle();
        if max_throttle == 0.0 || !max_throttle.is_finite() {
            return Err(AllocationError::DegenerateSolution { max_throttle });
        }
        for a in self.registry.actuators_mut() {
            a.set_throttle(a.throttle() / max_throttle);
        }
        Ok(max_throttle)
    }

    fn pivot_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, (_, a)) in self.registry.iter().enumerate() {
            if !a.is_unallocated() {
                continue;
            }
            let magnitude = a.torque_coeff().abs();
            // Strict comparison keeps the earliest candidate on ties.
            if best.is_none_or(|(_, m)| magnitude < m) {
                best = Some((i, magnitude));
            }
        }
        best.map(|(i, _)| i)
    }

    fn extreme_unallocated(&self, better: impl Fn(f64, f64) -> bool) -> Option<&ActuatorId> {
        let mut best: Option<(&ActuatorId, f64)> = None;
        for (id, a) in self.registry.iter().filter(|(_, a)| a.is_unallocated()) {
            let torque = a.torque_coeff();
            if best.is_none_or(|(_, t)| better(torque, t)) {
                best = Some((id, torque));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Solve `registry` with the default stop rule.
pub fn solve(registry: &mut Registry) -> Result<Solution, AllocationError> {
    Allocator::new(registry).solve()
}
