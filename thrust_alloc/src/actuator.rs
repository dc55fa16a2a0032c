//! Single thruster model and its local counterbalance step.
//!
//! Coefficients are fixed at construction. Only the throttle moves, and it
//! is deliberately left unbounded here: a counterbalance may push it past
//! 1.0, and the allocator's final normalization brings the whole group back
//! into `[0, 1]`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thrust_common::consts::THROTTLE_FULL;

/// Stable identifier of an actuator within a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActuatorId(String);

impl ActuatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActuatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActuatorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ActuatorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Direction of a torque value: `-1` below zero, `+1` otherwise.
///
/// Zero counts as positive. This decides tie behaviour when the remaining
/// torque is exactly zero, so it must not become a three-way sign.
#[inline]
pub fn sign(x: f64) -> i8 {
    if x < 0.0 { -1 } else { 1 }
}

/// One thruster: fixed coefficients plus a mutable throttle.
#[derive(Debug, Clone, PartialEq)]
pub struct Actuator {
    torque_coeff: f64,
    thrust_coeff: f64,
    throttle: f64,
}

impl Actuator {
    /// New actuator at throttle 0.0.
    pub fn new(torque_coeff: f64, thrust_coeff: f64) -> Self {
        Self {
            torque_coeff,
            thrust_coeff,
            throttle: 0.0,
        }
    }

    #[inline]
    pub fn torque_coeff(&self) -> f64 {
        self.torque_coeff
    }

    #[inline]
    pub fn thrust_coeff(&self) -> f64 {
        self.thrust_coeff
    }

    #[inline]
    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Torque contributed at the current throttle.
    #[inline]
    pub fn current_torque(&self) -> f64 {
        self.throttle * self.torque_coeff
    }

    /// Thrust contributed at the current throttle.
    #[inline]
    pub fn current_thrust(&self) -> f64 {
        self.throttle * self.thrust_coeff
    }

    /// True while the throttle is below the full-commit level.
    #[inline]
    pub fn is_unallocated(&self) -> bool {
        self.throttle < THROTTLE_FULL
    }

    #[inline]
    pub(crate) fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle;
    }

    /// Raise the throttle far enough to cancel `remaining_torque`.
    ///
    /// Returns the torque still left after this actuator's contribution.
    /// Returns the input unchanged when the actuator is fully committed,
    /// pushes torque the same way as `remaining_torque`, or produces no
    /// torque at all. The increment is not capped at 1.0.
    pub fn counterbalance(&mut self, remaining_torque: f64) -> f64 {
        if self.throttle == THROTTLE_FULL || sign(self.torque_coeff) == sign(remaining_torque) {
            return remaining_torque;
        }
        // Zero coefficient would need an infinite increment.
        if self.torque_coeff == 0.0 {
            return remaining_torque;
        }

        let needed = remaining_torque.abs() / self.torque_coeff.abs();
        let old = self.current_torque();
        self.throttle += needed;
        let new = self.current_torque();
        remaining_torque + (new - old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_maps_zero_to_positive() {
        assert_eq!(sign(-0.5), -1);
        assert_eq!(sign(0.0), 1);
        assert_eq!(sign(-0.0), 1);
        assert_eq!(sign(3.0), 1);
    }

    #[test]
    fn derived_torque_and_thrust() {
        let mut a = Actuator::new(-4.0, 2.0);
        assert_eq!(a.current_torque(), 0.0);
        assert_eq!(a.current_thrust(), 0.0);

        a.set_throttle(0.5);
        assert_eq!(a.current_torque(), -2.0);
        assert_eq!(a.current_thrust(), 1.0);
        assert_eq!(a.torque_coeff(), -4.0);
        assert_eq!(a.thrust_coeff(), 2.0);
    }

    #[test]
    fn counterbalance_cancels_opposite_torque() {
        let mut a = Actuator::new(10.0, 1.0);
        let remaining = a.counterbalance(-1.0);
        assert!((a.throttle() - 0.1).abs() < 1e-12);
        assert!(remaining.abs() < 1e-12);
    }

    #[test]
    fn counterbalance_matches_hand_computed_fixture() {
        // old = 0.25 * -8 = -2; needed = 6 / 8 = 0.75; new = 1.0 * -8 = -8.
        let mut a = Actuator::new(-8.0, 1.0);
        a.set_throttle(0.25);
        let remaining = a.counterbalance(6.0);
        assert_eq!(a.throttle(), 1.0);
        assert_eq!(remaining, 6.0 + (-8.0 - -2.0));
        assert_eq!(remaining, 0.0);
    }

    #[test]
    fn counterbalance_may_exceed_full_throttle() {
        let mut a = Actuator::new(-2.0, 1.0);
        let remaining = a.counterbalance(5.0);
        assert_eq!(a.throttle(), 2.5);
        assert_eq!(remaining, 0.0);
    }

    #[test]
    fn counterbalance_skips_same_sign() {
        let mut a = Actuator::new(-4.0, 1.0);
        assert_eq!(a.counterbalance(-1.0), -1.0);
        assert_eq!(a.throttle(), 0.0);

        // Zero remaining torque counts as positive.
        let mut b = Actuator::new(3.0, 1.0);
        assert_eq!(b.counterbalance(0.0), 0.0);
        assert_eq!(b.throttle(), 0.0);
    }

    #[test]
    fn counterbalance_skips_fully_committed() {
        let mut a = Actuator::new(5.0, 1.0);
        a.set_throttle(1.0);
        assert_eq!(a.counterbalance(-3.0), -3.0);
        assert_eq!(a.throttle(), 1.0);
    }

    #[test]
    fn counterbalance_skips_zero_coefficient() {
        let mut a = Actuator::new(0.0, 4.0);
        assert_eq!(a.counterbalance(-3.0), -3.0);
        assert_eq!(a.throttle(), 0.0);
    }

    #[test]
    fn counterbalance_never_grows_remaining_magnitude() {
        for (torque, remaining) in [(7.0, -3.0), (-3.0, 11.0), (0.5, -0.25), (-20.0, 1.0)] {
            let mut a = Actuator::new(torque, 1.0);
            let after = a.counterbalance(remaining);
            assert!(after.abs() <= remaining.abs());
        }
    }

    #[test]
    fn unallocated_until_full() {
        let mut a = Actuator::new(1.0, 1.0);
        assert!(a.is_unallocated());
        a.set_throttle(0.999);
        assert!(a.is_unallocated());
        a.set_throttle(1.0);
        assert!(!a.is_unallocated());
        a.set_throttle(1.5);
        assert!(!a.is_unallocated());
    }

    #[test]
    fn id_display_and_conversion() {
        let id: ActuatorId = "port-aft".into();
        assert_eq!(id.to_string(), "port-aft");
        assert_eq!(id.as_str(), "port-aft");
        assert_eq!(ActuatorId::from(String::from("x")), ActuatorId::new("x"));
    }
}
