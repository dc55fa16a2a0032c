//! Error types for registry construction and allocation.
//!
//! All variants are structural pre/postconditions. Nothing here is retried
//! internally; the caller rebuilds the registry and solves again if it wants.

use thiserror::Error;

/// Registry construction errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// An identifier was inserted twice.
    #[error("Duplicate actuator id: {0}")]
    DuplicateId(String),

    /// A coefficient is NaN or infinite.
    #[error("Actuator '{id}' has non-finite coefficient (torque {torque_coeff}, thrust {thrust_coeff})")]
    NonFiniteCoefficient {
        id: String,
        torque_coeff: f64,
        thrust_coeff: f64,
    },
}

/// Allocation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// Registry has fewer than two actuators; nothing was mutated.
    #[error("Insufficient actuators: {count} (at least 2 required)")]
    InsufficientActuators { count: usize },

    /// A round was started with every actuator already committed.
    #[error("No unallocated actuators left to pivot")]
    NoUnallocatedActuators,

    /// Normalization divisor is zero or not finite.
    #[error("Degenerate solution: maximum throttle is {max_throttle}")]
    DegenerateSolution { max_throttle: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = AllocationError::InsufficientActuators { count: 1 };
        assert!(err.to_string().contains("1"));

        let err = AllocationError::DegenerateSolution { max_throttle: 0.0 };
        assert!(err.to_string().contains("maximum throttle is 0"));

        let err = RegistryError::DuplicateId("port".to_string());
        assert!(err.to_string().contains("port"));
    }
}
