//! Insertion-ordered actuator registry.
//!
//! Built once before allocation. Order is part of the contract: it breaks
//! pivot ties and fixes the counterbalance walk, so entries are stored in a
//! plain `Vec` and never reordered. Ids are unique; lookups by id are linear,
//! which is fine for thruster-sized registries.

use static_assertions::assert_impl_all;
use thrust_common::report::{ActuatorSnapshot, Snapshot, SnapshotPhase};

use crate::actuator::{Actuator, ActuatorId};
use crate::error::RegistryError;

/// Ordered mapping from [`ActuatorId`] to [`Actuator`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    entries: Vec<(ActuatorId, Actuator)>,
}

// Independent registries are solved on independent threads.
assert_impl_all!(Registry: Send, Sync);

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an actuator at throttle 0.0.
    ///
    /// # Errors
    /// - `RegistryError::DuplicateId` if `id` is already present
    /// - `RegistryError::NonFiniteCoefficient` if either coefficient is NaN or infinite
    pub fn insert(
        &mut self,
        id: impl Into<ActuatorId>,
        torque_coeff: f64,
        thrust_coeff: f64,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if self.contains(id.as_str()) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        if !torque_coeff.is_finite() || !thrust_coeff.is_finite() {
            return Err(RegistryError::NonFiniteCoefficient {
                id: id.to_string(),
                torque_coeff,
                thrust_coeff,
            });
        }
        if thrust_coeff < 0.0 {
            tracing::warn!(id = %id, thrust_coeff, "negative thrust coefficient");
        }
        self.entries
            .push((id, Actuator::new(torque_coeff, thrust_coeff)));
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Actuator> {
        self.index_of(id).map(|i| &self.entries[i].1)
    }

    /// Entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&ActuatorId, &Actuator)> + '_ {
        self.entries.iter().map(|(id, a)| (id, a))
    }

    pub fn ids(&self) -> impl Iterator<Item = &ActuatorId> + '_ {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Throttles in registry order.
    pub fn throttles(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, a)| a.throttle()).collect()
    }

    /// Full registry state tagged with `phase`.
    pub fn snapshot(&self, phase: SnapshotPhase) -> Snapshot {
        let mut net_torque = 0.0;
        let mut net_thrust = 0.0;
        let actuators = self
            .entries
            .iter()
            .map(|(id, a)| {
                net_torque += a.current_torque();
                net_thrust += a.current_thrust();
                ActuatorSnapshot {
                    id: id.to_string(),
                    torque_coeff: a.torque_coeff(),
                    thrust_coeff: a.thrust_coeff(),
                    throttle: a.throttle(),
                }
            })
            .collect();

        Snapshot {
            phase,
            actuators,
            net_torque,
            net_thrust,
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.as_str() == id)
    }

    #[inline]
    pub(crate) fn entry(&self, index: usize) -> (&ActuatorId, &Actuator) {
        let (id, a) = &self.entries[index];
        (id, a)
    }

    #[inline]
    pub(crate) fn actuator_mut(&mut self, index: usize) -> &mut Actuator {
        &mut self.entries[index].1
    }

    pub(crate) fn actuators_mut(&mut self) -> impl Iterator<Item = &mut Actuator> + '_ {
        self.entries.iter_mut().map(|(_, a)| a)
    }
}
