//! Registry construction: explicit lists, config entries or a random
//! population.
//!
//! The random population mirrors the bench setup the allocator was tuned
//! on: a handful of thrusters with integer torque and thrust coefficients.
//! Seed the RNG for a reproducible registry.

use rand::Rng;
use thrust_common::config::ConfigError;
use thrust_common::consts::GENERATED_ID_PREFIX;

use crate::actuator::ActuatorId;
use crate::config::{ActuatorEntry, GeneratorConfig};
use crate::error::RegistryError;
use crate::registry::Registry;

/// Collects `(id, torque, thrust)` triples and builds a [`Registry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    entries: Vec<(ActuatorId, f64, f64)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one actuator; order of calls is registry order.
    pub fn with_actuator(
        mut self,
        id: impl Into<ActuatorId>,
        torque_coeff: f64,
        thrust_coeff: f64,
    ) -> Self {
        self.entries.push((id.into(), torque_coeff, thrust_coeff));
        self
    }

    /// Append config entries in file order.
    pub fn with_entries<'a>(mut self, entries: impl IntoIterator<Item = &'a ActuatorEntry>) -> Self {
        for e in entries {
            self.entries
                .push((ActuatorId::new(e.id.clone()), e.torque, e.thrust));
        }
        self
    }

    /// Random population shaped by `config`.
    ///
    /// Actuator count, torque and thrust are drawn uniformly from the
    /// inclusive config ranges. Ids are `thruster-NN` in creation order.
    /// Inverted or out-of-bounds ranges are rejected before any draw.
    pub fn random<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let count = rng.gen_range(config.min_actuators..=config.max_actuators);
        let width = count.saturating_sub(1).to_string().len().max(2);

        let mut builder = Self::new();
        for i in 0..count {
            let torque = rng.gen_range(config.torque_min..=config.torque_max);
            let thrust = rng.gen_range(config.thrust_min..=config.thrust_max);
            builder = builder.with_actuator(
                format!("{GENERATED_ID_PREFIX}-{i:0width$}"),
                f64::from(torque),
                f64::from(thrust),
            );
        }

        tracing::debug!(count, "random actuator population generated");
        Ok(builder)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the registry, failing on the first invalid entry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut registry = Registry::new();
        for (id, torque, thrust) in self.entries {
            registry.insert(id, torque, thrust)?;
        }
        Ok(registry)
    }
}
