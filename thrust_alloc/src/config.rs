//! Allocator configuration (TOML).
//!
//! ```toml
//! [shared]
//! service_name = "thrust-alloc"
//!
//! [allocator]
//! stop_rule = "first_imperfect"
//!
//! [generator]
//! seed = 42
//!
//! [[actuators]]
//! id = "port-aft"
//! torque = -10.0
//! thrust = 5.0
//! ```
//!
//! Every table is optional. When `[[actuators]]` is present the registry is
//! built from it in file order and `[generator]` is ignored.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thrust_common::config::{ConfigError, ConfigLoader, SharedConfig};
use thrust_common::consts::{
    DEFAULT_MAX_ACTUATORS, DEFAULT_MIN_ACTUATORS, DEFAULT_THRUST_RANGE, DEFAULT_TORQUE_RANGE,
    MAX_ACTUATORS, MIN_ACTUATORS,
};

// ─── Stop Rule ──────────────────────────────────────────────────────

/// When the round loop in `solve` ends early.
///
/// All rules are bounded by `len - 1` rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopRule {
    /// Stop right after the first round that leaves non-zero net torque.
    #[default]
    FirstImperfect,
    /// Stop right after the first round that reaches exactly zero net torque.
    FirstBalanced,
    /// Run every available round.
    Exhaustive,
}

impl StopRule {
    /// Whether the loop ends after a round that left `net_torque`.
    #[inline]
    pub fn should_stop(&self, net_torque: f64) -> bool {
        match self {
            Self::FirstImperfect => net_torque != 0.0,
            Self::FirstBalanced => net_torque == 0.0,
            Self::Exhaustive => false,
        }
    }
}

impl fmt::Display for StopRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstImperfect => "first_imperfect",
            Self::FirstBalanced => "first_balanced",
            Self::Exhaustive => "exhaustive",
        })
    }
}

impl FromStr for StopRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_imperfect" => Ok(Self::FirstImperfect),
            "first_balanced" => Ok(Self::FirstBalanced),
            "exhaustive" => Ok(Self::Exhaustive),
            other => Err(ConfigError::ValidationError(format!(
                "unknown stop rule '{other}' (expected first_imperfect, first_balanced or exhaustive)"
            ))),
        }
    }
}

// ─── Tables ─────────────────────────────────────────────────────────

/// `[allocator]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllocatorConfig {
    #[serde(default)]
    pub stop_rule: StopRule,
}

/// `[generator]` table: shape of a random actuator population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Smallest population size (inclusive).
    pub min_actuators: usize,
    /// Largest population size (inclusive).
    pub max_actuators: usize,
    pub torque_min: i32,
    pub torque_max: i32,
    pub thrust_min: i32,
    pub thrust_max: i32,
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_actuators: DEFAULT_MIN_ACTUATORS,
            max_actuators: DEFAULT_MAX_ACTUATORS,
            torque_min: DEFAULT_TORQUE_RANGE.0,
            torque_max: DEFAULT_TORQUE_RANGE.1,
            thrust_min: DEFAULT_THRUST_RANGE.0,
            thrust_max: DEFAULT_THRUST_RANGE.1,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_actuators < MIN_ACTUATORS {
            return Err(ConfigError::ValidationError(format!(
                "generator.min_actuators must be >= {MIN_ACTUATORS}, got {}",
                self.min_actuators
            )));
        }
        if self.min_actuators > self.max_actuators {
            return Err(ConfigError::ValidationError(format!(
                "generator.min_actuators ({}) > generator.max_actuators ({})",
                self.min_actuators, self.max_actuators
            )));
        }
        if self.max_actuators > MAX_ACTUATORS {
            return Err(ConfigError::ValidationError(format!(
                "generator.max_actuators must be <= {MAX_ACTUATORS}, got {}",
                self.max_actuators
            )));
        }
        if self.torque_min > self.torque_max {
            return Err(ConfigError::ValidationError(format!(
                "generator.torque_min ({}) > generator.torque_max ({})",
                self.torque_min, self.torque_max
            )));
        }
        if self.thrust_min < 0 {
            return Err(ConfigError::ValidationError(format!(
                "generator.thrust_min must be >= 0, got {}",
                self.thrust_min
            )));
        }
        if self.thrust_min > self.thrust_max {
            return Err(ConfigError::ValidationError(format!(
                "generator.thrust_min ({}) > generator.thrust_max ({})",
                self.thrust_min, self.thrust_max
            )));
        }
        Ok(())
    }
}

/// One `[[actuators]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActuatorEntry {
    pub id: String,
    pub torque: f64,
    pub thrust: f64,
}

// ─── Top-Level Config ───────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllocConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub allocator: AllocatorConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub actuators: Vec<ActuatorEntry>,
}

impl AllocConfig {
    /// Load and validate a configuration file.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic checks beyond what serde enforces.
    ///
    /// Duplicate ids are reported here rather than at registry build so the
    /// error names the configuration table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        if self.actuators.is_empty() {
            return self.generator.validate();
        }

        if self.actuators.len() > MAX_ACTUATORS {
            return Err(ConfigError::ValidationError(format!(
                "at most {MAX_ACTUATORS} actuators allowed, got {}",
                self.actuators.len()
            )));
        }
        for (i, entry) in self.actuators.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "actuators[{i}].id cannot be empty"
                )));
            }
            if self.actuators[..i].iter().any(|e| e.id == entry.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate actuator id '{}'",
                    entry.id
                )));
            }
            if !entry.torque.is_finite() || !entry.thrust.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "actuator '{}' has a non-finite coefficient",
                    entry.id
                )));
            }
        }
        Ok(())
    }
}
