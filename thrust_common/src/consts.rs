//! Workspace-wide constants.
//!
//! Single source of truth for throttle limits, registry bounds and the
//! default random population shape.

/// Throttle value meaning "fully committed".
pub const THROTTLE_FULL: f64 = 1.0;

/// Minimum registry size the allocator can balance.
pub const MIN_ACTUATORS: usize = 2;

/// Upper bound on registry size accepted from configuration.
pub const MAX_ACTUATORS: usize = 256;

/// Default lower bound on randomly generated registry size.
pub const DEFAULT_MIN_ACTUATORS: usize = 3;

/// Default upper bound (inclusive) on randomly generated registry size.
pub const DEFAULT_MAX_ACTUATORS: usize = 6;

/// Default torque coefficient range (inclusive) for generated actuators.
pub const DEFAULT_TORQUE_RANGE: (i32, i32) = (-20, 20);

/// Default thrust coefficient range (inclusive) for generated actuators.
pub const DEFAULT_THRUST_RANGE: (i32, i32) = (3, 20);

/// Prefix of generated actuator identifiers (`thruster-00`, `thruster-01`, ...).
pub const GENERATED_ID_PREFIX: &str = "thruster";

/// Default service name when no `[shared]` table is given.
pub const DEFAULT_SERVICE_NAME: &str = "thrust-alloc";
