//! Prelude module for common re-exports.
//!
//! ```rust
//! use thrust_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{MAX_ACTUATORS, MIN_ACTUATORS, THROTTLE_FULL};

// ─── Reporting ──────────────────────────────────────────────────────
pub use crate::report::{
    ActuatorSnapshot, CollectingSink, NullSink, ReportSink, Snapshot, SnapshotPhase, TracingSink,
};
