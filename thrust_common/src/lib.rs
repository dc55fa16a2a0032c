//! Thrust Common Library
//!
//! Shared constants, configuration loading and report types for the
//! thrust allocation workspace crates.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Throttle limits and registry bounds
//! - [`report`] - Allocation snapshots and report sinks
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use thrust_common::prelude::*;
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
pub mod report;
