//! # Thrust Allocator Library
//!
//! Distributes throttle across independently actuated thrusters so their
//! net torque is driven toward zero while thrust stays as high as possible,
//! then rescales the result into each thruster's `[0, 1]` range.
//!
//! ## Pipeline
//!
//! 1. **Registry**: ordered, uniquely keyed actuators built by
//!    [`builder::RegistryBuilder`] from code, config or a seeded RNG
//! 2. **Rounds**: greedy pivot-and-counterbalance passes
//!    ([`allocator::Allocator::run_allocation_round`])
//! 3. **Stop rule**: literal first-imperfect-round stop by default
//!    ([`config::StopRule`])
//! 4. **Normalization**: divide by the largest throttle
//!
//! Progress is published as [`thrust_common::report::Snapshot`]s to any
//! [`thrust_common::report::ReportSink`]; the library does no I/O itself.
//!
//! ```rust
//! use thrust_alloc::allocator::solve;
//! use thrust_alloc::builder::RegistryBuilder;
//!
//! let mut registry = RegistryBuilder::new()
//!     .with_actuator("port", -10.0, 5.0)
//!     .with_actuator("starboard", 10.0, 5.0)
//!     .build()
//!     .unwrap();
//! let solution = solve(&mut registry).unwrap();
//! assert!(solution.is_exact());
//! ```

pub mod actuator;
pub mod allocator;
pub mod builder;
pub mod config;
pub mod error;
pub mod registry;

pub use actuator::{Actuator, ActuatorId};
pub use allocator::{Allocator, Solution, solve};
pub use error::{AllocationError, RegistryError};
pub use registry::Registry;
