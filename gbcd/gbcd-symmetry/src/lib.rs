//! Crystal symmetry operators and the searches built on them.
//!
//! This crate provides:
//!
//! - [`LaueClass`] - The eleven Laue classes with stable integer indices
//! - [`SymmetryOps`] - Static proper-rotation tables (quaternions, matrices,
//!   canonical slip systems) built once per process
//! - [`minimum_misorientation`] - Disorientation between two orientations
//! - [`nearest_symmetric_equivalent`] - Symmetric variant closest to a
//!   reference, for orientation averaging
//! - [`fundamental_zone_quaternion`] - Reduction to the smallest-angle
//!   equivalent
//! - [`schmid_factor`] and [`schmid_factor_for_system`] - Slip system
//!   selection for a loading direction
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **no engine dependencies**. Tables are
//! immutable after initialization and safe to share across threads.
//!
//! # Example
//!
//! ```
//! use gbcd_rotation::{EulerAngles, euler_to_quaternion};
//! use gbcd_symmetry::{LaueClass, minimum_misorientation};
//!
//! let class = LaueClass::from_index(1).unwrap();
//! assert_eq!(class.num_sym_ops(), 24);
//!
//! let a = euler_to_quaternion(&EulerAngles::default());
//! let b = euler_to_quaternion(&EulerAngles::from_degrees(0.0, 0.0, 100.0));
//!
//! // 100 degrees about [001] is 10 degrees away from a cubic operator.
//! let m = minimum_misorientation(&a, &b, class);
//! assert!((m.angle_degrees() - 10.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod laue;
mod misorientation;
mod schmid;
mod tables;

pub use error::{SymmetryError, SymmetryResult};
pub use laue::LaueClass;
pub use misorientation::{
    Misorientation, fundamental_zone_quaternion, minimum_misorientation,
    nearest_symmetric_equivalent,
};
pub use schmid::{SchmidResult, SlipSystem, schmid_factor, schmid_factor_for_system};
pub use tables::SymmetryOps;
