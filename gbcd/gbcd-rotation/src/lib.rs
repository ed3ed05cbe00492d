//! Rotation representations for crystal orientations.
//!
//! This crate provides the rotation algebra every orientation and
//! grain-boundary statistic is built on:
//!
//! - [`EulerAngles`] - Bunge (ZXZ) Euler angle triple in radians
//! - [`AxisAngle`] - Unit rotation axis plus angle
//! - [`UnitQuaternion`] - Unit quaternion (re-exported from nalgebra)
//! - [`Matrix3`] - 3×3 orientation matrix (re-exported from nalgebra)
//!
//! and pure conversions between them.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **no engine dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Analysis notebooks via bindings
//!
//! # Conventions
//!
//! Orientations are **passive**: the orientation matrix `g` built from a set
//! of Euler angles maps sample coordinates into crystal coordinates.
//!
//! ```text
//! g = | c1c2 - s1s2c    s1c2 + c1s2c   s2s |
//!     | -c1s2 - s1c2c  -s1s2 + c1c2c   c2s |
//!     | s1s            -c1s            c   |
//! ```
//!
//! - `quaternion_to_matrix(q)` is the standard rotation matrix of `q`, so
//!   `quaternion_to_matrix(euler_to_quaternion(e)) == euler_to_matrix(e)`.
//! - `axis_angle_to_matrix(n, w)` is the standard rotation by `w` about `n`.
//! - Quaternions produced by this crate always have a non-negative scalar part.
//!
//! Every `acos` argument is clamped to `[-1, 1]` so rounding noise can never
//! produce `NaN`.
//!
//! # Example
//!
//! ```
//! use gbcd_rotation::{euler_to_matrix, matrix_to_euler, EulerAngles};
//!
//! let e = EulerAngles::from_degrees(30.0, 45.0, 60.0);
//! let g = euler_to_matrix(&e);
//! let back = matrix_to_euler(&g);
//!
//! assert!((back.phi1 - e.phi1).abs() < 1e-10);
//! assert!((back.phi - e.phi).abs() < 1e-10);
//! assert!((back.phi2 - e.phi2).abs() < 1e-10);
//! ```
//!
//! # Gimbal Lock
//!
//! For `Phi = 0` or `Phi = pi` only `phi1 + phi2` (or `phi1 - phi2`) is
//! defined. [`matrix_to_euler`] then reports the whole in-plane rotation in
//! `phi1` and sets `phi2 = 0`. Round trips through these points reproduce the
//! rotation, not the original angle triple.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod axis_angle;
mod convert;
mod euler;

pub use axis_angle::AxisAngle;
pub use convert::{
    axis_angle_to_matrix, axis_angle_to_quaternion, clamp_unit, euler_to_matrix,
    euler_to_quaternion, matrix_to_axis_angle, matrix_to_euler, matrix_to_quaternion,
    quaternion_to_axis_angle, quaternion_to_euler, quaternion_to_matrix, GIMBAL_TOLERANCE,
};
pub use euler::EulerAngles;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3, Quaternion, UnitQuaternion, Vector3};
