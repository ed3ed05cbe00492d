//! Grain boundary character distribution toolkit.
//!
//! This umbrella crate re-exports all gbcd-* crates, providing a unified API
//! for boundary statistics on triangulated polycrystal meshes. All crates are
//! Layer 0 and can be used in CLI tools, servers, or batch pipelines.
//!
//! # Quick Start
//!
//! ```
//! use gbcd::prelude::*;
//!
//! let mesh = BoundaryMesh::from_face_data(vec![[1, 2]], vec![Vector3::z()], vec![1.0]);
//! let features = FeatureData::new(
//!     vec![
//!         EulerAngles::default(),
//!         EulerAngles::default(),
//!         EulerAngles::from_degrees(45.0, 0.0, 0.0),
//!     ],
//!     vec![0, 1, 1],
//! );
//!
//! // Five-parameter histogram.
//! let gbcd = compute_gbcd(&mesh, &features, &[0, 1], &GbcdParams::coarse(), &ExecutionContext::new())
//!     .unwrap();
//! assert_eq!(gbcd.triangles_used, 1);
//!
//! // Disorientation of the two grains.
//! let m = minimum_misorientation(
//!     &features.euler_angles[1].to_quaternion(),
//!     &features.euler_angles[2].to_quaternion(),
//!     LaueClass::CubicHigh,
//! );
//! assert!((m.angle_degrees() - 45.0).abs() < 1e-9);
//! ```
//!
//! # Module Organization
//!
//! ## Foundation
//! - [`rotation`] - Euler angles, quaternions, matrices and axis-angle pairs
//! - [`symmetry`] - Laue classes, misorientation and Schmid factors
//! - [`types`] - Boundary mesh, feature data, cancellation and progress
//!
//! ## Distributions
//! - [`histogram`] - Five-parameter GBCD histogram and its sections
//! - [`metric`] - Metric-based plane distribution at a fixed misorientation
//!
//! # Feature Flags
//!
//! - `serde` - Serialization of parameters, meshes and results

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Euler angles, quaternions, matrices and axis-angle pairs.
pub use gbcd_rotation as rotation;

/// Laue classes, misorientation and Schmid factors.
pub use gbcd_symmetry as symmetry;

/// Boundary mesh, feature data, cancellation and progress.
pub use gbcd_types as types;

/// Five-parameter GBCD histogram and its sections.
pub use gbcd_histogram as histogram;

/// Metric-based plane distribution at a fixed misorientation.
pub use gbcd_metric as metric;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for boundary statistics.
///
/// This module re-exports the most commonly used types and functions.
///
/// # Usage
///
/// ```
/// use gbcd::prelude::*;
/// ```
pub mod prelude {
    // Rotations
    pub use gbcd_rotation::{AxisAngle, EulerAngles, UnitQuaternion, Vector3};

    // Symmetry
    pub use gbcd_symmetry::{LaueClass, Misorientation, minimum_misorientation, schmid_factor};

    // Mesh data and execution
    pub use gbcd_types::{BoundaryMesh, CancelToken, ExecutionContext, FeatureData};

    // Histogram
    pub use gbcd_histogram::{Gbcd, GbcdParams, SectionParams, compute_gbcd, pole_figure};

    // Metric-based
    pub use gbcd_metric::{MetricGbcd, MetricParams, Resolution, compute_metric_gbcd};
}

// =============================================================================
// Tests
// =============================================================================
