//! Boundary mesh model and execution scaffolding for GBCD engines.
//!
//! This crate provides the data every boundary statistic consumes:
//!
//! - [`BoundaryMesh`] - Triangulated grain-boundary surface with face labels,
//!   normals, areas and node types
//! - [`Triangle`] - A concrete triangle for per-face geometry
//! - [`FeatureData`] - Per-grain orientations and phases
//!
//! and the pieces engines share to run over it:
//!
//! - [`CancelToken`] and [`ExecutionContext`] - Cooperative cancellation and
//!   progress reporting
//! - [`run_chunked`] - Chunked fork-join driver with an ordered merge
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **no engine dependencies**. Engines borrow
//! the mesh and feature data for the length of one run and never keep them.
//!
//! # Labels
//!
//! Face labels index [`FeatureData`]. Feature 0 is unassigned and a label of
//! `-1` marks the sample exterior. Phase 0 is the unknown phase. None of
//! these take part in boundary statistics.
//!
//! # Example
//!
//! ```
//! use gbcd_types::{BoundaryMesh, EulerAngles, FeatureData, Point3};
//!
//! let mesh = BoundaryMesh::from_triangles(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//!     vec![[1, 2]],
//! );
//! let features = FeatureData::new(vec![EulerAngles::default(); 3], vec![0, 1, 1]);
//!
//! assert!(mesh.validate().is_ok());
//! assert!(features.check_labels(&mesh).is_ok());
//! assert_eq!(features.boundary_phase(mesh.face_labels[0]), Some(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod exec;
mod feature;
mod mesh;
mod triangle;

pub use error::{MeshDataError, MeshDataResult};
pub use exec::{CancelToken, Cancelled, ExecutionContext, ProgressSink, run_chunked};
pub use feature::FeatureData;
pub use mesh::{BoundaryMesh, NODE_TYPE_INTERIOR};
pub use triangle::Triangle;

// Re-export commonly used types for convenience
pub use gbcd_rotation::EulerAngles;
pub use nalgebra::{Point3, Vector3};
