//! Five-parameter grain boundary character distribution (GBCD).
//!
//! This crate bins every grain boundary triangle of a surface mesh by its
//! misorientation (three Euler angles) and its boundary plane normal (two
//! coordinates on an equal-area square), weights the bins by triangle area
//! and normalizes the result to multiples of random distribution (MRD).
//!
//! # Algorithm
//!
//! 1. Size the histogram from the bin resolution ([`GbcdBinning`]).
//! 2. For each triangle between two grains of the same phase, view the
//!    boundary from both grains. For every pair of symmetry operators compute
//!    the misorientation and, if its Euler angles lie in `[0, pi/2)^3`,
//!    record the bin of the normal and of its inverse.
//! 3. Merge per-chunk bin lists single-threaded, adding the triangle area to
//!    each recorded bin.
//! 4. Scale each phase block by `total_bins / total_area`.
//!
//! A finished histogram can be cut at one misorientation into a
//! stereographic pole figure or a GMT table ([`pole_figure`],
//! [`gmt_section`]).
//!
//! Triangles are processed in chunks, in parallel with rayon, with
//! cancellation checked between chunks.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **no engine dependencies**. It can be used in:
//! - CLI tools
//! - Servers
//! - Batch pipelines
//!
//! # Example
//!
//! ```
//! use gbcd_histogram::{GbcdParams, compute_gbcd};
//! use gbcd_types::{BoundaryMesh, EulerAngles, ExecutionContext, FeatureData, Vector3};
//!
//! let mesh = BoundaryMesh::from_face_data(
//!     vec![[1, 2], [-1, 1]],
//!     vec![Vector3::z(), Vector3::x()],
//!     vec![1.0, 1.0],
//! );
//! let features = FeatureData::new(
//!     vec![
//!         EulerAngles::default(),
//!         EulerAngles::default(),
//!         EulerAngles::from_degrees(0.0, 40.0, 0.0),
//!     ],
//!     vec![0, 1, 1],
//! );
//!
//! let gbcd = compute_gbcd(&mesh, &features, &[0, 1], &GbcdParams::coarse(), &ExecutionContext::new())
//!     .unwrap();
//!
//! // Only the interior boundary contributes.
//! assert_eq!(gbcd.triangles_used, 1);
//! println!("{gbcd}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod binning;
mod engine;
mod error;
mod params;
mod result;
mod section;

pub use binning::{GBCD_DIMS, GbcdBinning, MAX_GBCD_VALUES, SquareCoord, square_coord};
pub use engine::{TriangleHits, compute_gbcd, face_hits};
pub use error::{GbcdError, GbcdResult};
pub use params::GbcdParams;
pub use result::{Gbcd, Hemisphere};
pub use section::{
    GMT_PHI_POINTS, GMT_THETA_POINTS, GmtSection, PoleFigure, SectionParams, gmt_section, pole_figure,
    section_values, write_gmt, write_pole_figure_vtk,
};
