//! Metric-based grain boundary plane distribution at a fixed misorientation.
//!
//! Instead of binning the five boundary parameters, this crate measures the
//! distance between boundaries directly. For one fixed misorientation it
//! reports, at quasi-uniform directions on the hemisphere, the area of
//! boundaries within a small ball around that boundary in multiples of
//! random distribution, together with an error estimate.
//!
//! # Algorithm
//!
//! 1. Validate the parameters and resolve the output paths ([`validate`]).
//! 2. Generate sampling directions on a golden-section spiral plus an
//!    equator ring ([`sample_directions`]).
//! 3. Select every symmetric view of every triangle of the phase of interest
//!    whose misorientation lies within the misorientation tolerance.
//! 4. For each direction, sum the area of the views within the plane
//!    tolerance and normalize by the included area and the ball volume.
//! 5. Write two plotting tables, distribution and error.
//!
//! Selection and probing run in chunks, in parallel with rayon, with
//! cancellation checked between chunks. A cancelled run writes no files.
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
//! use gbcd_metric::{MetricParams, compute_metric_gbcd};
//! use gbcd_rotation::matrix_to_euler;
//! use gbcd_types::{BoundaryMesh, EulerAngles, ExecutionContext, FeatureData, Vector3};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let params = MetricParams::sigma3()
//!     .sample_points(200)
//!     .output_files(dir.path().join("twin"), dir.path().join("twin_err"));
//!
//! // Two grains in a twin relationship sharing a (111) facet.
//! let twin = matrix_to_euler(&params.fixed_misorientation().to_matrix());
//! let mesh = BoundaryMesh::from_face_data(
//!     vec![[1, 2]],
//!     vec![Vector3::new(1.0, 1.0, 1.0).normalize()],
//!     vec![1.0],
//! );
//! let features = FeatureData::new(vec![EulerAngles::default(), EulerAngles::default(), twin], vec![0, 1, 1]);
//!
//! let result = compute_metric_gbcd(&mesh, &features, &[0, 1], &params, &ExecutionContext::new()).unwrap();
//!
//! assert!(result.selected_triangles > 0);
//! assert!(result.dist_output_file.ends_with("twin_1.dat"));
//! println!("{result}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod engine;
mod error;
mod output;
mod params;
mod probe;
mod result;
mod sampling;
mod select;
mod validate;

pub use engine::{ball_volume, compute_metric_gbcd, count_distinct_boundaries};
pub use error::{MetricError, MetricResult};
pub use output::{plot_coordinates, write_distribution, write_errors};
pub use params::{MetricParams, Resolution};
pub use result::{MetricGbcd, relative_error_percent};
pub use sampling::{GOLDEN_ANGLE, sample_directions};
pub use select::SelectedTriangle;
pub use validate::{
    MetricWarning, Preflight, SAMPLE_POINTS_WARNING_LIMIT, ValidationError, resolve_output_path, validate,
};
