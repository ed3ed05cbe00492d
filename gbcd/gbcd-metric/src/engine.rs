//! Metric-based GBCD at one fixed misorientation.
//!
//! Rather than binning, every boundary triangle whose misorientation is
//! close to the fixed one contributes its area to each sampling direction
//! within a ball of given radius in the space of boundaries. The sums are
//! normalized by the included area and the ball volume, so a random
//! distribution of boundaries gives 1.

// Counts only feed float sums.
#![allow(clippy::cast_precision_loss)]

use gbcd_symmetry::LaueClass;
use gbcd_types::{BoundaryMesh, ExecutionContext, FeatureData, MeshDataError, run_chunked};
use tracing::{info, warn};

use crate::error::MetricResult;
use crate::output::write_outputs;
use crate::params::{MetricParams, Resolution};
use crate::probe::{ProbeScale, probe_area};
use crate::result::MetricGbcd;
use crate::sampling::sample_directions;
use crate::select::{SelectedTriangle, Selector};
use crate::validate::validate;

/// Ball volume for `class`, scaled from the m-3m value by the squared
/// ratio of operator counts.
#[must_use]
pub fn ball_volume(resolution: Resolution, class: LaueClass) -> f64 {
    let volume = resolution.ball_volume_m3m();
    if class == LaueClass::CubicHigh {
        volume
    } else {
        let ratio = class.num_sym_ops() as f64 / 24.0;
        volume * ratio * ratio
    }
}

/// Distinct boundaries between two grains of `phase`.
#[must_use]
pub fn count_distinct_boundaries(mesh: &BoundaryMesh, features: &FeatureData, phase: usize) -> usize {
    mesh.distinct_boundaries()
        .into_iter()
        .filter(|&labels| features.boundary_phase(labels) == Some(phase))
        .count()
}

/// Compute the boundary plane distribution at the fixed misorientation of
/// `params` and write the distribution and error files.
///
/// `crystal_structures[p]` is the Laue class index of phase `p`. Output
/// paths are resolved as in [`resolve_output_path`](crate::resolve_output_path)
/// and reported in the result.
///
/// # Errors
///
/// - [`MetricError::Validation`](crate::MetricError::Validation) if the
///   parameters fail preflight.
/// - [`MetricError::MeshData`](crate::MetricError::MeshData) if mesh arrays
///   disagree, or triple lines are excluded without node types.
/// - [`MetricError::Cancelled`](crate::MetricError::Cancelled) if the
///   context's token is cancelled; no file is written.
/// - [`MetricError::Io`](crate::MetricError::Io) if an output file cannot be
///   written.
pub fn compute_metric_gbcd(
    mesh: &BoundaryMesh,
    features: &FeatureData,
    crystal_structures: &[u32],
    params: &MetricParams,
    ctx: &ExecutionContext<'_>,
) -> MetricResult<MetricGbcd> {
    let preflight = validate(params, crystal_structures)?;
    for w in &preflight.warnings {
        warn!(code = w.code(), "{w}");
    }

    mesh.validate()?;
    features.validate(crystal_structures.len())?;
    features.check_labels(mesh)?;
    if params.exclude_triple_lines && !mesh.has_node_types() {
        return Err(MeshDataError::MissingNodeTypes.into());
    }

    let resolution = params.resolution;
    let ball_volume = ball_volume(resolution, preflight.class);
    let fixed = params.fixed_misorientation().to_matrix();
    let fixed_transpose = fixed.transpose();

    info!(
        faces = mesh.face_count(),
        phase = preflight.phase,
        class = preflight.class.name(),
        angle = params.misorientation_angle_degrees,
        misorientation_tolerance = resolution.misorientation_degrees(),
        plane_tolerance = resolution.plane_degrees(),
        "Starting metric-based GBCD"
    );

    ctx.report("Generating sampling points");
    ctx.check_cancelled()?;
    let sample_points = sample_directions(params.num_sample_points, resolution.plane_radians());

    let selector = Selector {
        mesh,
        features,
        ops: preflight.class.symmetry_ops().matrices(),
        phase: preflight.phase,
        fixed_transpose,
        tolerance: resolution.misorientation_radians(),
        exclude_triple_lines: params.exclude_triple_lines,
    };

    let mut selected: Vec<SelectedTriangle> = Vec::new();
    let mut included_triangles = 0;
    let mut matched_triangles = 0;
    let mut included_area = 0.0;
    run_chunked(
        ctx,
        mesh.face_count(),
        params.select_chunk_size,
        params.parallel,
        "Step 1/2: Selecting Triangles",
        |face| selector.select(face),
        |_, chunk| {
            for face in chunk.into_iter().flatten() {
                included_triangles += 1;
                included_area += face.area;
                if !face.views.is_empty() {
                    matched_triangles += 1;
                }
                selected.extend(face.views);
            }
        },
    )?;

    let distinct_boundaries = count_distinct_boundaries(mesh, features, preflight.phase);
    let scale = ProbeScale {
        total_area: included_area,
        distinct_boundaries,
        ball_volume,
    };
    if selected.is_empty() || !scale.is_usable() {
        warn!(
            selected = selected.len(),
            distinct_boundaries,
            included_area,
            "No boundaries match the fixed misorientation; distribution is zero"
        );
    }

    let plane_tolerance_sq = resolution.plane_radians().powi(2);
    let mut distribution = vec![0.0; sample_points.len()];
    let mut errors = vec![0.0; sample_points.len()];
    run_chunked(
        ctx,
        sample_points.len(),
        params.probe_chunk_size,
        params.parallel,
        "Step 2/2: Computing Distribution Values",
        |i| scale.normalize(probe_area(&sample_points[i], &fixed_transpose, &selected, plane_tolerance_sq)),
        |start, chunk| {
            for (offset, (value, error)) in chunk.into_iter().enumerate() {
                distribution[start + offset] = value;
                errors[start + offset] = error;
            }
        },
    )?;

    let result = MetricGbcd {
        sample_points,
        distribution,
        errors,
        included_triangles,
        matched_triangles,
        selected_triangles: selected.len(),
        included_area,
        distinct_boundaries,
        ball_volume,
        warnings: preflight.warnings,
        dist_output_file: preflight.dist_output_file,
        err_output_file: preflight.err_output_file,
    };

    ctx.check_cancelled()?;
    ctx.report("Writing output files");
    write_outputs(&result, params)?;

    info!(
        selected = result.selected_triangles,
        included = result.included_triangles,
        matched = result.matched_triangles,
        distinct_boundaries,
        points = result.len(),
        "Metric-based GBCD complete"
    );

    Ok(result)
}
