//! Area-weighted accumulation of the five-parameter GBCD.
//!
//! Every boundary triangle between two grains of the same phase is viewed
//! from both sides. For each pair of symmetry operators the misorientation is
//! reduced to Euler angles; pairs that fall inside the `[0, pi/2)^3` zone are
//! binned together with the boundary normal in the first grain's crystal
//! frame, once directly and once inverted.

// Areas and counts only feed float sums.
#![allow(clippy::cast_precision_loss)]

use std::f64::consts::FRAC_PI_2;

use gbcd_rotation::{euler_to_matrix, matrix_to_euler};
use gbcd_symmetry::LaueClass;
use gbcd_types::{BoundaryMesh, ExecutionContext, FeatureData, run_chunked};
use nalgebra::{Matrix3, Vector3};
use tracing::{info, warn};

use crate::binning::{GbcdBinning, square_coord};
use crate::error::{GbcdError, GbcdResult};
use crate::params::GbcdParams;
use crate::result::{Gbcd, Hemisphere};

/// Bins recorded for one boundary triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleHits {
    /// Phase shared by both grains.
    pub phase: usize,
    /// Triangle area.
    pub area: f64,
    /// `(bin, hemisphere)` pairs, in enumeration order.
    pub hits: Vec<(usize, Hemisphere)>,
}

/// Borrowed inputs and precomputed lookups for one run.
struct Accumulator<'a> {
    mesh: &'a BoundaryMesh,
    features: &'a FeatureData,
    orientations: Vec<Matrix3<f64>>,
    classes: Vec<Option<LaueClass>>,
    binning: GbcdBinning,
}

impl Accumulator<'_> {
    /// Bins of face `face`, or `None` if the face is not an intra-phase
    /// grain boundary.
    fn triangle_hits(&self, face: usize) -> Option<TriangleHits> {
        let labels = *self.mesh.face_labels.get(face)?;
        let phase = self.features.boundary_phase(labels)?;
        let ops = (*self.classes.get(phase)?)?.symmetry_ops().matrices();
        let normal = *self.mesh.face_normals.get(face)?;
        let area = *self.mesh.face_areas.get(face)?;

        let mut hits = Vec::new();
        for q in 0..2 {
            let (f1, f2, n) = if q == 0 {
                (labels[0], labels[1], normal)
            } else {
                (labels[1], labels[0], -normal)
            };
            let g1 = self.orientation(f1)?;
            let g2 = self.orientation(f2)?;
            self.record_pair(&g1, &g2, &n, ops, &mut hits);
        }

        Some(TriangleHits { phase, area, hits })
    }

    fn orientation(&self, label: i32) -> Option<Matrix3<f64>> {
        self.orientations.get(usize::try_from(label).ok()?).copied()
    }

    /// Enumerate every operator pair for one side of a boundary.
    fn record_pair(
        &self,
        g1: &Matrix3<f64>,
        g2: &Matrix3<f64>,
        normal: &Vector3<f64>,
        ops: &[Matrix3<f64>],
        hits: &mut Vec<(usize, Hemisphere)>,
    ) {
        for sym1 in ops {
            let g1s = sym1 * g1;
            let (sq, northern) = square_coord(&(g1s * normal));
            let hemisphere = Hemisphere::from_northern(northern);
            let sq_inv = -sq;

            for sym2 in ops {
                let dg = g1s * (sym2 * g2).transpose();
                let e = matrix_to_euler(&dg);
                if !e.all_below(FRAC_PI_2) {
                    continue;
                }
                let cos_phi = e.phi.cos();

                if let Some(bin) = self.binning.bin_index(&[e.phi1, cos_phi, e.phi2, sq.x, sq.y]) {
                    hits.push((bin, hemisphere));
                }
                if let Some(bin) =
                    self.binning.bin_index(&[e.phi1, cos_phi, e.phi2, sq_inv.x, sq_inv.y])
                {
                    hits.push((bin, hemisphere.opposite()));
                }
            }
        }
    }
}

/// Resolve the Laue class of every phase used by at least one feature.
fn resolve_classes(features: &FeatureData, crystal_structures: &[u32]) -> GbcdResult<Vec<Option<LaueClass>>> {
    let mut classes = vec![None; crystal_structures.len()];
    for &phase in features.phases.iter().skip(1) {
        let Ok(p) = usize::try_from(phase) else {
            continue;
        };
        if p == 0 || classes.get(p).is_some_and(Option::is_some) {
            continue;
        }
        if let (Some(slot), Some(&index)) = (classes.get_mut(p), crystal_structures.get(p)) {
            let class = LaueClass::from_index(index)
                .map_err(|e| GbcdError::unknown_crystal_structure(p, e))?;
            *slot = Some(class);
        }
    }
    Ok(classes)
}

/// Bins contributed by one face, or `None` if the face is skipped.
///
/// Exposed for diagnostics and tests; [`compute_gbcd`] runs the same code
/// for every face.
///
/// # Errors
///
/// Same validation as [`compute_gbcd`].
pub fn face_hits(
    mesh: &BoundaryMesh,
    features: &FeatureData,
    crystal_structures: &[u32],
    resolution_degrees: f64,
    face: usize,
) -> GbcdResult<Option<TriangleHits>> {
    let acc = prepare(mesh, features, crystal_structures, resolution_degrees)?;
    Ok(acc.triangle_hits(face))
}

fn prepare<'a>(
    mesh: &'a BoundaryMesh,
    features: &'a FeatureData,
    crystal_structures: &[u32],
    resolution_degrees: f64,
) -> GbcdResult<Accumulator<'a>> {
    let binning = GbcdBinning::from_resolution(resolution_degrees)?;
    mesh.validate()?;
    features.validate(crystal_structures.len())?;
    features.check_labels(mesh)?;
    let classes = resolve_classes(features, crystal_structures)?;
    let orientations = features.euler_angles.iter().map(euler_to_matrix).collect();

    Ok(Accumulator {
        mesh,
        features,
        orientations,
        classes,
        binning,
    })
}

/// Compute the grain boundary character distribution of a mesh.
///
/// `crystal_structures[p]` is the Laue class index of phase `p`. The result
/// holds one block per phase, normalized to multiples of random
/// distribution; phases without contributing boundaries stay zero.
///
/// # Errors
///
/// - [`GbcdError::InvalidResolution`] for a non-positive, too coarse or too
///   fine resolution.
/// - [`GbcdError::HistogramTooLarge`] if all phase blocks together exceed
///   [`MAX_GBCD_VALUES`](crate::MAX_GBCD_VALUES).
/// - [`GbcdError::MeshData`] if mesh arrays disagree in length, a label
///   does not index a feature, or a phase does not index an ensemble.
/// - [`GbcdError::UnknownCrystalStructure`] if a phase in use has an
///   unknown crystal structure.
/// - [`GbcdError::Cancelled`] if the context's token is cancelled.
///
/// # Example
///
/// ```
/// use gbcd_histogram::{GbcdParams, compute_gbcd};
/// use gbcd_types::{BoundaryMesh, EulerAngles, ExecutionContext, FeatureData, Vector3};
///
/// let mesh = BoundaryMesh::from_face_data(vec![[1, 2]], vec![Vector3::z()], vec![1.0]);
/// let features = FeatureData::new(
///     vec![
///         EulerAngles::default(),
///         EulerAngles::default(),
///         EulerAngles::from_degrees(30.0, 0.0, 0.0),
///     ],
///     vec![0, 1, 1],
/// );
///
/// let gbcd = compute_gbcd(&mesh, &features, &[0, 1], &GbcdParams::default(), &ExecutionContext::new())
///     .unwrap();
///
/// assert_eq!(gbcd.shape(), [10, 10, 10, 20, 20, 2]);
/// assert!((gbcd.mean_value(1).unwrap() - 1.0).abs() < 1e-9);
/// ```
pub fn compute_gbcd(
    mesh: &BoundaryMesh,
    features: &FeatureData,
    crystal_structures: &[u32],
    params: &GbcdParams,
    ctx: &ExecutionContext<'_>,
) -> GbcdResult<Gbcd> {
    ctx.report("Sizing GBCD");
    let acc = prepare(mesh, features, crystal_structures, params.resolution_degrees)?;
    let face_count = mesh.face_count();

    info!(
        faces = face_count,
        features = features.len(),
        phases = crystal_structures.len(),
        bins = acc.binning.total_bins(),
        resolution = params.resolution_degrees,
        "Starting GBCD computation"
    );

    let mut gbcd = Gbcd::zeroed(acc.binning, crystal_structures.len())?;
    let total_bins = acc.binning.total_bins();

    run_chunked(
        ctx,
        face_count,
        params.chunk_size,
        params.parallel,
        "Calculating GBCD || Triangles",
        |face| acc.triangle_hits(face),
        |_, chunk| {
            for t in chunk.into_iter().flatten() {
                gbcd.triangles_used += 1;
                gbcd.bin_hits += t.hits.len();
                let base = t.phase * total_bins;
                for (bin, hemisphere) in t.hits {
                    gbcd.values[base + 2 * bin + hemisphere.offset()] += t.area;
                    gbcd.total_area[t.phase] += t.area;
                }
            }
        },
    )?;

    ctx.report("Normalizing GBCD");
    normalize(&mut gbcd, &acc.classes);

    info!(
        triangles_used = gbcd.triangles_used,
        bin_hits = gbcd.bin_hits,
        "GBCD computation complete"
    );

    Ok(gbcd)
}

/// Rescale each phase block to multiples of random distribution.
fn normalize(gbcd: &mut Gbcd, classes: &[Option<LaueClass>]) {
    let total_bins = gbcd.total_bins();
    if total_bins == 0 {
        return;
    }
    for (phase, block) in gbcd.values.chunks_exact_mut(total_bins).enumerate() {
        let area = gbcd.total_area[phase];
        if area > 0.0 {
            let scale = total_bins as f64 / area;
            block.iter_mut().for_each(|v| *v *= scale);
        } else if classes.get(phase).is_some_and(Option::is_some) {
            warn!(phase, "No boundary area recorded for phase; leaving it at zero");
        }
    }
}
