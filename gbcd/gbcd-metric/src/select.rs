//! Selection of boundary triangles near the fixed misorientation.
//!
//! A triangle between two grains of the phase of interest is kept once for
//! every symmetry operator pair (and every direction of the misorientation)
//! whose misorientation lies within the tolerance of the fixed one. Each
//! kept view stores the boundary normal in both crystal frames.

use gbcd_rotation::{clamp_unit, euler_to_matrix};
use gbcd_types::{BoundaryMesh, FeatureData};
use nalgebra::{Matrix3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One symmetric view of a triangle whose misorientation matches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectedTriangle {
    /// Triangle area.
    pub area: f64,
    /// Boundary normal in the first grain's crystal frame.
    pub normal_grain1: Vector3<f64>,
    /// Boundary normal in the second grain's crystal frame, pointing out
    /// of that grain.
    pub normal_grain2: Vector3<f64>,
}

/// Triangles selected from one face.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FaceSelection {
    pub area: f64,
    pub views: Vec<SelectedTriangle>,
}

/// Borrowed inputs for the selection pass.
pub(crate) struct Selector<'a> {
    pub mesh: &'a BoundaryMesh,
    pub features: &'a FeatureData,
    pub ops: &'a [Matrix3<f64>],
    pub phase: usize,
    pub fixed_transpose: Matrix3<f64>,
    pub tolerance: f64,
    pub exclude_triple_lines: bool,
}

impl Selector<'_> {
    /// Views of face `face`, or `None` if the face does not qualify.
    ///
    /// A qualifying face contributes its area to the included total even
    /// when no operator pair matches.
    pub fn select(&self, face: usize) -> Option<FaceSelection> {
        let labels = *self.mesh.face_labels.get(face)?;
        if self.features.boundary_phase(labels)? != self.phase {
            return None;
        }
        if self.exclude_triple_lines && !self.mesh.is_interior_face(face) {
            return None;
        }

        let area = *self.mesh.face_areas.get(face)?;
        let normal = *self.mesh.face_normals.get(face)?;
        let g1 = euler_to_matrix(self.features.euler(labels[0])?);
        let g2 = euler_to_matrix(self.features.euler(labels[1])?);

        let mut views = Vec::new();
        for sym1 in self.ops {
            let g1s = sym1 * g1;
            let n1 = g1s * normal;

            for sym2 in self.ops {
                let dg = g1s * (sym2 * g2).transpose();
                let dgt = dg.transpose();

                for inverted in [false, true] {
                    let m = if inverted { &dgt } else { &dg };
                    if self.deviation(m) >= self.tolerance {
                        continue;
                    }
                    let n2 = dgt * n1;
                    views.push(if inverted {
                        SelectedTriangle {
                            area,
                            normal_grain1: -n2,
                            normal_grain2: n1,
                        }
                    } else {
                        SelectedTriangle {
                            area,
                            normal_grain1: n1,
                            normal_grain2: -n2,
                        }
                    });
                }
            }
        }

        Some(FaceSelection { area, views })
    }

    /// Rotation angle between `m` and the fixed misorientation.
    fn deviation(&self, m: &Matrix3<f64>) -> f64 {
        clamp_unit(((m * self.fixed_transpose).trace() - 1.0) * 0.5).acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbcd_rotation::{AxisAngle, EulerAngles, matrix_to_euler};
    use gbcd_symmetry::LaueClass;
    use gbcd_types::NODE_TYPE_INTERIOR;

    fn selector<'a>(mesh: &'a BoundaryMesh, features: &'a FeatureData, fixed: &AxisAngle) -> Selector<'a> {
        Selector {
            mesh,
            features,
            ops: LaueClass::CubicHigh.symmetry_ops().matrices(),
            phase: 1,
            fixed_transpose: fixed.to_matrix().transpose(),
            tolerance: 5.0_f64.to_radians(),
            exclude_triple_lines: false,
        }
    }

    fn features(second: EulerAngles) -> FeatureData {
        FeatureData::new(vec![EulerAngles::default(), EulerAngles::default(), second], vec![0, 1, 1])
    }

    #[test]
    fn test_matching_pair_is_selected() {
        let fixed = AxisAngle::from_hkl_degrees([1.0, 1.0, 1.0], 17.9);
        let features = features(matrix_to_euler(&fixed.to_matrix()));
        let mesh = BoundaryMesh::from_face_data(vec![[1, 2]], vec![Vector3::z()], vec![3.0]);

        let selection = selector(&mesh, &features, &fixed).select(0).expect("face qualifies");
        assert!((selection.area - 3.0).abs() < f64::EPSILON);
        assert!(!selection.views.is_empty());
        for view in &selection.views {
            assert!((view.normal_grain1.norm() - 1.0).abs() < 1e-9);
            assert!((view.normal_grain2.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_views_map_normals_through_the_misorientation() {
        let fixed = AxisAngle::from_hkl_degrees([1.0, 1.0, 1.0], 17.9);
        let features = features(matrix_to_euler(&fixed.to_matrix()));
        let mesh = BoundaryMesh::from_face_data(vec![[1, 2]], vec![Vector3::new(0.6, 0.0, 0.8)], vec![1.0]);
        let fixed_t = fixed.to_matrix().transpose();

        // Within tolerance, -n2 is close to fixedT * n1 (or n1 to fixedT * -n2).
        let selection = selector(&mesh, &features, &fixed).select(0).expect("face qualifies");
        for view in &selection.views {
            let mapped = fixed_t * view.normal_grain1;
            let angle = clamp_unit(mapped.dot(&-view.normal_grain2)).acos();
            assert!(angle < 5.0_f64.to_radians() + 1e-9, "angle {angle}");
        }
    }

    #[test]
    fn test_distant_misorientation_is_not_selected() {
        let fixed = AxisAngle::from_hkl_degrees([1.0, 1.0, 1.0], 17.9);
        let features = features(EulerAngles::default());
        let mesh = BoundaryMesh::from_face_data(vec![[1, 2]], vec![Vector3::z()], vec![1.0]);

        let selection = selector(&mesh, &features, &fixed).select(0);
        assert_eq!(selection.map(|s| s.views.len()), Some(0));
    }

    #[test]
    fn test_other_phase_and_surface_faces_are_skipped() {
        let fixed = AxisAngle::from_hkl_degrees([1.0, 1.0, 1.0], 17.9);
        let features = FeatureData::new(vec![EulerAngles::default(); 4], vec![0, 1, 1, 2]);
        let mesh = BoundaryMesh::from_face_data(
            vec![[-1, 1], [2, 3], [0, 1]],
            vec![Vector3::z(); 3],
            vec![1.0; 3],
        );
        let s = selector(&mesh, &features, &fixed);
        for face in 0..3 {
            assert!(s.select(face).is_none());
        }
    }

    #[test]
    fn test_triple_line_exclusion() {
        let fixed = AxisAngle::from_hkl_degrees([1.0, 1.0, 1.0], 17.9);
        let features = features(EulerAngles::default());
        let vertices = vec![
            nalgebra::Point3::new(0.0, 0.0, 0.0),
            nalgebra::Point3::new(1.0, 0.0, 0.0),
            nalgebra::Point3::new(0.0, 1.0, 0.0),
            nalgebra::Point3::new(1.0, 1.0, 0.0),
        ];
        let mesh = BoundaryMesh::from_triangles(vertices, vec![[0, 1, 2], [1, 3, 2]], vec![[1, 2], [1, 2]])
            .with_node_types(vec![NODE_TYPE_INTERIOR, NODE_TYPE_INTERIOR, NODE_TYPE_INTERIOR, 3]);

        let mut s = selector(&mesh, &features, &fixed);
        s.exclude_triple_lines = true;
        assert!(s.select(0).is_some());
        assert!(s.select(1).is_none());

        s.exclude_triple_lines = false;
        assert!(s.select(1).is_some());
    }
}
