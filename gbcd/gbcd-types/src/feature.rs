//! Per-feature (grain) data referenced by boundary face labels.

use gbcd_rotation::EulerAngles;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshDataError, MeshDataResult};
use crate::mesh::BoundaryMesh;

/// Orientation and phase of every feature.
///
/// Index 0 is the unassigned feature and never takes part in boundary
/// statistics. Phase 0 is the unknown phase.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureData {
    /// Bunge Euler angles of each feature, in radians.
    pub euler_angles: Vec<EulerAngles>,
    /// Ensemble (phase) index of each feature.
    pub phases: Vec<i32>,
}

impl FeatureData {
    /// Create feature data from parallel arrays.
    #[inline]
    #[must_use]
    pub const fn new(euler_angles: Vec<EulerAngles>, phases: Vec<i32>) -> Self {
        Self {
            euler_angles,
            phases,
        }
    }

    /// Number of features, including slot 0.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// True if there are no features at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Euler angles of a feature label, if the label is a valid index.
    #[inline]
    #[must_use]
    pub fn euler(&self, label: i32) -> Option<&EulerAngles> {
        self.euler_angles.get(usize::try_from(label).ok()?)
    }

    /// Phase of a feature label, if the label is a valid index.
    #[inline]
    #[must_use]
    pub fn phase(&self, label: i32) -> Option<i32> {
        self.phases.get(usize::try_from(label).ok()?).copied()
    }

    /// Phase shared by both grains of a boundary.
    ///
    /// Returns `None` unless both labels are assigned features (`> 0`) of
    /// the same, known (`> 0`) phase.
    ///
    /// # Example
    ///
    /// ```
    /// use gbcd_types::{EulerAngles, FeatureData};
    ///
    /// let features = FeatureData::new(vec![EulerAngles::default(); 4], vec![0, 1, 1, 2]);
    ///
    /// assert_eq!(features.boundary_phase([1, 2]), Some(1));
    /// assert_eq!(features.boundary_phase([2, 3]), None);
    /// assert_eq!(features.boundary_phase([-1, 1]), None);
    /// ```
    #[must_use]
    pub fn boundary_phase(&self, labels: [i32; 2]) -> Option<usize> {
        let [a, b] = labels;
        if a <= 0 || b <= 0 {
            return None;
        }
        let (pa, pb) = (self.phase(a)?, self.phase(b)?);
        if pa == pb && pa > 0 {
            usize::try_from(pa).ok()
        } else {
            None
        }
    }

    /// Check array lengths and that every phase indexes an ensemble.
    ///
    /// # Errors
    ///
    /// Returns [`MeshDataError::LengthMismatch`] if the Euler and phase arrays
    /// differ in length, or [`MeshDataError::PhaseOutOfRange`] if a phase is
    /// negative or not below `num_phases`.
    pub fn validate(&self, num_phases: usize) -> MeshDataResult<()> {
        if self.euler_angles.len() != self.phases.len() {
            return Err(MeshDataError::length_mismatch(
                "euler_angles",
                self.phases.len(),
                self.euler_angles.len(),
            ));
        }
        for (feature, &phase) in self.phases.iter().enumerate() {
            if usize::try_from(phase).map_or(true, |p| p >= num_phases) {
                return Err(MeshDataError::phase_out_of_range(feature, phase, num_phases));
            }
        }
        Ok(())
    }

    /// Check that every face label of `mesh` is a feature index or negative.
    ///
    /// # Errors
    ///
    /// Returns [`MeshDataError::LabelOutOfRange`] for the first label that
    /// does not index a feature.
    pub fn check_labels(&self, mesh: &BoundaryMesh) -> MeshDataResult<()> {
        let num_features = self.len();
        for (face, labels) in mesh.face_labels.iter().enumerate() {
            for &label in labels {
                if usize::try_from(label).is_ok_and(|l| l >= num_features) {
                    return Err(MeshDataError::label_out_of_range(face, label, num_features));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn features() -> FeatureData {
        FeatureData::new(vec![EulerAngles::default(); 4], vec![0, 1, 1, 2])
    }

    #[test]
    fn test_boundary_phase() {
        let f = features();
        assert_eq!(f.boundary_phase([1, 2]), Some(1));
        assert_eq!(f.boundary_phase([2, 1]), Some(1));
        assert_eq!(f.boundary_phase([0, 1]), None);
        assert_eq!(f.boundary_phase([1, 3]), None);
        assert_eq!(f.boundary_phase([1, 9]), None);
    }

    #[test]
    fn test_unknown_phase_is_skipped() {
        let f = FeatureData::new(vec![EulerAngles::default(); 3], vec![0, 0, 0]);
        assert_eq!(f.boundary_phase([1, 2]), None);
    }

    #[test]
    fn test_validate() {
        assert!(features().validate(3).is_ok());
        assert_eq!(
            features().validate(2),
            Err(MeshDataError::phase_out_of_range(3, 2, 2))
        );

        let mut f = features();
        f.euler_angles.pop();
        assert!(matches!(
            f.validate(3),
            Err(MeshDataError::LengthMismatch { array: "euler_angles", .. })
        ));

        let f = FeatureData::new(vec![EulerAngles::default(); 2], vec![0, -3]);
        assert!(f.validate(3).is_err());
    }

    #[test]
    fn test_check_labels() {
        let mesh = BoundaryMesh::from_face_data(
            vec![[1, 2], [-1, 3]],
            vec![Vector3::z(); 2],
            vec![1.0; 2],
        );
        assert!(features().check_labels(&mesh).is_ok());

        let mesh = BoundaryMesh::from_face_data(vec![[1, 4]], vec![Vector3::z()], vec![1.0]);
        assert_eq!(
            features().check_labels(&mesh),
            Err(MeshDataError::label_out_of_range(0, 4, 4))
        );
    }
}
