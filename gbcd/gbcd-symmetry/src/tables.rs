//! Static symmetry operator tables.
//!
//! Operators are listed as quaternions in `(x, y, z, w)` order; the matrix
//! form of each operator is derived once from its quaternion. All tables are
//! built on first use and never mutated afterwards.

use std::f64::consts::FRAC_1_SQRT_2 as R;
use std::sync::OnceLock;

use gbcd_rotation::quaternion_to_matrix;
use nalgebra::{Matrix3, Quaternion, UnitQuaternion, Vector3};

use crate::laue::LaueClass;
use crate::schmid::SlipSystem;

const H: f64 = 0.5;
const S3: f64 = 0.866_025_403_784_438_6;

const IDENTITY: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

#[rustfmt::skip]
const CUBIC_HIGH: [[f64; 4]; 24] = [
    IDENTITY,
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [R, 0.0, 0.0, R],
    [0.0, R, 0.0, R],
    [0.0, 0.0, R, R],
    [-R, 0.0, 0.0, R],
    [0.0, -R, 0.0, R],
    [0.0, 0.0, -R, R],
    [R, R, 0.0, 0.0],
    [-R, R, 0.0, 0.0],
    [0.0, R, R, 0.0],
    [0.0, -R, R, 0.0],
    [R, 0.0, R, 0.0],
    [-R, 0.0, R, 0.0],
    [H, H, H, H],
    [-H, -H, -H, H],
    [H, -H, H, H],
    [-H, H, -H, H],
    [-H, H, H, H],
    [H, -H, -H, H],
    [-H, -H, H, H],
    [H, H, -H, H],
];

#[rustfmt::skip]
const CUBIC_LOW: [[f64; 4]; 12] = [
    IDENTITY,
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [H, H, H, H],
    [-H, -H, -H, H],
    [H, -H, H, H],
    [-H, H, -H, H],
    [-H, H, H, H],
    [H, -H, -H, H],
    [-H, -H, H, H],
    [H, H, -H, H],
];

#[rustfmt::skip]
const HEXAGONAL_HIGH: [[f64; 4]; 12] = [
    IDENTITY,
    [0.0, 0.0, H, S3],
    [0.0, 0.0, S3, H],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, S3, -H],
    [0.0, 0.0, H, -S3],
    [1.0, 0.0, 0.0, 0.0],
    [S3, H, 0.0, 0.0],
    [H, S3, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [-H, S3, 0.0, 0.0],
    [-S3, H, 0.0, 0.0],
];

#[rustfmt::skip]
const TETRAGONAL_HIGH: [[f64; 4]; 8] = [
    IDENTITY,
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, R, -R],
    [0.0, 0.0, R, R],
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [R, R, 0.0, 0.0],
    [-R, R, 0.0, 0.0],
];

#[rustfmt::skip]
const TRIGONAL_HIGH: [[f64; 4]; 6] = [
    IDENTITY,
    [0.0, 0.0, S3, H],
    [0.0, 0.0, S3, -H],
    [1.0, 0.0, 0.0, 0.0],
    [-H, S3, 0.0, 0.0],
    [-H, -S3, 0.0, 0.0],
];

const ORTHORHOMBIC: [[f64; 4]; 4] = [
    IDENTITY,
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
];

const MONOCLINIC: [[f64; 4]; 2] = [IDENTITY, [0.0, 1.0, 0.0, 0.0]];

/// Operator quaternions of a class, as `(x, y, z, w)` rows.
///
/// The low-symmetry subgroups are prefixes of their high-symmetry tables.
fn operator_rows(class: LaueClass) -> &'static [[f64; 4]] {
    match class {
        LaueClass::CubicHigh => &CUBIC_HIGH,
        LaueClass::CubicLow => &CUBIC_LOW,
        LaueClass::HexagonalHigh => &HEXAGONAL_HIGH,
        LaueClass::HexagonalLow => &HEXAGONAL_HIGH[..6],
        LaueClass::TetragonalHigh => &TETRAGONAL_HIGH,
        LaueClass::TetragonalLow => &TETRAGONAL_HIGH[..4],
        LaueClass::TrigonalHigh => &TRIGONAL_HIGH,
        LaueClass::TrigonalLow => &TRIGONAL_HIGH[..3],
        LaueClass::OrthoRhombic => &ORTHORHOMBIC,
        LaueClass::Monoclinic => &MONOCLINIC,
        LaueClass::Triclinic => std::slice::from_ref(&IDENTITY),
    }
}

/// Canonical slip systems of a class.
fn slip_systems(class: LaueClass) -> Vec<SlipSystem> {
    match class {
        LaueClass::CubicHigh | LaueClass::CubicLow => {
            // {111}<110>
            #[rustfmt::skip]
            let systems: [([f64; 3], [f64; 3]); 12] = [
                ([1.0, 1.0, 1.0], [0.0, 1.0, -1.0]),
                ([1.0, 1.0, 1.0], [1.0, 0.0, -1.0]),
                ([1.0, 1.0, 1.0], [1.0, -1.0, 0.0]),
                ([1.0, 1.0, -1.0], [1.0, -1.0, 0.0]),
                ([1.0, 1.0, -1.0], [1.0, 0.0, 1.0]),
                ([1.0, 1.0, -1.0], [0.0, 1.0, 1.0]),
                ([1.0, -1.0, 1.0], [1.0, 1.0, 0.0]),
                ([1.0, -1.0, 1.0], [0.0, 1.0, 1.0]),
                ([1.0, -1.0, 1.0], [1.0, 0.0, -1.0]),
                ([-1.0, 1.0, 1.0], [1.0, 1.0, 0.0]),
                ([-1.0, 1.0, 1.0], [1.0, 0.0, 1.0]),
                ([-1.0, 1.0, 1.0], [0.0, 1.0, -1.0]),
            ];
            systems
                .iter()
                .map(|(p, d)| SlipSystem::from_arrays(*p, *d))
                .collect()
        }
        LaueClass::HexagonalHigh | LaueClass::HexagonalLow => {
            // Basal (0001)<11-20> then prismatic {10-10}<11-20>, Cartesian
            // with a1 along X.
            let a = [
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(-H, S3, 0.0),
                Vector3::new(-H, -S3, 0.0),
            ];
            let basal = a.iter().map(|d| SlipSystem::new(Vector3::z(), *d));
            let prismatic = a
                .iter()
                .map(|d| SlipSystem::new(Vector3::z().cross(d), *d));
            basal.chain(prismatic).collect()
        }
        _ => Vec::new(),
    }
}

/// Symmetry operators and slip systems of one Laue class.
#[derive(Debug, Clone)]
pub struct SymmetryOps {
    class: LaueClass,
    quaternions: Vec<UnitQuaternion<f64>>,
    matrices: Vec<Matrix3<f64>>,
    slip_systems: Vec<SlipSystem>,
}

impl SymmetryOps {
    fn build(class: LaueClass) -> Self {
        let quaternions: Vec<UnitQuaternion<f64>> = operator_rows(class)
            .iter()
            .map(|[x, y, z, w]| UnitQuaternion::new_normalize(Quaternion::new(*w, *x, *y, *z)))
            .collect();

        let matrices = quaternions
            .iter()
            .map(|q| quaternion_to_matrix(q).map(|v| if v.abs() < 1e-12 { 0.0 } else { v }))
            .collect();

        Self {
            class,
            quaternions,
            matrices,
            slip_systems: slip_systems(class),
        }
    }

    /// The Laue class these operators belong to.
    #[inline]
    #[must_use]
    pub const fn class(&self) -> LaueClass {
        self.class
    }

    /// Number of operators.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.quaternions.len()
    }

    /// Always false: every class contains at least the identity.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quaternions.is_empty()
    }

    /// Operators as unit quaternions.
    #[inline]
    #[must_use]
    pub fn quaternions(&self) -> &[UnitQuaternion<f64>] {
        &self.quaternions
    }

    /// Operators as rotation matrices, in the same order as
    /// [`quaternions`](Self::quaternions).
    #[inline]
    #[must_use]
    pub fn matrices(&self) -> &[Matrix3<f64>] {
        &self.matrices
    }

    /// Quaternion of operator `i`.
    #[inline]
    #[must_use]
    pub fn quaternion(&self, i: usize) -> Option<&UnitQuaternion<f64>> {
        self.quaternions.get(i)
    }

    /// Matrix of operator `i`.
    #[inline]
    #[must_use]
    pub fn matrix(&self, i: usize) -> Option<&Matrix3<f64>> {
        self.matrices.get(i)
    }

    /// Canonical slip systems (empty for classes without a canonical set).
    #[inline]
    #[must_use]
    pub fn slip_systems(&self) -> &[SlipSystem] {
        &self.slip_systems
    }
}

static TABLES: OnceLock<Vec<SymmetryOps>> = OnceLock::new();

/// Process-wide operator table of a class.
pub(crate) fn symmetry_table(class: LaueClass) -> &'static SymmetryOps {
    let tables = TABLES.get_or_init(|| LaueClass::ALL.iter().map(|&c| SymmetryOps::build(c)).collect());
    &tables[class.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contains(ops: &SymmetryOps, q: &UnitQuaternion<f64>) -> bool {
        ops.quaternions()
            .iter()
            .any(|s| s.coords.dot(&q.coords).abs() > 1.0 - 1e-9)
    }

    #[test]
    fn test_tables_are_groups() {
        for class in LaueClass::ALL {
            let ops = class.symmetry_ops();
            for a in ops.quaternions() {
                assert!(contains(ops, &a.inverse()), "{class}: inverse missing");
                for b in ops.quaternions() {
                    assert!(contains(ops, &(a * b)), "{class}: not closed");
                }
            }
        }
    }

    #[test]
    fn test_first_operator_is_identity() {
        for class in LaueClass::ALL {
            let m = class.symmetry_ops().matrix(0).copied().unwrap_or_else(Matrix3::zeros);
            assert_relative_eq!(m, Matrix3::identity(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_matrices_are_rotations() {
        for class in LaueClass::ALL {
            for m in class.symmetry_ops().matrices() {
                assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-12);
                assert_relative_eq!(m.transpose() * m, Matrix3::identity(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_cubic_matrices_are_signed_permutations() {
        for m in LaueClass::CubicHigh.symmetry_ops().matrices() {
            for v in m.iter() {
                assert!(v.abs() < 1e-12 || (v.abs() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_slip_system_counts() {
        assert_eq!(LaueClass::CubicHigh.symmetry_ops().slip_systems().len(), 12);
        assert_eq!(LaueClass::CubicLow.symmetry_ops().slip_systems().len(), 12);
        assert_eq!(LaueClass::HexagonalHigh.symmetry_ops().slip_systems().len(), 6);
        assert!(LaueClass::OrthoRhombic.symmetry_ops().slip_systems().is_empty());
    }

    #[test]
    fn test_slip_directions_lie_in_planes() {
        for class in [LaueClass::CubicHigh, LaueClass::HexagonalHigh] {
            for system in class.symmetry_ops().slip_systems() {
                assert!(system.plane.dot(&system.direction).abs() < 1e-12);
            }
        }
    }
}
