//! Schmid factor search over slip systems.

use gbcd_rotation::clamp_unit;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::laue::LaueClass;

/// A slip plane normal and slip direction in the crystal frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlipSystem {
    /// Slip plane normal (not necessarily unit length).
    pub plane: Vector3<f64>,
    /// Slip direction (not necessarily unit length).
    pub direction: Vector3<f64>,
}

impl SlipSystem {
    /// Create a slip system from a plane normal and a direction.
    #[inline]
    #[must_use]
    pub const fn new(plane: Vector3<f64>, direction: Vector3<f64>) -> Self {
        Self { plane, direction }
    }

    /// Create a slip system from Miller index triples.
    #[inline]
    #[must_use]
    pub fn from_arrays(plane: [f64; 3], direction: [f64; 3]) -> Self {
        Self::new(Vector3::from(plane), Vector3::from(direction))
    }
}

/// Outcome of a Schmid factor search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchmidResult {
    /// `|cos(phi) * cos(lambda)|`, in `[0, 0.5]` for a direction lying in
    /// its plane.
    pub factor: f64,
    /// Angle between the load axis and the plane normal, in radians.
    pub plane_angle: f64,
    /// Angle between the load axis and the slip direction, in radians.
    pub direction_angle: f64,
    /// Index of the winning slip system, or of the winning symmetry operator
    /// for [`schmid_factor_for_system`].
    pub slip_system: usize,
}

/// Absolute cosines of the angles between `load` and a plane and direction.
fn cosines(load: &Vector3<f64>, plane: &Vector3<f64>, direction: &Vector3<f64>) -> Option<(f64, f64)> {
    let (l, p, d) = (load.norm(), plane.norm(), direction.norm());
    if l < f64::EPSILON || p < f64::EPSILON || d < f64::EPSILON {
        return None;
    }
    let cos_phi = clamp_unit((load.dot(plane) / (l * p)).abs());
    let cos_lambda = clamp_unit((load.dot(direction) / (l * d)).abs());
    Some((cos_phi, cos_lambda))
}

fn result(cos_phi: f64, cos_lambda: f64, slip_system: usize) -> SchmidResult {
    SchmidResult {
        factor: cos_phi * cos_lambda,
        plane_angle: cos_phi.acos(),
        direction_angle: cos_lambda.acos(),
        slip_system,
    }
}

/// Highest Schmid factor over the canonical slip systems of a Laue class.
///
/// `load` is the loading direction expressed in the crystal frame. Ties keep
/// the lowest slip system index.
///
/// Returns `None` when the class has no canonical slip systems or when
/// `load` is the zero vector.
///
/// # Example
///
/// ```
/// use gbcd_symmetry::{LaueClass, schmid_factor};
/// use nalgebra::Vector3;
///
/// let r = schmid_factor(&Vector3::new(0.0, 0.0, 1.0), LaueClass::CubicHigh).unwrap();
/// // Loading along [001] gives 1/sqrt(6) on the {111}<110> family.
/// assert!((r.factor - 1.0 / 6.0_f64.sqrt()).abs() < 1e-12);
/// ```
#[must_use]
pub fn schmid_factor(load: &Vector3<f64>, class: LaueClass) -> Option<SchmidResult> {
    let mut best: Option<SchmidResult> = None;

    for (i, system) in class.symmetry_ops().slip_systems().iter().enumerate() {
        let (cos_phi, cos_lambda) = cosines(load, &system.plane, &system.direction)?;
        let factor = cos_phi * cos_lambda;
        if best.is_none_or(|b| factor > b.factor) {
            best = Some(result(cos_phi, cos_lambda, i));
        }
    }

    best
}

/// Highest Schmid factor over the symmetric variants of one slip system.
///
/// Every symmetry operator of `class` is applied to `plane` and
/// `direction`; variants whose rotated plane normal points into the lower
/// hemisphere (`z < 0`) are skipped. The returned `slip_system` is the index
/// of the winning operator.
///
/// Returns `None` when an input vector is zero or when every variant is
/// skipped.
#[must_use]
pub fn schmid_factor_for_system(
    load: &Vector3<f64>,
    plane: &Vector3<f64>,
    direction: &Vector3<f64>,
    class: LaueClass,
) -> Option<SchmidResult> {
    let mut best: Option<SchmidResult> = None;

    for (i, sym) in class.symmetry_ops().matrices().iter().enumerate() {
        let p = sym * plane;
        if p.z < 0.0 {
            continue;
        }
        let d = sym * direction;
        let (cos_phi, cos_lambda) = cosines(load, &p, &d)?;
        let factor = cos_phi * cos_lambda;
        if best.is_none_or(|b| factor > b.factor) {
            best = Some(result(cos_phi, cos_lambda, i));
        }
    }

    best
}
