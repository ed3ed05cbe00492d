//! Misorientation and symmetric-equivalent searches.

use std::cmp::Ordering;

use gbcd_rotation::{AxisAngle, clamp_unit, quaternion_to_axis_angle};
use nalgebra::{UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::laue::LaueClass;
use crate::tables::SymmetryOps;

/// Minimum misorientation between two orientations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Misorientation {
    /// Disorientation angle in radians, in `[0, pi]`.
    pub angle: f64,
    /// Unit rotation axis in the crystal frame. `[0, 0, 1]` for a zero angle.
    pub axis: Vector3<f64>,
}

impl Misorientation {
    /// Disorientation angle in degrees.
    #[inline]
    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    /// The misorientation as an axis-angle pair.
    #[inline]
    #[must_use]
    pub fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle {
            axis: self.axis,
            angle: self.angle,
        }
    }
}

/// Lexicographic order of two orientations on the `w >= 0` hemisphere.
fn operand_order(q1: &UnitQuaternion<f64>, q2: &UnitQuaternion<f64>) -> Ordering {
    let key = |q: &UnitQuaternion<f64>| {
        let c = if q.w < 0.0 { -q.coords } else { q.coords };
        [c.w, c.x, c.y, c.z]
    };
    let (a, b) = (key(q1), key(q2));
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Exhaustive `nsym x nsym` search for the smallest rotation angle among
/// `S_i * q1 * q2^-1 * S_j^-1`.
fn search(q1: &UnitQuaternion<f64>, q2: &UnitQuaternion<f64>, ops: &SymmetryOps) -> Misorientation {
    let base = q1 * q2.inverse();
    let mut best_w = -1.0;
    let mut best = base;

    for sym1 in ops.quaternions() {
        let left = sym1 * base;
        for sym2 in ops.quaternions() {
            let candidate = left * sym2.inverse();
            let w = clamp_unit(candidate.w.abs());
            // Larger |w| means smaller angle; only strict improvements count.
            if w > best_w {
                best_w = w;
                best = candidate;
            }
        }
    }

    let aa = quaternion_to_axis_angle(&best);
    Misorientation {
        angle: aa.angle,
        axis: aa.axis,
    }
}

/// Minimum misorientation between two orientations under a Laue class.
///
/// Applies every pair of symmetry operators to the relative rotation
/// `q1 * q2^-1` and keeps the smallest rotation angle. The axis is expressed
/// in the crystal frame of the first orientation.
///
/// Swapping the arguments returns the same angle with the axis negated. Both
/// calls evaluate the operands in the same canonical order, so the two
/// results agree exactly rather than only up to symmetrically equivalent
/// axes.
///
/// # Example
///
/// ```
/// use gbcd_rotation::{EulerAngles, euler_to_quaternion};
/// use gbcd_symmetry::{LaueClass, minimum_misorientation};
///
/// let q1 = euler_to_quaternion(&EulerAngles::default());
/// let q2 = euler_to_quaternion(&EulerAngles::from_degrees(30.0, 0.0, 0.0));
///
/// let m = minimum_misorientation(&q1, &q2, LaueClass::CubicHigh);
/// assert!((m.angle_degrees() - 30.0).abs() < 1e-9);
/// assert!((m.axis.z.abs() - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn minimum_misorientation(
    q1: &UnitQuaternion<f64>,
    q2: &UnitQuaternion<f64>,
    class: LaueClass,
) -> Misorientation {
    let ops = class.symmetry_ops();
    if operand_order(q1, q2) == Ordering::Greater {
        let swapped = search(q2, q1, ops);
        if swapped.angle < 1.0e-12 {
            return swapped;
        }
        Misorientation {
            angle: swapped.angle,
            axis: -swapped.axis,
        }
    } else {
        search(q1, q2, ops)
    }
}

/// The symmetric equivalent of `candidate` closest to `reference`.
///
/// Closeness is the quaternion dot product; the returned quaternion is
/// sign-aligned with `reference`, which is what running orientation averages
/// need.
#[must_use]
pub fn nearest_symmetric_equivalent(
    reference: &UnitQuaternion<f64>,
    candidate: &UnitQuaternion<f64>,
    class: LaueClass,
) -> UnitQuaternion<f64> {
    let mut best = *candidate.quaternion();
    let mut best_dot = f64::NEG_INFINITY;

    for sym in class.symmetry_ops().quaternions() {
        let mut equivalent = *(sym * candidate).quaternion();
        let mut dot = reference.coords.dot(&equivalent.coords);
        if dot < 0.0 {
            equivalent = -equivalent;
            dot = -dot;
        }
        if dot > best_dot {
            best_dot = dot;
            best = equivalent;
        }
    }

    UnitQuaternion::new_unchecked(best)
}

/// Reduce an orientation into the fundamental zone of a Laue class.
///
/// Returns the symmetric equivalent with the smallest rotation angle,
/// with non-negative scalar part.
#[must_use]
pub fn fundamental_zone_quaternion(q: &UnitQuaternion<f64>, class: LaueClass) -> UnitQuaternion<f64> {
    let mut best = *q.quaternion();
    let mut best_w = f64::NEG_INFINITY;

    for sym in class.symmetry_ops().quaternions() {
        let equivalent = *(sym * q).quaternion();
        if equivalent.w.abs() > best_w {
            best_w = equivalent.w.abs();
            best = equivalent;
        }
    }

    if best.w < 0.0 {
        best = -best;
    }
    UnitQuaternion::new_unchecked(best)
}
