//! Conversions between rotation representations.
//!
//! All conversions are pure and allocation-free.

use std::f64::consts::{PI, TAU};

use nalgebra::{Matrix3, Quaternion, Rotation3, Unit, UnitQuaternion, Vector3};

use crate::axis_angle::AxisAngle;
use crate::euler::EulerAngles;

/// Distance of `|g33|` from 1 below which a matrix is treated as a gimbal
/// lock configuration (`Phi = 0` or `Phi = pi`).
pub const GIMBAL_TOLERANCE: f64 = 1.0e-6;

/// Clamp a cosine argument to `[-1, 1]` before `acos`.
///
/// # Example
///
/// ```
/// use gbcd_rotation::clamp_unit;
///
/// assert_eq!(clamp_unit(1.000_000_1), 1.0);
/// assert!(clamp_unit(1.000_000_1).acos().is_finite());
/// ```
#[inline]
#[must_use]
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// Wrap an angle into `[0, 2pi)`.
#[inline]
fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Flip a quaternion into the hemisphere with non-negative scalar part.
#[inline]
fn positive_scalar(q: Quaternion<f64>) -> Quaternion<f64> {
    if q.w < 0.0 { -q } else { q }
}

// =============================================================================
// Euler angles
// =============================================================================

/// Passive Bunge orientation matrix of a set of Euler angles.
///
/// # Example
///
/// ```
/// use gbcd_rotation::{euler_to_matrix, EulerAngles};
///
/// let g = euler_to_matrix(&EulerAngles::from_degrees(90.0, 0.0, 0.0));
/// // A passive 90 degree rotation about Z maps sample X onto crystal -Y.
/// assert!((g[(0, 1)] - 1.0).abs() < 1e-12);
/// assert!((g[(1, 0)] + 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn euler_to_matrix(e: &EulerAngles) -> Matrix3<f64> {
    let (s1, c1) = e.phi1.sin_cos();
    let (s, c) = e.phi.sin_cos();
    let (s2, c2) = e.phi2.sin_cos();

    Matrix3::new(
        c1 * c2 - s1 * s2 * c,
        s1 * c2 + c1 * s2 * c,
        s2 * s,
        -c1 * s2 - s1 * c2 * c,
        -s1 * s2 + c1 * c2 * c,
        c2 * s,
        s1 * s,
        -c1 * s,
        c,
    )
}

/// Euler angles of a passive orientation matrix.
///
/// Results are canonical: `phi1, phi2 in [0, 2pi)` and `Phi in [0, pi]`.
/// At gimbal lock the in-plane rotation is reported entirely in `phi1`.
#[must_use]
pub fn matrix_to_euler(g: &Matrix3<f64>) -> EulerAngles {
    let g33 = g[(2, 2)];

    let (phi1, phi, phi2) = if (g33.abs() - 1.0).abs() >= GIMBAL_TOLERANCE {
        let phi = clamp_unit(g33).acos();
        let zeta = 1.0 / (1.0 - g33 * g33).max(f64::MIN_POSITIVE).sqrt();
        (
            (g[(2, 0)] * zeta).atan2(-g[(2, 1)] * zeta),
            phi,
            (g[(0, 2)] * zeta).atan2(g[(1, 2)] * zeta),
        )
    } else if g33 > 0.0 {
        (g[(0, 1)].atan2(g[(0, 0)]), 0.0, 0.0)
    } else {
        (-(-g[(0, 1)]).atan2(g[(0, 0)]), PI, 0.0)
    };

    EulerAngles::new(wrap_two_pi(phi1), phi, wrap_two_pi(phi2))
}

/// Unit quaternion of a set of Euler angles.
///
/// The quaternion satisfies
/// `quaternion_to_matrix(&euler_to_quaternion(e)) == euler_to_matrix(e)` and
/// has a non-negative scalar part.
#[must_use]
pub fn euler_to_quaternion(e: &EulerAngles) -> UnitQuaternion<f64> {
    let half_phi = 0.5 * e.phi;
    let sum = 0.5 * (e.phi1 + e.phi2);
    let diff = 0.5 * (e.phi1 - e.phi2);

    let (s_phi, c_phi) = half_phi.sin_cos();
    let (sp, cp) = sum.sin_cos();
    let (sm, cm) = diff.sin_cos();

    let q = Quaternion::new(c_phi * cp, -s_phi * cm, -s_phi * sm, -c_phi * sp);
    UnitQuaternion::new_normalize(positive_scalar(q))
}

/// Euler angles of a unit quaternion.
#[inline]
#[must_use]
pub fn quaternion_to_euler(q: &UnitQuaternion<f64>) -> EulerAngles {
    matrix_to_euler(&quaternion_to_matrix(q))
}

// =============================================================================
// Quaternions and matrices
// =============================================================================

/// Rotation matrix of a unit quaternion.
#[inline]
#[must_use]
pub fn quaternion_to_matrix(q: &UnitQuaternion<f64>) -> Matrix3<f64> {
    q.to_rotation_matrix().into_inner()
}

/// Unit quaternion of a rotation matrix, with non-negative scalar part.
///
/// Uses the largest of the four squared components as pivot so the result
/// is well conditioned for every rotation, including half turns.
#[must_use]
pub fn matrix_to_quaternion(g: &Matrix3<f64>) -> UnitQuaternion<f64> {
    let trace = g.trace();
    let (g00, g11, g22) = (g[(0, 0)], g[(1, 1)], g[(2, 2)]);

    let q = if trace >= g00 && trace >= g11 && trace >= g22 {
        let s = 2.0 * (1.0 + trace).max(0.0).sqrt();
        Quaternion::new(
            0.25 * s,
            (g[(2, 1)] - g[(1, 2)]) / s,
            (g[(0, 2)] - g[(2, 0)]) / s,
            (g[(1, 0)] - g[(0, 1)]) / s,
        )
    } else if g00 >= g11 && g00 >= g22 {
        let s = 2.0 * (1.0 + g00 - g11 - g22).max(0.0).sqrt();
        Quaternion::new(
            (g[(2, 1)] - g[(1, 2)]) / s,
            0.25 * s,
            (g[(0, 1)] + g[(1, 0)]) / s,
            (g[(0, 2)] + g[(2, 0)]) / s,
        )
    } else if g11 >= g22 {
        let s = 2.0 * (1.0 + g11 - g00 - g22).max(0.0).sqrt();
        Quaternion::new(
            (g[(0, 2)] - g[(2, 0)]) / s,
            (g[(0, 1)] + g[(1, 0)]) / s,
            0.25 * s,
            (g[(1, 2)] + g[(2, 1)]) / s,
        )
    } else {
        let s = 2.0 * (1.0 + g22 - g00 - g11).max(0.0).sqrt();
        Quaternion::new(
            (g[(1, 0)] - g[(0, 1)]) / s,
            (g[(0, 2)] + g[(2, 0)]) / s,
            (g[(1, 2)] + g[(2, 1)]) / s,
            0.25 * s,
        )
    };

    UnitQuaternion::new_normalize(positive_scalar(q))
}

// =============================================================================
// Axis-angle
// =============================================================================

/// Rotation matrix for a rotation of `angle` radians about `axis`.
///
/// The axis need not be normalized. A zero axis yields the identity.
///
/// # Example
///
/// ```
/// use gbcd_rotation::{axis_angle_to_matrix, Vector3};
///
/// let r = axis_angle_to_matrix(&Vector3::z(), std::f64::consts::FRAC_PI_2);
/// let x = r * Vector3::x();
/// assert!((x - Vector3::y()).norm() < 1e-12);
/// ```
#[must_use]
pub fn axis_angle_to_matrix(axis: &Vector3<f64>, angle: f64) -> Matrix3<f64> {
    Unit::try_new(*axis, f64::EPSILON).map_or_else(Matrix3::identity, |unit| {
        Rotation3::from_axis_angle(&unit, angle).into_inner()
    })
}

/// Unit quaternion for a rotation of `angle` radians about `axis`, with
/// non-negative scalar part. A zero axis yields the identity.
#[must_use]
pub fn axis_angle_to_quaternion(axis: &Vector3<f64>, angle: f64) -> UnitQuaternion<f64> {
    Unit::try_new(*axis, f64::EPSILON).map_or_else(UnitQuaternion::identity, |unit| {
        let q = UnitQuaternion::from_axis_angle(&unit, angle);
        UnitQuaternion::new_unchecked(positive_scalar(q.into_inner()))
    })
}

/// Axis-angle pair of a unit quaternion, with angle in `[0, pi]`.
#[must_use]
pub fn quaternion_to_axis_angle(q: &UnitQuaternion<f64>) -> AxisAngle {
    let q = positive_scalar(*q.quaternion());
    let v = q.imag();
    let norm = v.norm();
    // atan2 stays accurate near the identity where acos(w) loses digits.
    let angle = 2.0 * norm.atan2(q.w);

    if angle < 1.0e-12 {
        AxisAngle::identity()
    } else {
        AxisAngle {
            axis: v / norm,
            angle,
        }
    }
}

/// Axis-angle pair of a rotation matrix, with angle in `[0, pi]`.
#[inline]
#[must_use]
pub fn matrix_to_axis_angle(g: &Matrix3<f64>) -> AxisAngle {
    quaternion_to_axis_angle(&matrix_to_quaternion(g))
}
