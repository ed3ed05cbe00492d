//! Property-based tests for rotation conversions.
//!
//! Run with: cargo test -p gbcd-rotation -- proptest

use gbcd_rotation::{
    EulerAngles, Matrix3, Quaternion, UnitQuaternion, axis_angle_to_matrix, euler_to_matrix,
    euler_to_quaternion, matrix_to_euler, matrix_to_quaternion, quaternion_to_axis_angle,
    quaternion_to_matrix,
};
use proptest::prelude::*;
use std::f64::consts::{PI, TAU};

// =============================================================================
// Strategies
// =============================================================================

/// Euler angles away from the gimbal lock singularities.
fn arb_euler() -> impl Strategy<Value = EulerAngles> {
    (0.0..TAU, 0.01..(PI - 0.01), 0.0..TAU)
        .prop_map(|(phi1, phi, phi2)| EulerAngles::new(phi1, phi, phi2))
}

/// Random unit quaternion from a non-degenerate 4-vector.
fn arb_quaternion() -> impl Strategy<Value = UnitQuaternion<f64>> {
    prop::array::uniform4(-1.0..1.0f64)
        .prop_filter("non-degenerate", |c| {
            c.iter().map(|v| v * v).sum::<f64>() > 1e-3
        })
        .prop_map(|[w, x, y, z]| UnitQuaternion::new_normalize(Quaternion::new(w, x, y, z)))
}

/// Angular distance between two angles on the circle.
fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// Euler -> matrix -> Euler reproduces the angles away from gimbal lock.
    #[test]
    fn euler_roundtrip(e in arb_euler()) {
        let back = matrix_to_euler(&euler_to_matrix(&e));
        prop_assert!(circular_distance(back.phi1, e.phi1) < 1e-5);
        prop_assert!((back.phi - e.phi).abs() < 1e-5);
        prop_assert!(circular_distance(back.phi2, e.phi2) < 1e-5);
    }

    /// Quaternion matrices are orthogonal with unit determinant.
    #[test]
    fn quaternion_matrix_is_rotation(q in arb_quaternion()) {
        let m = quaternion_to_matrix(&q);
        let should_be_identity = m.transpose() * m;
        prop_assert!((should_be_identity - Matrix3::identity()).norm() < 1e-5);
        prop_assert!((m.determinant() - 1.0).abs() < 1e-5);
    }

    /// Matrix -> quaternion -> matrix is the identity map on rotations.
    #[test]
    fn matrix_quaternion_roundtrip(q in arb_quaternion()) {
        let m = quaternion_to_matrix(&q);
        let back = matrix_to_quaternion(&m);
        prop_assert!(back.w >= 0.0);
        prop_assert!((quaternion_to_matrix(&back) - m).norm() < 1e-9);
    }

    /// Euler quaternion and Euler matrix describe the same rotation.
    #[test]
    fn euler_quaternion_consistent(e in arb_euler()) {
        let via_q = quaternion_to_matrix(&euler_to_quaternion(&e));
        prop_assert!((via_q - euler_to_matrix(&e)).norm() < 1e-9);
    }

    /// Axis-angle extraction rebuilds the same matrix.
    #[test]
    fn axis_angle_roundtrip(q in arb_quaternion()) {
        let aa = quaternion_to_axis_angle(&q);
        prop_assert!(aa.angle >= 0.0 && aa.angle <= PI + 1e-12);
        let rebuilt = axis_angle_to_matrix(&aa.axis, aa.angle);
        prop_assert!((rebuilt - quaternion_to_matrix(&q)).norm() < 1e-9);
    }
}
