//! Property-based tests for misorientation searches.
//!
//! Run with: cargo test -p gbcd-symmetry -- proptest

use gbcd_rotation::{Quaternion, UnitQuaternion};
use gbcd_symmetry::{
    LaueClass, fundamental_zone_quaternion, minimum_misorientation, nearest_symmetric_equivalent,
};
use proptest::prelude::*;
use std::f64::consts::PI;

// =============================================================================
// Strategies
// =============================================================================

fn arb_quaternion() -> impl Strategy<Value = UnitQuaternion<f64>> {
    prop::array::uniform4(-1.0..1.0f64)
        .prop_filter("non-degenerate", |c| {
            c.iter().map(|v| v * v).sum::<f64>() > 1e-3
        })
        .prop_map(|[w, x, y, z]| UnitQuaternion::new_normalize(Quaternion::new(w, x, y, z)))
}

fn arb_class() -> impl Strategy<Value = LaueClass> {
    prop::sample::select(LaueClass::ALL.to_vec())
}

/// Largest disorientation angle of m-3m, about [1, 1, sqrt(2) - 1].
const CUBIC_MAX_DEGREES: f64 = 62.8;

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// An orientation is never misoriented from itself.
    #[test]
    fn identity_has_zero_angle(q in arb_quaternion(), class in arb_class()) {
        let m = minimum_misorientation(&q, &q, class);
        prop_assert!(m.angle < 1e-6);
    }

    /// Angles are in [0, pi] and axes are unit vectors.
    #[test]
    fn angle_and_axis_are_canonical(a in arb_quaternion(), b in arb_quaternion(), class in arb_class()) {
        let m = minimum_misorientation(&a, &b, class);
        prop_assert!(m.angle >= 0.0 && m.angle <= PI + 1e-12);
        prop_assert!((m.axis.norm() - 1.0).abs() < 1e-9);
    }

    /// Swapping the operands keeps the angle and negates the axis.
    #[test]
    fn swap_negates_axis(a in arb_quaternion(), b in arb_quaternion()) {
        for class in [LaueClass::CubicHigh, LaueClass::HexagonalHigh] {
            let ab = minimum_misorientation(&a, &b, class);
            let ba = minimum_misorientation(&b, &a, class);
            prop_assert!((ab.angle - ba.angle).abs() < 1e-12);
            if ab.angle > 1e-9 {
                prop_assert!((ab.axis + ba.axis).norm() < 1e-12);
            }
        }
    }

    /// Cubic disorientations never exceed the fundamental zone bound.
    #[test]
    fn cubic_angle_is_bounded(a in arb_quaternion(), b in arb_quaternion()) {
        let m = minimum_misorientation(&a, &b, LaueClass::CubicHigh);
        prop_assert!(m.angle_degrees() <= CUBIC_MAX_DEGREES);
    }

    /// Reducing into the fundamental zone never increases the rotation angle.
    #[test]
    fn fundamental_zone_shrinks_angle(q in arb_quaternion(), class in arb_class()) {
        let fz = fundamental_zone_quaternion(&q, class);
        prop_assert!(fz.w >= 0.0);
        prop_assert!(fz.w >= q.w.abs() - 1e-12);
    }

    /// The nearest equivalent is at least as close as the candidate itself.
    #[test]
    fn nearest_equivalent_is_closest(r in arb_quaternion(), c in arb_quaternion(), class in arb_class()) {
        let nearest = nearest_symmetric_equivalent(&r, &c, class);
        let dot = r.coords.dot(&nearest.coords);
        prop_assert!(dot >= 0.0);
        prop_assert!(dot >= r.coords.dot(&c.coords).abs() - 1e-12);
    }
}
