//! Distribution values at the sampling directions.

use gbcd_rotation::clamp_unit;
use nalgebra::{Matrix3, Vector3};

use crate::select::SelectedTriangle;

/// Normalization shared by every probe of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ProbeScale {
    pub total_area: f64,
    pub distinct_boundaries: usize,
    pub ball_volume: f64,
}

/// Area of the selected views within the plane tolerance of `direction`.
///
/// `direction` is the boundary normal in the first grain's frame; the
/// second grain sees it through the fixed misorientation. Each view is
/// tried with both signs of the boundary normal.
pub(crate) fn probe_area(
    direction: &Vector3<f64>,
    fixed_transpose: &Matrix3<f64>,
    selected: &[SelectedTriangle],
    plane_tolerance_sq: f64,
) -> f64 {
    let fixed1 = direction;
    let fixed2 = fixed_transpose * direction;

    let mut area = 0.0;
    for view in selected {
        for sign in [1.0, -1.0] {
            let theta1 = clamp_unit(sign * view.normal_grain1.dot(fixed1)).acos();
            let theta2 = clamp_unit(-sign * view.normal_grain2.dot(&fixed2)).acos();
            if 0.5 * (theta1 * theta1 + theta2 * theta2) < plane_tolerance_sq {
                area += view.area;
            }
        }
    }
    area
}

impl ProbeScale {
    /// True if the run has anything to normalize by.
    pub fn is_usable(&self) -> bool {
        self.total_area > 0.0 && self.distinct_boundaries > 0 && self.ball_volume > 0.0
    }

    /// `(distribution, error)` for a probed area, in multiples of random
    /// distribution.
    #[allow(clippy::cast_precision_loss)]
    pub fn normalize(&self, area: f64) -> (f64, f64) {
        if !self.is_usable() {
            return (0.0, 0.0);
        }
        let fraction = area / self.total_area;
        let error = (fraction / self.distinct_boundaries as f64).sqrt() / self.ball_volume;
        (fraction / self.ball_volume, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn view(n1: Vector3<f64>, n2: Vector3<f64>, area: f64) -> SelectedTriangle {
        SelectedTriangle {
            area,
            normal_grain1: n1,
            normal_grain2: n2,
        }
    }

    #[test]
    fn test_probe_hits_matching_direction() {
        let tol = 5.0_f64.to_radians().powi(2);
        let identity = Matrix3::identity();
        let selected = [view(Vector3::z(), -Vector3::z(), 2.0)];

        // Direct hit.
        assert_relative_eq!(probe_area(&Vector3::z(), &identity, &selected, tol), 2.0);
        // The antipodal direction hits through the sign flip.
        assert_relative_eq!(probe_area(&-Vector3::z(), &identity, &selected, tol), 2.0);
        // A perpendicular direction misses.
        assert_relative_eq!(probe_area(&Vector3::x(), &identity, &selected, tol), 0.0);
    }

    #[test]
    fn test_probe_uses_fixed_misorientation() {
        let tol = 5.0_f64.to_radians().powi(2);
        // A quarter turn about x moves z onto the y axis in the second frame.
        let fixed = gbcd_rotation::axis_angle_to_matrix(&Vector3::x(), std::f64::consts::FRAC_PI_2);
        let fixed_t = fixed.transpose();
        let n2 = fixed_t * Vector3::z();
        let selected = [view(Vector3::z(), -n2, 1.0)];

        assert_relative_eq!(probe_area(&Vector3::z(), &fixed_t, &selected, tol), 1.0);
        // Without the misorientation the second normal disagrees.
        assert_relative_eq!(probe_area(&Vector3::z(), &Matrix3::identity(), &selected, tol), 0.0);
    }

    #[test]
    fn test_normalize() {
        let scale = ProbeScale {
            total_area: 4.0,
            distinct_boundaries: 2,
            ball_volume: 0.5,
        };
        let (dist, err) = scale.normalize(2.0);
        assert_relative_eq!(dist, 1.0);
        assert_relative_eq!(err, 1.0, epsilon = 1e-12);

        let empty = ProbeScale {
            distinct_boundaries: 0,
            ..scale
        };
        assert_eq!(empty.normalize(2.0), (0.0, 0.0));
    }
}
