//! Sampling directions on the upper hemisphere.

// Point indices stay far below 2^52.
#![allow(clippy::cast_precision_loss)]

use std::f64::consts::TAU;

use nalgebra::Vector3;

/// Angular increment of the golden-section spiral, `pi * (3 - sqrt(5))`.
pub const GOLDEN_ANGLE: f64 = 2.399_963_2;

/// Quasi-uniform unit directions with `z >= 0`.
///
/// A golden-section spiral of `2 * num_points` points covers the whole
/// sphere and the points with `z > 0` are kept, giving roughly
/// `num_points` directions. A ring on the equator, one point every
/// `equator_step` radians from azimuth 0 through `2 * pi`, closes the
/// hemisphere for plotting. A non-positive step adds no ring.
///
/// # Example
///
/// ```
/// use gbcd_metric::sample_directions;
///
/// let points = sample_directions(500, 7.0_f64.to_radians());
/// assert!(points.iter().all(|p| p.z >= 0.0 && (p.norm() - 1.0).abs() < 1e-12));
/// assert!(points.len() > 500);
/// ```
#[must_use]
pub fn sample_directions(num_points: usize, equator_step: f64) -> Vec<Vector3<f64>> {
    let n = 2 * num_points;
    let offset = 2.0 / n.max(1) as f64;

    let mut points: Vec<Vector3<f64>> = (0..n)
        .filter_map(|i| {
            let t = i as f64;
            let y = t * offset - 1.0 + 0.5 * offset;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let phi = t * GOLDEN_ANGLE;
            let z = phi.sin() * r;
            (z > 0.0).then(|| Vector3::new(phi.cos() * r, y, z))
        })
        .collect();

    if equator_step > 0.0 {
        let mut phi = 0.0_f64;
        while phi <= TAU {
            points.push(Vector3::new(phi.cos(), phi.sin(), 0.0));
            phi += equator_step;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spiral_half_is_kept() {
        let points = sample_directions(1000, 0.0);
        assert!((950..=1050).contains(&points.len()), "got {}", points.len());
        for p in &points {
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
            assert!(p.z > 0.0);
        }
    }

    #[test]
    fn test_equator_ring() {
        let step = 7.0_f64.to_radians();
        let spiral = sample_directions(200, 0.0).len();
        let points = sample_directions(200, step);
        let ring = &points[spiral..];

        // 0, 7, ..., 357 degrees.
        assert_eq!(ring.len(), 52);
        assert_relative_eq!(ring[0], Vector3::x(), epsilon = 1e-12);
        assert!(ring.iter().all(|p| p.z.abs() < f64::EPSILON));
    }

    #[test]
    fn test_spiral_is_spread_out() {
        // Every direction of a coarse grid has a sample within 10 degrees.
        let points = sample_directions(3000, 0.0);
        let limit = 10.0_f64.to_radians().cos();
        for a in 0..36 {
            for e in 1..9 {
                let (az, el) = (f64::from(a * 10).to_radians(), f64::from(e * 10).to_radians());
                let d = Vector3::new(el.cos() * az.cos(), el.cos() * az.sin(), el.sin());
                assert!(points.iter().any(|p| p.dot(&d) > limit), "no sample near ({a}, {e})");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(sample_directions(50, 0.1), sample_directions(50, 0.1));
    }
}
