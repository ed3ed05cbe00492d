//! Histogram geometry: bin sizes and the equal-area boundary plane grid.
//!
//! The five GBCD dimensions are `phi1`, `cos(Phi)` and `phi2` of the
//! misorientation, followed by the two coordinates of the boundary plane
//! normal on an equal-area square. Each bin additionally splits into a
//! northern and a southern hemisphere.

// Bin counts are small positive integers; the float conversions are exact.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GbcdError, GbcdResult};

/// Number of histogram dimensions before the hemisphere split.
pub const GBCD_DIMS: usize = 5;

/// Largest number of values a histogram may hold, over all phases and both
/// hemispheres.
pub const MAX_GBCD_VALUES: usize = 1 << 31;

/// Position of a unit vector on the equal-area square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareCoord {
    /// Horizontal coordinate in `[-sqrt(pi/2), sqrt(pi/2)]`.
    pub x: f64,
    /// Vertical coordinate in `[-sqrt(pi/2), sqrt(pi/2)]`.
    pub y: f64,
}

impl std::ops::Neg for SquareCoord {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// Project a unit vector onto the equal-area square.
///
/// The upper hemisphere (`z >= 0`) is northern; the returned flag is `true`
/// for it. The poles map to the square center.
///
/// # Example
///
/// ```
/// use gbcd_histogram::square_coord;
/// use nalgebra::Vector3;
///
/// let (sq, north) = square_coord(&Vector3::new(1.0, 0.0, 0.0));
/// assert!(north);
/// assert!((sq.x - std::f64::consts::FRAC_PI_2.sqrt()).abs() < 1e-12);
/// assert!(sq.y.abs() < 1e-12);
/// ```
#[must_use]
pub fn square_coord(v: &Vector3<f64>) -> (SquareCoord, bool) {
    let northern = v.z >= 0.0;
    let adjust = if northern { -1.0 } else { 1.0 };

    if v.x.abs().max(v.y.abs()) < f64::MIN_POSITIVE {
        return (SquareCoord { x: 0.0, y: 0.0 }, northern);
    }

    let r = (2.0 * (1.0 + v.z * adjust)).max(0.0).sqrt();
    let half_sqrt_pi = PI.sqrt() / 2.0;
    let two_over_sqrt_pi = 2.0 / PI.sqrt();

    let sq = if v.x.abs() >= v.y.abs() {
        let s = v.x.signum() * r;
        SquareCoord {
            x: s * half_sqrt_pi,
            y: s * two_over_sqrt_pi * (v.y / v.x).atan(),
        }
    } else {
        let s = v.y.signum() * r;
        SquareCoord {
            x: s * two_over_sqrt_pi * (v.x / v.y).atan(),
            y: s * half_sqrt_pi,
        }
    };

    (sq, northern)
}

/// Bin layout of a GBCD histogram.
///
/// # Example
///
/// ```
/// use gbcd_histogram::GbcdBinning;
///
/// let binning = GbcdBinning::from_resolution(9.0).unwrap();
/// assert_eq!(binning.sizes, [10, 10, 10, 20, 20]);
/// assert_eq!(binning.total_bins(), 10 * 10 * 10 * 20 * 20 * 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GbcdBinning {
    /// Bin width of each dimension.
    pub deltas: [f64; GBCD_DIMS],
    /// Lower limits in `[..5]`, upper limits in `[5..]`.
    pub limits: [f64; 2 * GBCD_DIMS],
    /// Number of bins along each dimension.
    pub sizes: [usize; GBCD_DIMS],
}

impl GbcdBinning {
    /// Size the histogram for a bin resolution in degrees.
    ///
    /// The Euler dimensions get bins of `resolution` degrees, the `cos(Phi)`
    /// dimension the matching fraction of `[0, 1]`, and the plane grid is
    /// squared up to `sqrt(s3 * s4)` bins per side.
    ///
    /// # Errors
    ///
    /// Returns [`GbcdError::InvalidResolution`] if `resolution` is not a
    /// positive finite number, is too coarse to give one bin per dimension,
    /// or is so fine that one phase would exceed [`MAX_GBCD_VALUES`].
    pub fn from_resolution(resolution: f64) -> GbcdResult<Self> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(GbcdError::invalid_resolution(resolution));
        }

        let binsize = resolution.to_radians();
        let binsize2 = binsize * (2.0 / PI);
        let mut deltas = [binsize, binsize2, binsize, binsize2, binsize];
        let mut limits = [0.0, 0.0, 0.0, 0.0, 0.0, FRAC_PI_2, 1.0, FRAC_PI_2, 1.0, TAU];

        let mut sizes = [0_usize; GBCD_DIMS];
        for (i, size) in sizes.iter_mut().enumerate() {
            *size = (0.5 + (limits[i + GBCD_DIMS] - limits[i]) / deltas[i]) as usize;
        }

        let side = ((sizes[3] * sizes[4]) as f64).sqrt() + 0.5;
        sizes[3] = side as usize;
        sizes[4] = sizes[3];

        if sizes.contains(&0) {
            return Err(GbcdError::invalid_resolution(resolution));
        }
        let values = sizes.iter().try_fold(2_usize, |acc, &s| acc.checked_mul(s));
        if values.is_none_or(|n| n > MAX_GBCD_VALUES) {
            return Err(GbcdError::invalid_resolution(resolution));
        }

        let half_side = FRAC_PI_2.sqrt();
        limits[3] = -half_side;
        limits[4] = -half_side;
        limits[8] = half_side;
        limits[9] = half_side;
        deltas[3] = 2.0 * half_side / sizes[3] as f64;
        deltas[4] = deltas[3];

        Ok(Self {
            deltas,
            limits,
            sizes,
        })
    }

    /// Histogram shape `[s0, s1, s2, s3, s4, 2]` for a resolution, without
    /// building anything.
    ///
    /// # Errors
    ///
    /// Same as [`from_resolution`](Self::from_resolution).
    pub fn output_shape(resolution: f64) -> GbcdResult<[usize; GBCD_DIMS + 1]> {
        Self::from_resolution(resolution).map(|b| b.shape())
    }

    /// Histogram shape `[s0, s1, s2, s3, s4, 2]`.
    #[must_use]
    pub const fn shape(&self) -> [usize; GBCD_DIMS + 1] {
        let s = self.sizes;
        [s[0], s[1], s[2], s[3], s[4], 2]
    }

    /// Number of five-dimensional bins.
    ///
    /// Saturates for hand-built layouts that [`from_resolution`](Self::from_resolution)
    /// would reject.
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.sizes.iter().fold(1_usize, |acc, &s| acc.saturating_mul(s))
    }

    /// Number of values per phase, including the hemisphere split.
    #[must_use]
    pub fn total_bins(&self) -> usize {
        self.num_bins().saturating_mul(2)
    }

    /// Flat bin index of a five-dimensional point.
    ///
    /// Returns `None` if any coordinate lies outside its limits. Points on an
    /// upper limit fall into the last bin.
    #[must_use]
    pub fn bin_index(&self, point: &[f64; GBCD_DIMS]) -> Option<usize> {
        let mut flat = 0;
        let mut stride = 1;
        for (i, &v) in point.iter().enumerate() {
            let (lo, hi) = (self.limits[i], self.limits[i + GBCD_DIMS]);
            if !(lo..=hi).contains(&v) {
                return None;
            }
            let index = (((v - lo) / self.deltas[i]) as usize).min(self.sizes[i] - 1);
            flat += stride * index;
            stride *= self.sizes[i];
        }
        Some(flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sizes_at_nine_degrees() {
        let b = GbcdBinning::from_resolution(9.0).expect("valid resolution");
        assert_eq!(b.sizes, [10, 10, 10, 20, 20]);
        assert_eq!(b.shape(), [10, 10, 10, 20, 20, 2]);
        assert_eq!(b.total_bins(), 800_000);
        assert_relative_eq!(b.deltas[0], 9.0_f64.to_radians(), epsilon = 1e-15);
        assert_relative_eq!(b.deltas[1], 0.1, epsilon = 1e-15);
        assert_relative_eq!(b.deltas[3], 2.0 * FRAC_PI_2.sqrt() / 20.0, epsilon = 1e-15);
        assert_relative_eq!(b.limits[9], FRAC_PI_2.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_output_shape_matches_binning() {
        for res in [3.0, 5.0, 7.5, 9.0, 15.0] {
            let shape = GbcdBinning::output_shape(res).expect("valid resolution");
            let b = GbcdBinning::from_resolution(res).expect("valid resolution");
            assert_eq!(shape, b.shape());
            assert_eq!(b.sizes[3], b.sizes[4]);
        }
    }

    #[test]
    fn test_invalid_resolution() {
        for res in [0.0, -1.0, f64::NAN, f64::INFINITY, 1000.0] {
            assert!(matches!(
                GbcdBinning::from_resolution(res),
                Err(GbcdError::InvalidResolution { .. })
            ));
        }
    }

    #[test]
    fn test_too_fine_resolution_is_rejected() {
        // 0.001 degrees would need ~1e26 values per phase.
        for res in [0.001, 0.01, 1e-300] {
            assert!(matches!(
                GbcdBinning::from_resolution(res),
                Err(GbcdError::InvalidResolution { .. })
            ));
        }
        // 2 degrees stays under the limit.
        let b = GbcdBinning::from_resolution(2.0).expect("2 degrees fits");
        assert!(b.total_bins() <= MAX_GBCD_VALUES);
    }

    #[test]
    fn test_hand_built_layout_saturates() {
        let mut b = GbcdBinning::from_resolution(9.0).expect("valid resolution");
        b.sizes = [90_000, 90_000, 90_000, 180_000, 180_000];
        assert_eq!(b.num_bins(), usize::MAX);
        assert_eq!(b.total_bins(), usize::MAX);
    }

    #[test]
    fn test_bin_index() {
        let b = GbcdBinning::from_resolution(9.0).expect("valid resolution");
        let h = FRAC_PI_2.sqrt();

        assert_eq!(b.bin_index(&[0.0, 0.0, 0.0, -h, -h]), Some(0));
        // Upper limits clamp into the last bin.
        assert_eq!(b.bin_index(&[FRAC_PI_2, 1.0, FRAC_PI_2, h, h]), Some(b.num_bins() - 1));
        // Second bin along each dimension.
        let d = b.deltas;
        assert_eq!(b.bin_index(&[1.5 * d[0], 0.0, 0.0, -h, -h]), Some(1));
        assert_eq!(b.bin_index(&[0.0, 1.5 * d[1], 0.0, -h, -h]), Some(10));
        assert_eq!(b.bin_index(&[0.0, 0.0, 0.0, -h, -h + 1.5 * d[4]]), Some(20_000));

        assert_eq!(b.bin_index(&[-0.01, 0.5, 0.5, 0.0, 0.0]), None);
        assert_eq!(b.bin_index(&[0.5, 1.01, 0.5, 0.0, 0.0]), None);
        assert_eq!(b.bin_index(&[0.5, 0.5, 0.5, 0.0, h + 0.01]), None);
        assert_eq!(b.bin_index(&[f64::NAN, 0.5, 0.5, 0.0, 0.0]), None);
    }

    #[test]
    fn test_square_coord_poles() {
        let (sq, north) = square_coord(&Vector3::z());
        assert!(north);
        assert_eq!(sq, SquareCoord { x: 0.0, y: 0.0 });

        let (sq, north) = square_coord(&-Vector3::z());
        assert!(!north);
        assert_eq!(sq, SquareCoord { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_square_coord_equator_reaches_edges() {
        let h = FRAC_PI_2.sqrt();
        let (sq, _) = square_coord(&Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(sq.y, -h, epsilon = 1e-12);
        assert_relative_eq!(sq.x, 0.0, epsilon = 1e-12);

        let v = Vector3::new(1.0, 1.0, 0.0).normalize();
        let (sq, _) = square_coord(&v);
        assert_relative_eq!(sq.x, h, epsilon = 1e-12);
        assert_relative_eq!(sq.y, h, epsilon = 1e-12);
    }

    #[test]
    fn test_square_coord_hemispheres_mirror() {
        let up = Vector3::new(0.3, -0.4, 0.5).normalize();
        let down = Vector3::new(up.x, up.y, -up.z);
        let (a, na) = square_coord(&up);
        let (b, nb) = square_coord(&down);
        assert!(na && !nb);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
    }

    #[test]
    fn test_square_coord_is_inside_square() {
        let h = FRAC_PI_2.sqrt();
        for i in 0..50 {
            let t = f64::from(i) * 0.37;
            let v = Vector3::new(t.cos(), t.sin(), (2.0 * t).sin()).normalize();
            let (sq, _) = square_coord(&v);
            assert!(sq.x.abs() <= h + 1e-12 && sq.y.abs() <= h + 1e-12);
        }
    }

    #[test]
    fn test_equal_area_scaling() {
        // A polar cap of colatitude t covers the area fraction (1 - cos t) of
        // the hemisphere; its image is a square of side r * sqrt(pi).
        let t: f64 = 0.3;
        let (sq, _) = square_coord(&Vector3::new(t.sin(), 0.0, t.cos()));
        let side = 2.0 * sq.x;
        let fraction = side * side / (2.0 * PI);
        assert_relative_eq!(fraction, 1.0 - t.cos(), epsilon = 1e-12);
    }
}
