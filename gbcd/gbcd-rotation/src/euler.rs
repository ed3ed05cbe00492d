//! Bunge Euler angles.

use nalgebra::{Matrix3, UnitQuaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::convert::{euler_to_matrix, euler_to_quaternion};

/// Bunge (ZXZ) Euler angles in radians.
///
/// The canonical ranges are `phi1 in [0, 2pi)`, `phi in [0, pi]` and
/// `phi2 in [0, 2pi)`. Values outside these ranges are accepted by every
/// conversion; [`crate::matrix_to_euler`] always returns canonical values.
///
/// # Example
///
/// ```
/// use gbcd_rotation::EulerAngles;
///
/// let e = EulerAngles::from_degrees(90.0, 0.0, 0.0);
/// assert!((e.phi1 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerAngles {
    /// First rotation about Z.
    pub phi1: f64,
    /// Rotation about the rotated X axis.
    pub phi: f64,
    /// Second rotation about the rotated Z axis.
    pub phi2: f64,
}

impl EulerAngles {
    /// Create Euler angles from radians.
    #[inline]
    #[must_use]
    pub const fn new(phi1: f64, phi: f64, phi2: f64) -> Self {
        Self { phi1, phi, phi2 }
    }

    /// Create Euler angles from degrees.
    #[inline]
    #[must_use]
    pub fn from_degrees(phi1: f64, phi: f64, phi2: f64) -> Self {
        Self {
            phi1: phi1.to_radians(),
            phi: phi.to_radians(),
            phi2: phi2.to_radians(),
        }
    }

    /// Create Euler angles from a `[phi1, Phi, phi2]` array in radians.
    #[inline]
    #[must_use]
    pub const fn from_array(angles: [f64; 3]) -> Self {
        Self {
            phi1: angles[0],
            phi: angles[1],
            phi2: angles[2],
        }
    }

    /// The angles as a `[phi1, Phi, phi2]` array in radians.
    #[inline]
    #[must_use]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.phi1, self.phi, self.phi2]
    }

    /// The angles as a `[phi1, Phi, phi2]` array in degrees.
    #[inline]
    #[must_use]
    pub fn to_degrees(&self) -> [f64; 3] {
        [
            self.phi1.to_degrees(),
            self.phi.to_degrees(),
            self.phi2.to_degrees(),
        ]
    }

    /// Passive orientation matrix for these angles.
    #[inline]
    #[must_use]
    pub fn to_matrix(&self) -> Matrix3<f64> {
        euler_to_matrix(self)
    }

    /// Unit quaternion for these angles (scalar part non-negative).
    #[inline]
    #[must_use]
    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        euler_to_quaternion(self)
    }

    /// Whether all three angles are strictly below `limit`.
    #[inline]
    #[must_use]
    pub fn all_below(&self, limit: f64) -> bool {
        self.phi1 < limit && self.phi < limit && self.phi2 < limit
    }
}

impl From<[f64; 3]> for EulerAngles {
    fn from(angles: [f64; 3]) -> Self {
        Self::from_array(angles)
    }
}

impl From<[f32; 3]> for EulerAngles {
    fn from(angles: [f32; 3]) -> Self {
        Self::new(
            f64::from(angles[0]),
            f64::from(angles[1]),
            f64::from(angles[2]),
        )
    }
}
