//! Axis-angle representation.

use nalgebra::{Matrix3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::convert::{axis_angle_to_matrix, axis_angle_to_quaternion};

/// A rotation of `angle` radians about a unit `axis`.
///
/// The zero rotation is reported with the conventional axis `[0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisAngle {
    /// Unit rotation axis.
    pub axis: Vector3<f64>,
    /// Rotation angle in radians.
    pub angle: f64,
}

impl AxisAngle {
    /// Create an axis-angle pair. The axis is normalized; a zero axis yields
    /// the identity rotation.
    ///
    /// # Example
    ///
    /// ```
    /// use gbcd_rotation::{AxisAngle, Vector3};
    ///
    /// let aa = AxisAngle::new(Vector3::new(0.0, 0.0, 2.0), 0.5);
    /// assert!((aa.axis.norm() - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn new(axis: Vector3<f64>, angle: f64) -> Self {
        let norm = axis.norm();
        if norm > f64::EPSILON {
            Self {
                axis: axis / norm,
                angle,
            }
        } else {
            Self::identity()
        }
    }

    /// Create an axis-angle pair from Miller-style indices and an angle in
    /// degrees, e.g. `60` degrees about `[1 1 1]`.
    #[must_use]
    pub fn from_hkl_degrees(hkl: [f64; 3], angle_degrees: f64) -> Self {
        Self::new(
            Vector3::new(hkl[0], hkl[1], hkl[2]),
            angle_degrees.to_radians(),
        )
    }

    /// The identity rotation.
    #[inline]
    #[must_use]
    pub fn identity() -> Self {
        Self {
            axis: Vector3::z(),
            angle: 0.0,
        }
    }

    /// Rotation angle in degrees.
    #[inline]
    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    /// Rotation matrix of this axis-angle pair.
    #[inline]
    #[must_use]
    pub fn to_matrix(&self) -> Matrix3<f64> {
        axis_angle_to_matrix(&self.axis, self.angle)
    }

    /// Unit quaternion of this axis-angle pair.
    #[inline]
    #[must_use]
    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        axis_angle_to_quaternion(&self.axis, self.angle)
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_axis_is_identity() {
        let aa = AxisAngle::new(Vector3::zeros(), 1.0);
        assert_eq!(aa, AxisAngle::identity());
        assert!((aa.to_matrix() - Matrix3::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_hkl_degrees() {
        let aa = AxisAngle::from_hkl_degrees([1.0, 1.0, 1.0], 60.0);
        let expected = 1.0 / 3.0_f64.sqrt();
        assert!((aa.axis.x - expected).abs() < 1e-12);
        assert!((aa.angle_degrees() - 60.0).abs() < 1e-10);
    }
}
