//! Laue class enumeration.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SymmetryError, SymmetryResult};
use crate::tables::{SymmetryOps, symmetry_table};

/// The eleven Laue classes.
///
/// The discriminants are the crystal structure indices stored in ensemble
/// data, so `LaueClass::CubicHigh as u32 == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LaueClass {
    /// Hexagonal 6/mmm.
    HexagonalHigh = 0,
    /// Cubic m-3m.
    CubicHigh = 1,
    /// Hexagonal 6/m.
    HexagonalLow = 2,
    /// Cubic m-3.
    CubicLow = 3,
    /// Triclinic -1.
    Triclinic = 4,
    /// Monoclinic 2/m.
    Monoclinic = 5,
    /// Orthorhombic mmm.
    OrthoRhombic = 6,
    /// Tetragonal 4/m.
    TetragonalLow = 7,
    /// Tetragonal 4/mmm.
    TetragonalHigh = 8,
    /// Trigonal -3.
    TrigonalLow = 9,
    /// Trigonal -3m.
    TrigonalHigh = 10,
}

impl LaueClass {
    /// Every Laue class in index order.
    pub const ALL: [Self; 11] = [
        Self::HexagonalHigh,
        Self::CubicHigh,
        Self::HexagonalLow,
        Self::CubicLow,
        Self::Triclinic,
        Self::Monoclinic,
        Self::OrthoRhombic,
        Self::TetragonalLow,
        Self::TetragonalHigh,
        Self::TrigonalLow,
        Self::TrigonalHigh,
    ];

    /// Resolve a crystal structure index.
    ///
    /// # Errors
    ///
    /// Returns [`SymmetryError::UnknownLaueClass`] for indices above 10.
    ///
    /// # Example
    ///
    /// ```
    /// use gbcd_symmetry::LaueClass;
    ///
    /// assert_eq!(LaueClass::from_index(1).unwrap(), LaueClass::CubicHigh);
    /// assert!(LaueClass::from_index(42).is_err());
    /// ```
    pub fn from_index(index: u32) -> SymmetryResult<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| SymmetryError::unknown_laue_class(index))
    }

    /// Crystal structure index of this class.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human readable name with Hermann-Mauguin symbol.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HexagonalHigh => "Hexagonal-High 6/mmm",
            Self::CubicHigh => "Cubic-High m-3m",
            Self::HexagonalLow => "Hexagonal-Low 6/m",
            Self::CubicLow => "Cubic-Low m-3",
            Self::Triclinic => "Triclinic -1",
            Self::Monoclinic => "Monoclinic 2/m",
            Self::OrthoRhombic => "OrthoRhombic mmm",
            Self::TetragonalLow => "Tetragonal-Low 4/m",
            Self::TetragonalHigh => "Tetragonal-High 4/mmm",
            Self::TrigonalLow => "Trigonal-Low -3",
            Self::TrigonalHigh => "Trigonal-High -3m",
        }
    }

    /// Number of proper rotations in the class.
    #[must_use]
    pub const fn num_sym_ops(self) -> usize {
        match self {
            Self::CubicHigh => 24,
            Self::HexagonalHigh | Self::CubicLow => 12,
            Self::TetragonalHigh => 8,
            Self::HexagonalLow | Self::TrigonalHigh => 6,
            Self::OrthoRhombic | Self::TetragonalLow => 4,
            Self::TrigonalLow => 3,
            Self::Monoclinic => 2,
            Self::Triclinic => 1,
        }
    }

    /// Static operator table for this class.
    #[inline]
    #[must_use]
    pub fn symmetry_ops(self) -> &'static SymmetryOps {
        symmetry_table(self)
    }
}

impl TryFrom<u32> for LaueClass {
    type Error = SymmetryError;

    fn try_from(index: u32) -> SymmetryResult<Self> {
        Self::from_index(index)
    }
}

impl fmt::Display for LaueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
