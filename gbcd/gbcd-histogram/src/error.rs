//! Error types for GBCD histogram computation.

use gbcd_symmetry::SymmetryError;
use gbcd_types::{Cancelled, MeshDataError};
use thiserror::Error;

/// Result type alias for GBCD operations.
pub type GbcdResult<T> = Result<T, GbcdError>;

/// Errors that can occur while sizing or accumulating a GBCD.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GbcdError {
    /// The bin resolution does not produce a usable grid.
    #[error("invalid GBCD resolution {resolution} degrees")]
    InvalidResolution {
        /// Requested resolution in degrees.
        resolution: f64,
    },

    /// The histogram over all phases would exceed
    /// [`MAX_GBCD_VALUES`](crate::MAX_GBCD_VALUES).
    #[error("GBCD of {num_phases} phases x {bins_per_phase} values is too large")]
    HistogramTooLarge {
        /// Number of phases requested.
        num_phases: usize,
        /// Values per phase.
        bins_per_phase: usize,
    },

    /// A phase has no block in the histogram.
    #[error("phase {phase} is not in a GBCD of {num_phases} phases")]
    InvalidPhase {
        /// Requested phase.
        phase: usize,
        /// Number of phases in the histogram.
        num_phases: usize,
    },

    /// Mesh or feature arrays are inconsistent.
    #[error("invalid mesh data: {0}")]
    MeshData(#[from] MeshDataError),

    /// A phase in use has a crystal structure index with no Laue class.
    #[error("phase {phase}: {source}")]
    UnknownCrystalStructure {
        /// Phase whose crystal structure is unknown.
        phase: usize,
        /// Underlying lookup failure.
        source: SymmetryError,
    },

    /// The run was cancelled.
    #[error("GBCD computation cancelled")]
    Cancelled,
}

impl GbcdError {
    /// Create an invalid resolution error.
    #[must_use]
    pub const fn invalid_resolution(resolution: f64) -> Self {
        Self::InvalidResolution { resolution }
    }

    /// Create an unknown crystal structure error.
    #[must_use]
    pub const fn unknown_crystal_structure(phase: usize, source: SymmetryError) -> Self {
        Self::UnknownCrystalStructure { phase, source }
    }

    /// Stable numeric code of the error, for host pipelines.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidResolution { .. } | Self::HistogramTooLarge { .. } => -1,
            Self::MeshData(_) => -2,
            Self::UnknownCrystalStructure { .. } => -3,
            Self::InvalidPhase { .. } => -4,
            Self::Cancelled => 0,
        }
    }
}

impl From<Cancelled> for GbcdError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}
