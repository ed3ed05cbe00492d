//! Error types for mesh and feature consistency checks.

use thiserror::Error;

/// Result type alias for mesh data checks.
pub type MeshDataResult<T> = Result<T, MeshDataError>;

/// Inconsistencies between a boundary mesh and the feature data it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshDataError {
    /// A per-face or per-vertex array has the wrong length.
    #[error("{array} has {got} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the offending array.
        array: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// A face refers to a vertex that does not exist.
    #[error("face {face} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        /// Face index.
        face: usize,
        /// Offending vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A face label is not a valid feature index.
    #[error("face {face} has label {label}, but only {num_features} features exist")]
    LabelOutOfRange {
        /// Face index.
        face: usize,
        /// Offending label.
        label: i32,
        /// Number of features (including the unused slot 0).
        num_features: usize,
    },

    /// A feature's phase is not a valid ensemble index.
    #[error("feature {feature} has phase {phase}, but only {num_phases} phases exist")]
    PhaseOutOfRange {
        /// Feature index.
        feature: usize,
        /// Offending phase.
        phase: i32,
        /// Number of phases (including the unused slot 0).
        num_phases: usize,
    },

    /// Triple line exclusion was requested on a mesh without node types.
    #[error("node types are required to exclude triple lines")]
    MissingNodeTypes,
}

impl MeshDataError {
    /// Create a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(array: &'static str, expected: usize, got: usize) -> Self {
        Self::LengthMismatch {
            array,
            expected,
            got,
        }
    }

    /// Create a label out of range error.
    #[must_use]
    pub const fn label_out_of_range(face: usize, label: i32, num_features: usize) -> Self {
        Self::LabelOutOfRange {
            face,
            label,
            num_features,
        }
    }

    /// Create a phase out of range error.
    #[must_use]
    pub const fn phase_out_of_range(feature: usize, phase: i32, num_phases: usize) -> Self {
        Self::PhaseOutOfRange {
            feature,
            phase,
            num_phases,
        }
    }
}
