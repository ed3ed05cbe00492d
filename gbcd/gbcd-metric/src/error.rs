//! Error types for the metric-based GBCD.

use std::io;
use std::path::{Path, PathBuf};

use gbcd_types::{Cancelled, MeshDataError};
use thiserror::Error;

use crate::validate::ValidationError;

/// Result type alias for metric-based GBCD operations.
pub type MetricResult<T> = Result<T, MetricError>;

/// Errors that can occur while computing or writing a metric-based GBCD.
#[derive(Debug, Error)]
pub enum MetricError {
    /// Preflight validation failed; nothing was computed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Mesh or feature arrays are inconsistent.
    #[error("invalid mesh data: {0}")]
    MeshData(#[from] MeshDataError),

    /// An output directory or file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The run was cancelled; no files were written.
    #[error("metric-based GBCD computation cancelled")]
    Cancelled,
}

impl MetricError {
    /// Create an I/O error for `path`.
    #[must_use]
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable numeric code of the error, for host pipelines.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Validation(e) => e.code(),
            Self::MeshData(_) => -2,
            Self::Io { .. } => -1,
            Self::Cancelled => 0,
        }
    }
}

impl From<Cancelled> for MetricError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}
