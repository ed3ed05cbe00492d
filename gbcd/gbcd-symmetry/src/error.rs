//! Error types for symmetry lookups.

use thiserror::Error;

/// Result type alias for symmetry operations.
pub type SymmetryResult<T> = Result<T, SymmetryError>;

/// Errors that can occur when resolving a crystal structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymmetryError {
    /// The crystal structure index does not name a known Laue class.
    #[error("unknown Laue class index {index} (expected 0..=10)")]
    UnknownLaueClass {
        /// The offending index.
        index: u32,
    },
}

impl SymmetryError {
    /// Create an unknown Laue class error.
    #[must_use]
    pub const fn unknown_laue_class(index: u32) -> Self {
        Self::UnknownLaueClass { index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SymmetryError::unknown_laue_class(999);
        assert!(format!("{err}").contains("999"));
    }
}
