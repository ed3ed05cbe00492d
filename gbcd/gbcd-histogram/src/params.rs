//! Parameters for GBCD histogram computation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`compute_gbcd`](crate::compute_gbcd).
///
/// # Example
///
/// ```
/// use gbcd_histogram::GbcdParams;
///
/// // 9 degree bins, parallel, 50000 triangles per chunk
/// let params = GbcdParams::default();
/// assert!((params.resolution_degrees - 9.0).abs() < 1e-10);
///
/// let fine = GbcdParams::fine();
/// assert!(fine.resolution_degrees < params.resolution_degrees);
///
/// let serial = GbcdParams::default().parallel(false).chunk_size(1000);
/// assert!(!serial.parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GbcdParams {
    /// Bin width in degrees for the Euler angle dimensions. The cosine and
    /// boundary plane dimensions are sized from it.
    pub resolution_degrees: f64,

    /// Number of triangles processed between cancellation checks.
    pub chunk_size: usize,

    /// Process the triangles of each chunk in parallel.
    pub parallel: bool,
}

impl Default for GbcdParams {
    fn default() -> Self {
        Self {
            resolution_degrees: 9.0,
            chunk_size: 50_000,
            parallel: true,
        }
    }
}

impl GbcdParams {
    /// 5 degree bins, for large meshes with many boundaries.
    #[must_use]
    pub const fn fine() -> Self {
        Self {
            resolution_degrees: 5.0,
            chunk_size: 50_000,
            parallel: true,
        }
    }

    /// 15 degree bins, for small meshes where finer bins stay mostly empty.
    #[must_use]
    pub const fn coarse() -> Self {
        Self {
            resolution_degrees: 15.0,
            chunk_size: 50_000,
            parallel: true,
        }
    }

    /// Set the bin resolution in degrees.
    #[must_use]
    pub const fn resolution(mut self, degrees: f64) -> Self {
        self.resolution_degrees = degrees;
        self
    }

    /// Set the number of triangles per chunk.
    #[must_use]
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Enable or disable parallel processing.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
