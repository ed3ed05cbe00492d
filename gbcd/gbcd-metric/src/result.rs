//! Metric-based GBCD result.

use std::path::PathBuf;

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::validate::MetricWarning;

/// Boundary plane distribution at a fixed misorientation.
///
/// `distribution[i]` and `errors[i]` belong to `sample_points[i]`, a unit
/// boundary normal in the first grain's crystal frame. Values are multiples
/// of random distribution; errors are absolute.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetricGbcd {
    /// Sampling directions on the upper hemisphere.
    pub sample_points: Vec<Vector3<f64>>,
    /// Distribution value per sampling direction.
    pub distribution: Vec<f64>,
    /// Absolute error per sampling direction.
    pub errors: Vec<f64>,
    /// Triangles of the phase of interest that passed the label checks.
    pub included_triangles: usize,
    /// Included triangles with at least one view within the
    /// misorientation tolerance.
    pub matched_triangles: usize,
    /// Symmetric views within the misorientation tolerance.
    pub selected_triangles: usize,
    /// Summed area of the included triangles.
    pub included_area: f64,
    /// Distinct boundaries of the phase of interest.
    pub distinct_boundaries: usize,
    /// Ball volume after the symmetry correction.
    pub ball_volume: f64,
    /// Validation warnings raised for this run.
    pub warnings: Vec<MetricWarning>,
    /// Distribution file written.
    pub dist_output_file: PathBuf,
    /// Error file written.
    pub err_output_file: PathBuf,
}

impl MetricGbcd {
    /// Number of sampling directions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sample_points.len()
    }

    /// True if there are no sampling directions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sample_points.is_empty()
    }

    /// Largest distribution value and its direction.
    #[must_use]
    pub fn peak(&self) -> Option<(Vector3<f64>, f64)> {
        self.sample_points
            .iter()
            .zip(&self.distribution)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(p, v)| (*p, *v))
    }

    /// Error relative to the distribution value, in percent.
    #[must_use]
    pub fn relative_error(&self, index: usize) -> Option<f64> {
        Some(relative_error_percent(
            *self.distribution.get(index)?,
            *self.errors.get(index)?,
        ))
    }
}

/// `100 * error / value`, capped at 100; values near zero report 100.
#[must_use]
pub fn relative_error_percent(value: f64, error: f64) -> f64 {
    if value > 1e-10 {
        (100.0 * error / value).min(100.0)
    } else {
        100.0
    }
}

impl std::fmt::Display for MetricGbcd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Metric-based GBCD:")?;
        writeln!(f, "  Sampling points: {}", self.len())?;
        writeln!(f, "  Included triangles: {}", self.included_triangles)?;
        writeln!(f, "  Matched triangles: {}", self.matched_triangles)?;
        writeln!(f, "  Selected views: {}", self.selected_triangles)?;
        writeln!(f, "  Included area: {:.3}", self.included_area)?;
        writeln!(f, "  Distinct boundaries: {}", self.distinct_boundaries)?;
        writeln!(f, "  Ball volume: {:.6e}", self.ball_volume)?;
        if let Some((p, v)) = self.peak() {
            writeln!(f, "  Peak: {v:.3} MRD at ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)?;
        }
        for w in &self.warnings {
            writeln!(f, "  Warning {}: {w}", w.code())?;
        }
        Ok(())
    }
}
