//! Parameters for the metric-based GBCD.

use std::path::PathBuf;

use gbcd_rotation::AxisAngle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Misorientation and plane resolution pair, with the matching ball volume.
///
/// The ball volume is the volume of the resolution ball in the space of
/// boundaries for m-3m symmetry. It normalizes the probed area to multiples
/// of random distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Resolution {
    /// 3 degrees misorientation, 7 degrees plane.
    Misor3Plane7,
    /// 5 degrees misorientation, 5 degrees plane.
    Misor5Plane5,
    /// 5 degrees misorientation, 7 degrees plane.
    #[default]
    Misor5Plane7,
    /// 5 degrees misorientation, 8 degrees plane.
    Misor5Plane8,
    /// 6 degrees misorientation, 7 degrees plane.
    Misor6Plane7,
    /// 7 degrees misorientation, 7 degrees plane.
    Misor7Plane7,
    /// 8 degrees misorientation, 8 degrees plane.
    Misor8Plane8,
}

impl Resolution {
    /// All choices, in index order.
    pub const ALL: [Self; 7] = [
        Self::Misor3Plane7,
        Self::Misor5Plane5,
        Self::Misor5Plane7,
        Self::Misor5Plane8,
        Self::Misor6Plane7,
        Self::Misor7Plane7,
        Self::Misor8Plane8,
    ];

    /// Choice with the given index, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in [`Resolution::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Misorientation tolerance in degrees.
    #[must_use]
    pub const fn misorientation_degrees(self) -> f64 {
        match self {
            Self::Misor3Plane7 => 3.0,
            Self::Misor5Plane5 | Self::Misor5Plane7 | Self::Misor5Plane8 => 5.0,
            Self::Misor6Plane7 => 6.0,
            Self::Misor7Plane7 => 7.0,
            Self::Misor8Plane8 => 8.0,
        }
    }

    /// Plane tolerance in degrees.
    #[must_use]
    pub const fn plane_degrees(self) -> f64 {
        match self {
            Self::Misor5Plane5 => 5.0,
            Self::Misor3Plane7 | Self::Misor5Plane7 | Self::Misor6Plane7 | Self::Misor7Plane7 => 7.0,
            Self::Misor5Plane8 | Self::Misor8Plane8 => 8.0,
        }
    }

    /// Misorientation tolerance in radians.
    #[must_use]
    pub fn misorientation_radians(self) -> f64 {
        self.misorientation_degrees().to_radians()
    }

    /// Plane tolerance in radians.
    #[must_use]
    pub fn plane_radians(self) -> f64 {
        self.plane_degrees().to_radians()
    }

    /// Ball volume for m-3m symmetry.
    #[must_use]
    pub const fn ball_volume_m3m(self) -> f64 {
        match self {
            Self::Misor3Plane7 => 0.000_064_136_1,
            Self::Misor5Plane5 => 0.000_139_158,
            Self::Misor5Plane7 => 0.000_287_439,
            Self::Misor5Plane8 => 0.000_380_19,
            Self::Misor6Plane7 => 0.000_484_151,
            Self::Misor7Plane7 => 0.000_747_069,
            Self::Misor8Plane8 => 0.001_454_91,
        }
    }
}

/// Parameters for [`compute_metric_gbcd`](crate::compute_metric_gbcd).
///
/// # Example
///
/// ```
/// use gbcd_metric::{MetricParams, Resolution};
///
/// let params = MetricParams::default()
///     .output_files("out/dist.dat", "out/err.dat")
///     .sample_points(1000)
///     .resolution(Resolution::Misor7Plane7);
///
/// assert_eq!(params.phase_of_interest, 1);
/// assert!((params.misorientation_angle_degrees - 17.9).abs() < 1e-10);
/// assert_eq!(params.num_sample_points, 1000);
///
/// let twin = MetricParams::sigma3();
/// assert!((twin.misorientation_angle_degrees - 60.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetricParams {
    /// Phase whose boundaries are analysed. Must index the ensemble table
    /// and be at least 1.
    pub phase_of_interest: i32,

    /// Angle of the fixed misorientation in degrees, in `(0, 180]`.
    pub misorientation_angle_degrees: f64,

    /// Axis of the fixed misorientation as `[h, k, l]`; need not be unit.
    pub misorientation_axis: [f64; 3],

    /// Misorientation and plane tolerances.
    pub resolution: Resolution,

    /// Approximate number of sampling directions on the upper hemisphere.
    pub num_sample_points: usize,

    /// Skip triangles touching a triple line (requires node types).
    pub exclude_triple_lines: bool,

    /// Distribution output file. `.dat` and `_1` are appended as needed.
    pub dist_output_file: PathBuf,

    /// Distribution error output file. `.dat` and `_1` are appended as
    /// needed.
    pub err_output_file: PathBuf,

    /// Write errors as a percentage of the distribution value.
    pub save_relative_error: bool,

    /// Process chunks in parallel.
    pub parallel: bool,

    /// Triangles per selection chunk.
    pub select_chunk_size: usize,

    /// Sampling directions per probe chunk.
    pub probe_chunk_size: usize,
}

impl Default for MetricParams {
    fn default() -> Self {
        Self {
            phase_of_interest: 1,
            misorientation_angle_degrees: 17.9,
            misorientation_axis: [1.0, 1.0, 1.0],
            resolution: Resolution::Misor5Plane7,
            num_sample_points: 3000,
            exclude_triple_lines: false,
            dist_output_file: PathBuf::new(),
            err_output_file: PathBuf::new(),
            save_relative_error: false,
            parallel: true,
            select_chunk_size: 50_000,
            probe_chunk_size: 100,
        }
    }
}

impl MetricParams {
    /// Sigma 3 twin misorientation, 60 degrees about `[1 1 1]`.
    #[must_use]
    pub fn sigma3() -> Self {
        Self::default().misorientation(60.0, [1.0, 1.0, 1.0])
    }

    /// The fixed misorientation as an axis-angle pair.
    #[must_use]
    pub fn fixed_misorientation(&self) -> AxisAngle {
        AxisAngle::from_hkl_degrees(self.misorientation_axis, self.misorientation_angle_degrees)
    }

    /// Set the phase of interest.
    #[must_use]
    pub const fn phase(mut self, phase: i32) -> Self {
        self.phase_of_interest = phase;
        self
    }

    /// Set the fixed misorientation from an angle in degrees and an
    /// `[h, k, l]` axis.
    #[must_use]
    pub const fn misorientation(mut self, angle_degrees: f64, axis: [f64; 3]) -> Self {
        self.misorientation_angle_degrees = angle_degrees;
        self.misorientation_axis = axis;
        self
    }

    /// Set the resolution pair.
    #[must_use]
    pub const fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the number of sampling points.
    #[must_use]
    pub const fn sample_points(mut self, count: usize) -> Self {
        self.num_sample_points = count;
        self
    }

    /// Enable or disable triple line exclusion.
    #[must_use]
    pub const fn exclude_triple_lines(mut self, exclude: bool) -> Self {
        self.exclude_triple_lines = exclude;
        self
    }

    /// Set both output files.
    #[must_use]
    pub fn output_files(mut self, dist: impl Into<PathBuf>, err: impl Into<PathBuf>) -> Self {
        self.dist_output_file = dist.into();
        self.err_output_file = err.into();
        self
    }

    /// Write relative instead of absolute errors.
    #[must_use]
    pub const fn save_relative_error(mut self, relative: bool) -> Self {
        self.save_relative_error = relative;
        self
    }

    /// Enable or disable parallel processing.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the selection and probe chunk sizes.
    #[must_use]
    pub const fn chunk_sizes(mut self, select: usize, probe: usize) -> Self {
        self.select_chunk_size = select;
        self.probe_chunk_size = probe;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_params() {
        let params = MetricParams::default();
        assert_eq!(params.phase_of_interest, 1);
        assert_eq!(params.resolution, Resolution::Misor5Plane7);
        assert_eq!(params.resolution.index(), 2);
        assert_eq!(params.num_sample_points, 3000);
        assert!(!params.exclude_triple_lines);
        assert!(!params.save_relative_error);
        assert_eq!(params.select_chunk_size, 50_000);
        assert_eq!(params.probe_chunk_size, 100);
    }

    #[test]
    fn test_resolution_table() {
        let degrees: Vec<(f64, f64)> = Resolution::ALL
            .iter()
            .map(|r| (r.misorientation_degrees(), r.plane_degrees()))
            .collect();
        assert_eq!(
            degrees,
            vec![(3.0, 7.0), (5.0, 5.0), (5.0, 7.0), (5.0, 8.0), (6.0, 7.0), (7.0, 7.0), (8.0, 8.0)]
        );
        for (i, r) in Resolution::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
            assert_eq!(Resolution::from_index(i), Some(*r));
        }
        assert_eq!(Resolution::from_index(7), None);

        // Volumes grow with the tolerances.
        let volumes: Vec<f64> = Resolution::ALL.iter().map(|r| r.ball_volume_m3m()).collect();
        assert!(volumes.windows(2).all(|w| w[0] < w[1]));
        assert_relative_eq!(Resolution::Misor5Plane7.plane_radians(), 7.0_f64.to_radians());
    }

    #[test]
    fn test_builder_pattern() {
        let params = MetricParams::default()
            .phase(2)
            .misorientation(38.9, [1.0, 1.0, 0.0])
            .exclude_triple_lines(true)
            .save_relative_error(true)
            .parallel(false)
            .chunk_sizes(10, 5)
            .output_files("a.dat", "b.dat");
        assert_eq!(params.phase_of_interest, 2);
        assert_eq!(params.misorientation_axis, [1.0, 1.0, 0.0]);
        assert!(params.exclude_triple_lines);
        assert!(params.save_relative_error);
        assert!(!params.parallel);
        assert_eq!((params.select_chunk_size, params.probe_chunk_size), (10, 5));
        assert_eq!(params.dist_output_file, PathBuf::from("a.dat"));
    }

    #[test]
    fn test_fixed_misorientation() {
        let aa = MetricParams::sigma3().fixed_misorientation();
        assert_relative_eq!(aa.angle_degrees(), 60.0, epsilon = 1e-10);
        assert_relative_eq!(aa.axis.x, 1.0 / 3.0_f64.sqrt(), epsilon = 1e-12);
    }
}
