//! Preflight validation and output path resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use gbcd_symmetry::{LaueClass, SymmetryError};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::params::MetricParams;

/// Sample counts above this raise [`MetricWarning::ManySamplePoints`].
pub const SAMPLE_POINTS_WARNING_LIMIT: usize = 5000;

/// A parameter set that cannot be run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Misorientation angle outside `(0, 180]` degrees.
    #[error("misorientation angle {angle} is outside (0, 180] degrees")]
    InvalidAngle {
        /// Requested angle in degrees.
        angle: f64,
    },

    /// All three axis indices are zero.
    #[error("all three indices of the misorientation axis are 0")]
    ZeroAxis,

    /// No sampling points requested.
    #[error("the number of sampling points must be greater than zero")]
    NoSamplePoints,

    /// Distribution output path not set.
    #[error("the distribution output file must be set")]
    MissingDistOutput,

    /// Error output path not set.
    #[error("the distribution errors output file must be set")]
    MissingErrOutput,

    /// Both outputs resolve to the same file.
    #[error("the output files must be different, both resolve to {}", .path.display())]
    SameOutputFiles {
        /// The shared resolved path.
        path: PathBuf,
    },

    /// Phase of interest is not an ensemble index of at least 1.
    #[error("phase {phase} is not in 1..{num_phases}")]
    InvalidPhase {
        /// Requested phase.
        phase: i32,
        /// Number of ensembles, including phase 0.
        num_phases: usize,
    },

    /// The phase of interest has an unknown crystal structure.
    #[error("phase {phase}: {source}")]
    Symmetry {
        /// Phase of interest.
        phase: usize,
        /// Underlying lookup failure.
        source: SymmetryError,
    },
}

impl ValidationError {
    /// Stable numeric code of the error.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidAngle { .. } => -1000,
            Self::ZeroAxis => -1001,
            Self::NoSamplePoints => -1002,
            Self::MissingDistOutput => -1004,
            Self::MissingErrOutput => -1005,
            Self::SameOutputFiles { .. } => -1008,
            Self::InvalidPhase { .. } => -1009,
            Self::Symmetry { .. } => -1010,
        }
    }
}

/// A parameter set that runs but deserves attention.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetricWarning {
    /// More sampling points than are likely to be useful.
    ManySamplePoints {
        /// Requested count.
        count: usize,
    },
    /// The distribution file's directory is missing and will be created.
    MissingDistDirectory {
        /// Missing directory.
        path: PathBuf,
    },
    /// The error file's directory is missing and will be created.
    MissingErrDirectory {
        /// Missing directory.
        path: PathBuf,
    },
}

impl MetricWarning {
    /// Stable numeric code of the warning.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::ManySamplePoints { .. } => -1003,
            Self::MissingDistDirectory { .. } => -1006,
            Self::MissingErrDirectory { .. } => -1007,
        }
    }
}

impl fmt::Display for MetricWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManySamplePoints { count } => write!(
                f,
                "{count} sampling points requested; more than {SAMPLE_POINTS_WARNING_LIMIT} are unlikely to be needed"
            ),
            Self::MissingDistDirectory { path } => write!(
                f,
                "distribution output directory {} does not exist and will be created",
                path.display()
            ),
            Self::MissingErrDirectory { path } => write!(
                f,
                "error output directory {} does not exist and will be created",
                path.display()
            ),
        }
    }
}

/// Outcome of a successful preflight.
#[derive(Debug, Clone, PartialEq)]
pub struct Preflight {
    /// Laue class of the phase of interest.
    pub class: LaueClass,
    /// Phase of interest as an index.
    pub phase: usize,
    /// Resolved distribution output file.
    pub dist_output_file: PathBuf,
    /// Resolved error output file.
    pub err_output_file: PathBuf,
    /// Non-fatal findings.
    pub warnings: Vec<MetricWarning>,
}

/// Resolve an output path the way downstream plotting scripts expect it.
///
/// A missing extension becomes `.dat`, and the file stem gets a `_1`
/// suffix unless it already ends with one.
///
/// # Example
///
/// ```
/// use gbcd_metric::resolve_output_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_output_path(Path::new("out/dist")), PathBuf::from("out/dist_1.dat"));
/// assert_eq!(resolve_output_path(Path::new("out/dist.txt")), PathBuf::from("out/dist_1.txt"));
/// assert_eq!(resolve_output_path(Path::new("dist_1.dat")), PathBuf::from("dist_1.dat"));
/// ```
#[must_use]
pub fn resolve_output_path(path: &Path) -> PathBuf {
    let mut resolved = path.to_path_buf();
    if resolved.extension().is_none() {
        resolved.set_extension("dat");
    }
    let Some(stem) = resolved.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
        return resolved;
    };
    if stem.ends_with("_1") {
        return resolved;
    }
    let name = match resolved.extension() {
        Some(ext) => format!("{stem}_1.{}", ext.to_string_lossy()),
        None => format!("{stem}_1"),
    };
    resolved.set_file_name(name);
    resolved
}

/// Parent directory of `path` if it is named and missing.
fn missing_parent(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
        .map(Path::to_path_buf)
}

/// Check `params` against the ensemble table and resolve output paths.
///
/// Checks run in a fixed order and the first failure is returned.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failed check.
///
/// # Example
///
/// ```
/// use gbcd_metric::{MetricParams, validate};
///
/// let params = MetricParams::default().output_files("dist", "err");
/// let preflight = validate(&params, &[0, 1]).unwrap();
/// assert_eq!(preflight.dist_output_file.to_str(), Some("dist_1.dat"));
///
/// let bad = params.clone().phase(0);
/// assert_eq!(validate(&bad, &[0, 1]).unwrap_err().code(), -1009);
/// ```
pub fn validate(params: &MetricParams, crystal_structures: &[u32]) -> Result<Preflight, ValidationError> {
    let angle = params.misorientation_angle_degrees;
    if !(angle > 0.0 && angle <= 180.0) {
        return Err(ValidationError::InvalidAngle { angle });
    }
    if params.misorientation_axis.iter().all(|c| c.abs() < f64::EPSILON) {
        return Err(ValidationError::ZeroAxis);
    }
    if params.num_sample_points < 1 {
        return Err(ValidationError::NoSamplePoints);
    }

    let mut warnings = Vec::new();
    if params.num_sample_points > SAMPLE_POINTS_WARNING_LIMIT {
        warnings.push(MetricWarning::ManySamplePoints {
            count: params.num_sample_points,
        });
    }

    if params.dist_output_file.as_os_str().is_empty() {
        return Err(ValidationError::MissingDistOutput);
    }
    if params.err_output_file.as_os_str().is_empty() {
        return Err(ValidationError::MissingErrOutput);
    }
    if let Some(path) = missing_parent(&params.dist_output_file) {
        warnings.push(MetricWarning::MissingDistDirectory { path });
    }
    if let Some(path) = missing_parent(&params.err_output_file) {
        warnings.push(MetricWarning::MissingErrDirectory { path });
    }

    let dist_output_file = resolve_output_path(&params.dist_output_file);
    let err_output_file = resolve_output_path(&params.err_output_file);
    if dist_output_file == err_output_file {
        return Err(ValidationError::SameOutputFiles {
            path: dist_output_file,
        });
    }

    let num_phases = crystal_structures.len();
    let phase = usize::try_from(params.phase_of_interest)
        .ok()
        .filter(|&p| p > 0 && p < num_phases)
        .ok_or(ValidationError::InvalidPhase {
            phase: params.phase_of_interest,
            num_phases,
        })?;
    let class = LaueClass::from_index(crystal_structures[phase])
        .map_err(|source| ValidationError::Symmetry { phase, source })?;

    Ok(Preflight {
        class,
        phase,
        dist_output_file,
        err_output_file,
        warnings,
    })
}
