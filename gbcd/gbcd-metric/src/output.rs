//! Text output for plotting.
//!
//! Both files start with `h k l angle` and then hold one
//! `azimuth elevation value` line per sampling direction, angles in
//! degrees with the elevation measured from the equator.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use nalgebra::Vector3;

use crate::error::{MetricError, MetricResult};
use crate::params::MetricParams;
use crate::result::{MetricGbcd, relative_error_percent};

/// Azimuth and elevation of a unit direction, in degrees.
#[must_use]
pub fn plot_coordinates(direction: &Vector3<f64>) -> (f64, f64) {
    let azimuth = direction.y.atan2(direction.x).to_degrees();
    let zenith = gbcd_rotation::clamp_unit(direction.z).acos().to_degrees();
    (azimuth, 90.0 - zenith)
}

fn write_header(w: &mut impl Write, params: &MetricParams) -> io::Result<()> {
    let [h, k, l] = params.misorientation_axis;
    writeln!(
        w,
        "{h:.1} {k:.1} {l:.1} {:.1}",
        params.misorientation_angle_degrees
    )
}

/// Write the distribution table.
///
/// # Errors
///
/// Returns any error of the underlying writer.
pub fn write_distribution(w: &mut impl Write, result: &MetricGbcd, params: &MetricParams) -> io::Result<()> {
    write_header(w, params)?;
    for (p, value) in result.sample_points.iter().zip(&result.distribution) {
        let (azimuth, elevation) = plot_coordinates(p);
        writeln!(w, "{azimuth:.2} {elevation:.2} {value:.4}")?;
    }
    Ok(())
}

/// Write the error table, absolute or relative per
/// [`MetricParams::save_relative_error`].
///
/// # Errors
///
/// Returns any error of the underlying writer.
pub fn write_errors(w: &mut impl Write, result: &MetricGbcd, params: &MetricParams) -> io::Result<()> {
    write_header(w, params)?;
    let rows = result.sample_points.iter().zip(&result.distribution).zip(&result.errors);
    for ((p, &value), &error) in rows {
        let (azimuth, elevation) = plot_coordinates(p);
        if params.save_relative_error {
            let relative = relative_error_percent(value, error);
            writeln!(w, "{azimuth:.2} {elevation:.2} {relative:.2}")?;
        } else {
            writeln!(w, "{azimuth:.2} {elevation:.2} {error:.4}")?;
        }
    }
    Ok(())
}

/// Create `path` (and its parent directories) and fill it with `body`.
fn write_file<F>(path: &Path, body: F) -> MetricResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let io_err = |source| MetricError::io(path, source);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    body(&mut w).and_then(|()| w.flush()).map_err(io_err)
}

/// Write both output files of `result` to its resolved paths.
pub(crate) fn write_outputs(result: &MetricGbcd, params: &MetricParams) -> MetricResult<()> {
    write_file(&result.dist_output_file, |w| write_distribution(w, result, params))?;
    write_file(&result.err_output_file, |w| write_errors(w, result, params))
}
