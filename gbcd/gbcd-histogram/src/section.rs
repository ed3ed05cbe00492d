//! Sections of a GBCD at one fixed misorientation.
//!
//! For a boundary plane normal `n` in the first crystal's frame, every pair
//! of symmetry operators gives an equivalent misorientation and normal. The
//! pairs whose Euler angles fall inside the `[0, pi/2)^3` zone are looked up
//! in the histogram and averaged, once from each side of the boundary. This
//! is the same enumeration the accumulation uses, so a bicrystal peaks at its
//! own boundary normal.

// Grid sizes are small; the float conversions are exact.
#![allow(clippy::cast_precision_loss)]

use std::f64::consts::FRAC_PI_2;
use std::io::{self, Write};

use gbcd_rotation::{AxisAngle, matrix_to_euler};
use gbcd_symmetry::LaueClass;
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::binning::{GbcdBinning, square_coord};
use crate::error::{GbcdError, GbcdResult};
use crate::result::{Gbcd, Hemisphere};

/// Azimuth samples of a GMT section, over 360 degrees.
pub const GMT_THETA_POINTS: usize = 120;

/// Polar samples of a GMT section, over 90 degrees.
pub const GMT_PHI_POINTS: usize = 30;

/// Which section to extract.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SectionParams {
    /// Phase whose histogram block is read.
    pub phase: usize,
    /// Misorientation angle in degrees.
    pub misorientation_angle_degrees: f64,
    /// Misorientation axis as Miller-style indices.
    pub misorientation_axis: [f64; 3],
    /// Pixels per side of the stereographic pole figure.
    pub dimension: usize,
}

impl Default for SectionParams {
    fn default() -> Self {
        Self {
            phase: 1,
            misorientation_angle_degrees: 60.0,
            misorientation_axis: [1.0, 1.0, 1.0],
            dimension: 100,
        }
    }
}

impl SectionParams {
    /// Section at `angle_degrees` about `axis`.
    #[must_use]
    pub const fn misorientation(mut self, angle_degrees: f64, axis: [f64; 3]) -> Self {
        self.misorientation_angle_degrees = angle_degrees;
        self.misorientation_axis = axis;
        self
    }

    /// Set the phase.
    #[must_use]
    pub const fn phase(mut self, phase: usize) -> Self {
        self.phase = phase;
        self
    }

    /// Set the pole figure size in pixels per side.
    #[must_use]
    pub const fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// The misorientation as an axis-angle pair.
    #[must_use]
    pub fn axis_angle(&self) -> AxisAngle {
        AxisAngle::from_hkl_degrees(self.misorientation_axis, self.misorientation_angle_degrees)
    }
}

/// One symmetric equivalent of the section misorientation.
struct Equivalent {
    /// `phi1`, `cos(Phi)`, `phi2` of the equivalent misorientation.
    misorientation: [f64; 3],
    /// Maps a sampling normal to the crystal normal that is binned.
    normal_map: Matrix3<f64>,
}

/// Equivalents of `dg` inside the Euler zone, in enumeration order: sym1
/// outer, sym2 inner, the direct view before the view from the second
/// crystal.
fn equivalents(dg: &Matrix3<f64>, class: LaueClass) -> Vec<Equivalent> {
    let ops = class.symmetry_ops().matrices();
    let dgt = dg.transpose();
    let mut out = Vec::new();

    for sym1 in ops {
        for sym2 in ops {
            let views = [
                (sym1 * dg * sym2.transpose(), *sym1),
                (sym1 * dgt * sym2, sym1 * dgt),
            ];
            for (m, normal_map) in views {
                let e = matrix_to_euler(&m);
                if e.all_below(FRAC_PI_2) {
                    out.push(Equivalent {
                        misorientation: [e.phi1, e.phi.cos(), e.phi2],
                        normal_map,
                    });
                }
            }
        }
    }
    out
}

fn phase_block(gbcd: &Gbcd, phase: usize) -> GbcdResult<(&[f64], GbcdBinning)> {
    let invalid = GbcdError::InvalidPhase {
        phase,
        num_phases: gbcd.num_phases,
    };
    let binning = gbcd.binning.ok_or_else(|| invalid.clone())?;
    let block = gbcd.phase_block(phase).ok_or(invalid)?;
    Ok((block, binning))
}

/// Mean histogram value over the equivalents that land in a bin.
fn direction_value(block: &[f64], binning: &GbcdBinning, equivalents: &[Equivalent], n: &Vector3<f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0_usize;
    for eq in equivalents {
        let (sq, northern) = square_coord(&(eq.normal_map * n));
        let [phi1, cos_phi, phi2] = eq.misorientation;
        if let Some(bin) = binning.bin_index(&[phi1, cos_phi, phi2, sq.x, sq.y]) {
            let hemisphere = Hemisphere::from_northern(northern);
            sum += block.get(2 * bin + hemisphere.offset()).copied().unwrap_or(0.0);
            count += 1;
        }
    }
    if count > 0 { sum / count as f64 } else { 0.0 }
}

/// GBCD values at a fixed misorientation for each boundary normal in
/// `directions`, given in the first crystal's frame.
///
/// Directions with no equivalent inside the histogram report 0.
///
/// # Errors
///
/// Returns [`GbcdError::InvalidPhase`] if `phase` has no block in `gbcd`.
pub fn section_values(
    gbcd: &Gbcd,
    phase: usize,
    class: LaueClass,
    misorientation: &AxisAngle,
    directions: &[Vector3<f64>],
) -> GbcdResult<Vec<f64>> {
    let (block, binning) = phase_block(gbcd, phase)?;
    let equivalents = equivalents(&misorientation.to_matrix(), class);
    debug!(
        phase,
        equivalents = equivalents.len(),
        directions = directions.len(),
        "Extracting GBCD section"
    );

    Ok(directions
        .par_iter()
        .map(|n| direction_value(block, &binning, &equivalents, n))
        .collect())
}

/// Stereographic pole figure of a GBCD section.
///
/// Pixel `(row, col)` of a `dimension` x `dimension` grid covers
/// `[-1, 1]^2`; pixels outside the unit circle are 0.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoleFigure {
    /// Pixels per side.
    pub dimension: usize,
    /// Row-major pixel values.
    pub values: Vec<f64>,
}

impl PoleFigure {
    /// Width of one pixel in projection coordinates.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        2.0 / self.dimension.max(1) as f64
    }

    /// Projection coordinates of the center of a pixel.
    #[must_use]
    pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
        let res = self.resolution();
        let half = (self.dimension / 2) as f64;
        ((col as f64 - half) * res + res / 2.0, (row as f64 - half) * res + res / 2.0)
    }

    /// Upper hemisphere direction of a pixel, or `None` outside the circle.
    #[must_use]
    pub fn pixel_direction(&self, row: usize, col: usize) -> Option<Vector3<f64>> {
        let (x, y) = self.pixel_center(row, col);
        inverse_stereographic(x, y)
    }

    /// Value of a pixel.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.dimension || col >= self.dimension {
            return None;
        }
        self.values.get(row * self.dimension + col).copied()
    }

    /// Largest pixel value and the direction of that pixel.
    #[must_use]
    pub fn peak(&self) -> Option<(Vector3<f64>, f64)> {
        let (i, &v) = self
            .values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))?;
        let d = self.dimension.max(1);
        Some((self.pixel_direction(i / d, i % d)?, v))
    }
}

fn inverse_stereographic(x: f64, y: f64) -> Option<Vector3<f64>> {
    let r2 = x * x + y * y;
    if r2 > 1.0 {
        return None;
    }
    let z = (1.0 - r2) / (1.0 + r2);
    Some(Vector3::new(x * (1.0 + z), y * (1.0 + z), z))
}

/// Extract a stereographic pole figure of the section in `params`.
///
/// # Errors
///
/// Returns [`GbcdError::InvalidPhase`] if the phase has no block in `gbcd`.
pub fn pole_figure(gbcd: &Gbcd, class: LaueClass, params: &SectionParams) -> GbcdResult<PoleFigure> {
    let mut figure = PoleFigure {
        dimension: params.dimension,
        values: vec![0.0; params.dimension * params.dimension],
    };

    let mut pixels = Vec::new();
    let mut directions = Vec::new();
    for row in 0..params.dimension {
        for col in 0..params.dimension {
            if let Some(d) = figure.pixel_direction(row, col) {
                pixels.push(row * params.dimension + col);
                directions.push(d);
            }
        }
    }

    let values = section_values(gbcd, params.phase, class, &params.axis_angle(), &directions)?;
    for (pixel, value) in pixels.into_iter().zip(values) {
        figure.values[pixel] = value;
    }
    Ok(figure)
}

/// A section sampled on a regular azimuth and polar angle grid, for GMT.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GmtSection {
    /// `h k l angle` of the misorientation, as given.
    pub header: [f64; 4],
    /// `[azimuth, elevation, value]` rows, angles in degrees with the
    /// elevation measured from the equator.
    pub rows: Vec<[f64; 3]>,
}

/// Extract the section in `params` on the GMT grid: azimuth in 3 degree
/// steps over `[0, 360]`, polar angle in 3 degree steps over `[0, 90]`.
///
/// # Errors
///
/// Returns [`GbcdError::InvalidPhase`] if the phase has no block in `gbcd`.
pub fn gmt_section(gbcd: &Gbcd, class: LaueClass, params: &SectionParams) -> GbcdResult<GmtSection> {
    let theta_step = 360.0 / GMT_THETA_POINTS as f64;
    let phi_step = 90.0 / GMT_PHI_POINTS as f64;

    let mut angles = Vec::with_capacity((GMT_PHI_POINTS + 1) * (GMT_THETA_POINTS + 1));
    for k in 0..=GMT_PHI_POINTS {
        for l in 0..=GMT_THETA_POINTS {
            angles.push((l as f64 * theta_step, k as f64 * phi_step));
        }
    }
    let directions: Vec<Vector3<f64>> = angles
        .iter()
        .map(|&(theta, phi)| {
            let (t, p) = (theta.to_radians(), phi.to_radians());
            Vector3::new(p.sin() * t.cos(), p.sin() * t.sin(), p.cos())
        })
        .collect();

    let values = section_values(gbcd, params.phase, class, &params.axis_angle(), &directions)?;
    let [h, k, l] = params.misorientation_axis;

    Ok(GmtSection {
        header: [h, k, l, params.misorientation_angle_degrees],
        rows: angles
            .into_iter()
            .zip(values)
            .map(|((theta, phi), v)| [theta, 90.0 - phi, v])
            .collect(),
    })
}

/// Write a GMT section as text.
///
/// # Errors
///
/// Returns any error of the underlying writer.
pub fn write_gmt(w: &mut impl Write, section: &GmtSection) -> io::Result<()> {
    let [h, k, l, angle] = section.header;
    writeln!(w, "{h:.1} {k:.1} {l:.1} {angle:.1}")?;
    for [theta, elevation, value] in &section.rows {
        writeln!(w, "{theta:.6} {elevation:.6} {value:.6}")?;
    }
    Ok(())
}

/// Write a pole figure as an ASCII legacy VTK rectilinear grid with one
/// `Intensity` value per cell.
///
/// # Errors
///
/// Returns any error of the underlying writer.
pub fn write_pole_figure_vtk(w: &mut impl Write, figure: &PoleFigure) -> io::Result<()> {
    let n = figure.dimension;
    let res = figure.resolution();
    let origin = -(n as f64) * res / 2.0;

    writeln!(w, "# vtk DataFile Version 2.0")?;
    writeln!(w, "GBCD pole figure")?;
    writeln!(w, "ASCII")?;
    writeln!(w, "DATASET RECTILINEAR_GRID")?;
    writeln!(w, "DIMENSIONS {} {} 2", n + 1, n + 1)?;
    for axis in ["X", "Y"] {
        writeln!(w, "{axis}_COORDINATES {} float", n + 1)?;
        let coords: Vec<String> = (0..=n).map(|i| format!("{:.6}", origin + i as f64 * res)).collect();
        writeln!(w, "{}", coords.join(" "))?;
    }
    writeln!(w, "Z_COORDINATES 2 float")?;
    writeln!(w, "{:.6} {:.6}", -res / 2.0, res / 2.0)?;
    writeln!(w, "CELL_DATA {}", n * n)?;
    writeln!(w, "SCALARS Intensity float 1")?;
    writeln!(w, "LOOKUP_TABLE default")?;
    for row in figure.values.chunks(n.max(1)) {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
        writeln!(w, "{}", line.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn section(values: Vec<f64>) -> GmtSection {
        GmtSection {
            header: [1.0, 1.0, 1.0, 60.0],
            rows: values.into_iter().map(|v| [0.0, 90.0, v]).collect(),
        }
    }

    #[test]
    fn test_equivalents_lie_in_the_euler_zone() {
        let twist = AxisAngle::from_hkl_degrees([0.0, 0.0, 1.0], 30.0);
        let eqs = equivalents(&twist.to_matrix(), LaueClass::CubicHigh);
        assert!(!eqs.is_empty());
        for e in &eqs {
            let [phi1, cos_phi, phi2] = e.misorientation;
            assert!((0.0..FRAC_PI_2).contains(&phi1));
            assert!((0.0..FRAC_PI_2).contains(&phi2));
            assert!(cos_phi > 0.0 && cos_phi <= 1.0);
            assert_relative_eq!((e.normal_map * Vector3::x()).norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pixel_geometry() {
        let figure = PoleFigure {
            dimension: 4,
            values: vec![0.0; 16],
        };
        assert_relative_eq!(figure.resolution(), 0.5);
        assert_eq!(figure.pixel_center(0, 0), (-0.75, -0.75));
        assert_eq!(figure.pixel_center(2, 1), (-0.25, 0.25));

        let d = figure.pixel_direction(2, 2).expect("inside the circle");
        assert_relative_eq!(d.norm(), 1.0, epsilon = 1e-12);
        assert!(d.z > 0.0);
        // Corners lie outside the unit circle.
        assert!(figure.pixel_direction(0, 0).is_none());
        assert_eq!(figure.value(4, 0), None);
    }

    #[test]
    fn test_inverse_stereographic_center_and_rim() {
        let c = inverse_stereographic(0.0, 0.0).expect("center");
        assert_relative_eq!(c, Vector3::z(), epsilon = 1e-12);
        let rim = inverse_stereographic(1.0, 0.0).expect("rim");
        assert_relative_eq!(rim, Vector3::x(), epsilon = 1e-12);
        assert!(inverse_stereographic(0.9, 0.9).is_none());
    }

    #[test]
    fn test_invalid_phase() {
        let empty = Gbcd::default();
        let err = section_values(&empty, 1, LaueClass::CubicHigh, &AxisAngle::identity(), &[Vector3::z()]);
        assert!(matches!(err, Err(GbcdError::InvalidPhase { phase: 1, num_phases: 0 })));

        let binning = GbcdBinning::from_resolution(15.0).expect("valid resolution");
        let gbcd = Gbcd::zeroed(binning, 2).expect("small histogram");
        let err = pole_figure(&gbcd, LaueClass::CubicHigh, &SectionParams::default().phase(2));
        assert_eq!(err.map(|_| ()).map_err(|e| e.code()), Err(-4));
    }

    #[test]
    fn test_write_gmt() {
        let mut buf = Vec::new();
        write_gmt(&mut buf, &section(vec![1.5, 0.0])).expect("write to memory");
        let text = String::from_utf8(buf).expect("utf-8");
        assert_eq!(
            text,
            "1.0 1.0 1.0 60.0\n0.000000 90.000000 1.500000\n0.000000 90.000000 0.000000\n"
        );
    }

    #[test]
    fn test_write_pole_figure_vtk() {
        let figure = PoleFigure {
            dimension: 2,
            values: vec![1.0, 2.0, 3.0, 4.0],
        };
        let mut buf = Vec::new();
        write_pole_figure_vtk(&mut buf, &figure).expect("write to memory");
        let text = String::from_utf8(buf).expect("utf-8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# vtk DataFile Version 2.0");
        assert_eq!(lines[4], "DIMENSIONS 3 3 2");
        assert_eq!(lines[6], "-1.000000 0.000000 1.000000");
        assert_eq!(lines[11], "CELL_DATA 4");
        assert_eq!(lines[14], "1.000000 2.000000");
        assert_eq!(lines[15], "3.000000 4.000000");
    }
}
