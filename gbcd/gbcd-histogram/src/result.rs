//! GBCD histogram result.

// Bin counts are far below 2^52.
#![allow(clippy::cast_precision_loss)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::binning::{GbcdBinning, MAX_GBCD_VALUES};
use crate::error::{GbcdError, GbcdResult};

/// Hemisphere of a boundary plane normal in the crystal frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hemisphere {
    /// `z >= 0`.
    Northern = 0,
    /// `z < 0`.
    Southern = 1,
}

impl Hemisphere {
    /// Hemisphere for the northern flag of [`square_coord`](crate::square_coord).
    #[inline]
    #[must_use]
    pub const fn from_northern(northern: bool) -> Self {
        if northern { Self::Northern } else { Self::Southern }
    }

    /// The other hemisphere.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Northern => Self::Southern,
            Self::Southern => Self::Northern,
        }
    }

    /// Offset of this hemisphere within a bin pair.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> usize {
        self as usize
    }
}

/// A grain boundary character distribution, one block per phase.
///
/// Values of phase `p` live at `p * total_bins() + 2 * bin + hemisphere`.
/// After normalization each block of a phase with boundaries averages to
/// 1.0 (multiples of random distribution).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gbcd {
    /// Bin layout shared by all phases.
    pub binning: Option<GbcdBinning>,
    /// Number of phases, including the unknown phase 0.
    pub num_phases: usize,
    /// Flattened histogram values in MRD.
    pub values: Vec<f64>,
    /// Accumulated area per phase before normalization, counting every
    /// recorded bin hit.
    pub total_area: Vec<f64>,
    /// Triangles that passed the label and phase checks.
    pub triangles_used: usize,
    /// Number of bin hits recorded over all triangles.
    pub bin_hits: usize,
}

impl Gbcd {
    /// Create a zeroed histogram.
    ///
    /// # Errors
    ///
    /// Returns [`GbcdError::HistogramTooLarge`] if all phases together would
    /// hold more than [`MAX_GBCD_VALUES`] values.
    pub fn zeroed(binning: GbcdBinning, num_phases: usize) -> GbcdResult<Self> {
        let bins_per_phase = binning.total_bins();
        let len = num_phases
            .checked_mul(bins_per_phase)
            .filter(|&n| n <= MAX_GBCD_VALUES)
            .ok_or(GbcdError::HistogramTooLarge {
                num_phases,
                bins_per_phase,
            })?;

        Ok(Self {
            binning: Some(binning),
            num_phases,
            values: vec![0.0; len],
            total_area: vec![0.0; num_phases],
            triangles_used: 0,
            bin_hits: 0,
        })
    }

    /// Values per phase, including the hemisphere split.
    #[must_use]
    pub fn total_bins(&self) -> usize {
        self.binning.map_or(0, |b| b.total_bins())
    }

    /// Shape `[s0, s1, s2, s3, s4, 2]` of one phase block.
    #[must_use]
    pub fn shape(&self) -> [usize; 6] {
        self.binning.map_or([0; 6], |b| b.shape())
    }

    /// Flat index of a value.
    #[inline]
    #[must_use]
    pub fn flat_index(&self, phase: usize, bin: usize, hemisphere: Hemisphere) -> usize {
        phase * self.total_bins() + 2 * bin + hemisphere.offset()
    }

    /// All values of one phase.
    #[must_use]
    pub fn phase_block(&self, phase: usize) -> Option<&[f64]> {
        let n = self.total_bins();
        let start = phase.checked_mul(n)?;
        self.values.get(start..start + n)
    }

    /// Value of one bin and hemisphere.
    #[must_use]
    pub fn value(&self, phase: usize, bin: usize, hemisphere: Hemisphere) -> Option<f64> {
        if phase >= self.num_phases || 2 * bin >= self.total_bins() {
            return None;
        }
        self.values.get(self.flat_index(phase, bin, hemisphere)).copied()
    }

    /// Mean value of a phase block.
    #[must_use]
    pub fn mean_value(&self, phase: usize) -> Option<f64> {
        let block = self.phase_block(phase)?;
        (!block.is_empty()).then(|| block.iter().sum::<f64>() / block.len() as f64)
    }

    /// Largest value of a phase block.
    #[must_use]
    pub fn max_value(&self, phase: usize) -> Option<f64> {
        self.phase_block(phase)?.iter().copied().reduce(f64::max)
    }

    /// Number of nonzero values in a phase block.
    #[must_use]
    pub fn occupied_bins(&self, phase: usize) -> usize {
        self.phase_block(phase)
            .map_or(0, |b| b.iter().filter(|&&v| v > 0.0).count())
    }
}

impl std::fmt::Display for Gbcd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "GBCD:")?;
        writeln!(f, "  Shape: {:?}", self.shape())?;
        writeln!(f, "  Phases: {}", self.num_phases)?;
        writeln!(f, "  Triangles used: {}", self.triangles_used)?;
        writeln!(f, "  Bin hits: {}", self.bin_hits)?;
        for phase in 1..self.num_phases {
            let area = self.total_area.get(phase).copied().unwrap_or(0.0);
            writeln!(
                f,
                "  Phase {phase}: area {area:.3}, occupied {}, max {:.3} MRD",
                self.occupied_bins(phase),
                self.max_value(phase).unwrap_or(0.0)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binning() -> GbcdBinning {
        GbcdBinning::from_resolution(15.0).expect("valid resolution")
    }

    fn zeroed(phases: usize) -> Gbcd {
        Gbcd::zeroed(binning(), phases).expect("small histogram")
    }

    #[test]
    fn test_default_is_empty() {
        let g = Gbcd::default();
        assert_eq!(g.total_bins(), 0);
        assert_eq!(g.shape(), [0; 6]);
        assert!(g.value(0, 0, Hemisphere::Northern).is_none());
    }

    #[test]
    fn test_zeroed_layout() {
        let b = binning();
        let g = zeroed(3);
        assert_eq!(g.values.len(), 3 * b.total_bins());
        assert_eq!(g.phase_block(2).map(<[f64]>::len), Some(b.total_bins()));
        assert!(g.phase_block(3).is_none());
        assert_eq!(g.mean_value(1), Some(0.0));
        assert_eq!(g.occupied_bins(1), 0);
    }

    #[test]
    fn test_value_addressing() {
        let b = binning();
        let mut g = zeroed(2);
        let i = g.flat_index(1, 5, Hemisphere::Southern);
        assert_eq!(i, b.total_bins() + 11);
        g.values[i] = 4.0;
        assert_eq!(g.value(1, 5, Hemisphere::Southern), Some(4.0));
        assert_eq!(g.value(1, 5, Hemisphere::Northern), Some(0.0));
        assert_eq!(g.value(2, 5, Hemisphere::Northern), None);
        assert_eq!(g.value(1, b.num_bins(), Hemisphere::Northern), None);
        assert_eq!(g.max_value(1), Some(4.0));
        assert_eq!(g.occupied_bins(1), 1);
    }

    #[test]
    fn test_zeroed_rejects_oversized_histograms() {
        let b = GbcdBinning::from_resolution(2.0).expect("valid resolution");
        assert!(matches!(
            Gbcd::zeroed(b, 2),
            Err(GbcdError::HistogramTooLarge { num_phases: 2, .. })
        ));
        assert!(matches!(
            Gbcd::zeroed(binning(), usize::MAX),
            Err(GbcdError::HistogramTooLarge { .. })
        ));

        let mut huge = binning();
        huge.sizes = [90_000, 90_000, 90_000, 180_000, 180_000];
        assert!(matches!(Gbcd::zeroed(huge, 1), Err(GbcdError::HistogramTooLarge { .. })));
    }

    #[test]
    fn test_hemisphere() {
        assert_eq!(Hemisphere::from_northern(true), Hemisphere::Northern);
        assert_eq!(Hemisphere::Northern.opposite(), Hemisphere::Southern);
        assert_eq!(Hemisphere::Southern.offset(), 1);
    }

    #[test]
    fn test_display() {
        let g = zeroed(2);
        let s = format!("{g}");
        assert!(s.contains("GBCD"));
        assert!(s.contains("Phase 1"));
    }
}
