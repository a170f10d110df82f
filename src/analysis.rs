//! Summaries of an edge map: intensity statistics and an ASCII preview.

use crate::sobel::grid::GrayGrid;
use itertools::{Itertools, MinMaxResult};

/// Lower bounds of the strong, medium and weak edge bands.
pub const STRONG_EDGE: u8 = 200;
pub const MEDIUM_EDGE: u8 = 100;
pub const WEAK_EDGE: u8 = 50;

/// Characters from no edge to strongest edge.
pub const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStatistics {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    pub histogram: [usize; 256],
    /// Pixels in `200..=255`
    pub strong: usize,
    /// Pixels in `100..=199`
    pub medium: usize,
    /// Pixels in `50..=99`
    pub weak: usize,
    pub total: usize,
}

impl EdgeStatistics {
    /// Returns `None` for an empty grid.
    pub fn from_grid(grid: &GrayGrid) -> Option<Self> {
        let (min, max) = match grid.as_slice().iter().copied().minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let mut histogram = [0usize; 256];
        for &value in grid.as_slice() {
            histogram[usize::from(value)] += 1;
        }
        let sum: u64 = grid.as_slice().iter().map(|&v| u64::from(v)).sum();
        let band = |range: std::ops::Range<usize>| histogram[range].iter().sum::<usize>();

        Some(Self {
            min,
            max,
            mean: sum as f64 / grid.len() as f64,
            strong: band(usize::from(STRONG_EDGE)..256),
            medium: band(usize::from(MEDIUM_EDGE)..usize::from(STRONG_EDGE)),
            weak: band(usize::from(WEAK_EDGE)..usize::from(MEDIUM_EDGE)),
            histogram,
            total: grid.len(),
        })
    }

    pub fn strong_percent(&self) -> f64 {
        self.percent(self.strong)
    }

    pub fn medium_percent(&self) -> f64 {
        self.percent(self.medium)
    }

    pub fn weak_percent(&self) -> f64 {
        self.percent(self.weak)
    }

    fn percent(&self, count: usize) -> f64 {
        100.0 * count as f64 / self.total as f64
    }
}

/// Renders every `sample_rate`-th pixel of every `sample_rate`-th row.
///
/// A `sample_rate` of 0 is treated as 1.
pub fn ascii_preview(grid: &GrayGrid, sample_rate: usize) -> String {
    let step = sample_rate.max(1);
    let last = ASCII_RAMP.len() - 1;
    (0..grid.height())
        .step_by(step)
        .map(|y| {
            grid.row(y)
                .iter()
                .step_by(step)
                .map(|&v| char::from(ASCII_RAMP[usize::from(v) * last / 255]))
                .collect::<String>()
        })
        .join("\n")
}
