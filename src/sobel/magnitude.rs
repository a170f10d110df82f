use crate::sobel::convolution::GradientGrid;
use crate::sobel::grid::PixelGrid;

/// Per-pixel gradient magnitude, always `>= 0`.
pub type MagnitudeGrid = PixelGrid<f64>;

#[inline]
pub fn magnitude(gx: i16, gy: i16) -> f64 {
    f64::from(gx).hypot(f64::from(gy))
}

/// Euclidean combination of two gradient rasters of equal dimensions.
pub fn gradient_magnitude(gx: &GradientGrid, gy: &GradientGrid) -> MagnitudeGrid {
    debug_assert_eq!(gx.dimensions(), gy.dimensions());
    let data = gx
        .as_slice()
        .iter()
        .zip(gy.as_slice())
        .map(|(&x, &y)| magnitude(x, y))
        .collect();
    MagnitudeGrid::from_vec(data, gx.width(), gx.height()).unwrap_or_default()
}
