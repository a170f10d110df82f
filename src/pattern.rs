//! Synthetic RGB inputs with known edge structure.

use crate::error::GridError;
use crate::sobel::grid::RgbGrid;
use image::Rgb;

const STRIPE_PERIOD: usize = 80;

/// Gray stripes: vertical bands every 80 px at 255, horizontal bands raising
/// the floor to 128, and a diagonal band raising it to 64.
pub fn stripe_pattern(width: usize, height: usize) -> Result<RgbGrid, GridError> {
    RgbGrid::from_fn(width, height, |x, y| {
        let mut value = 0u8;
        if (x / STRIPE_PERIOD) % 2 == 0 {
            value = 255;
        }
        if (y / STRIPE_PERIOD) % 2 == 0 {
            value = value.max(128);
        }
        if (x + y) % (2 * STRIPE_PERIOD) < STRIPE_PERIOD {
            value = value.max(64);
        }
        Rgb([value; 3])
    })
}

/// Gray ramp along x: `R = G = B = x * 255 / width`.
pub fn horizontal_gradient(width: usize, height: usize) -> Result<RgbGrid, GridError> {
    RgbGrid::from_fn(width, height, |x, _| Rgb([(x * 255 / width) as u8; 3]))
}

pub fn uniform(width: usize, height: usize, color: Rgb<u8>) -> Result<RgbGrid, GridError> {
    RgbGrid::filled(width, height, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripe_pattern_layers_bands() {
        let grid = stripe_pattern(320, 320).unwrap();
        assert_eq!(*grid.at(0, 0).unwrap(), Rgb([255; 3]));
        // x in an odd vertical band, y in an even horizontal band
        assert_eq!(*grid.at(100, 10).unwrap(), Rgb([128; 3]));
        // odd in both, inside the diagonal band
        assert_eq!(*grid.at(90, 90).unwrap(), Rgb([64; 3]));
        // odd in both, outside the diagonal band
        assert_eq!(*grid.at(100, 150).unwrap(), Rgb([0; 3]));
    }

    #[test]
    fn generators_reject_zero_dimensions() {
        assert!(stripe_pattern(0, 4).is_err());
        assert!(horizontal_gradient(4, 0).is_err());
        assert!(uniform(0, 0, Rgb([1, 2, 3])).is_err());
    }
}
