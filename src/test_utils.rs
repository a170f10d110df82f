//! Test utilities for sobel-edges
//!
//! This module provides common fixtures for testing the edge pipeline.
//! It is only compiled when running tests.

#[cfg(test)]
use crate::sobel::grid::RgbGrid;
#[cfg(test)]
use image::Rgb;

/// Creates an RGB grid filled with one color.
#[cfg(test)]
pub fn create_uniform_rgb(width: usize, height: usize, color: Rgb<u8>) -> RgbGrid {
    crate::pattern::uniform(width, height, color).expect("non-zero test dimensions")
}

/// Creates a gray ramp along x: `R = G = B = x * 255 / width`.
#[cfg(test)]
pub fn create_horizontal_gradient(width: usize, height: usize) -> RgbGrid {
    crate::pattern::horizontal_gradient(width, height).expect("non-zero test dimensions")
}

/// Creates a grid that is black on the left half and white on the right.
#[cfg(test)]
pub fn create_step_edge(width: usize, height: usize) -> RgbGrid {
    RgbGrid::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    })
    .expect("non-zero test dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_horizontal_gradient_ramps_along_x() {
        let grid = create_horizontal_gradient(64, 2);
        assert_eq!(grid.dimensions(), (64, 2));
        assert_eq!(*grid.at(0, 0).unwrap(), Rgb([0, 0, 0]));
        assert_eq!(*grid.at(32, 1).unwrap(), Rgb([127, 127, 127]));
        assert_eq!(*grid.at(63, 0).unwrap(), Rgb([251, 251, 251]));
    }

    #[test]
    fn create_step_edge_splits_at_half_width() {
        let grid = create_step_edge(4, 1);
        assert_eq!(*grid.at(1, 0).unwrap(), Rgb([0, 0, 0]));
        assert_eq!(*grid.at(2, 0).unwrap(), Rgb([255, 255, 255]));
    }
}
