//! Fixed 5x5 Sobel convolution with zero padding.
//!
//! Sums accumulate in `i32` and are clamped into the `i16` range before they
//! are stored. With 8-bit input the largest attainable |sum| is 48 * 255, so
//! the clamp is a safety bound that ordinary images never reach.

use crate::sobel::grid::{GrayGrid, PixelGrid};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub type Kernel5x5 = [[i32; 5]; 5];

/// Signed per-pixel gradient raster.
pub type GradientGrid = PixelGrid<i16>;

const KERNEL_RADIUS: isize = 2;

/// Horizontal-gradient kernel.
pub const SOBEL_X_5X5: Kernel5x5 = [
    [-1, -2, 0, 2, 1],
    [-4, -8, 0, 8, 4],
    [-6, -12, 0, 12, 6],
    [-4, -8, 0, 8, 4],
    [-1, -2, 0, 2, 1],
];

/// Vertical-gradient kernel, the transpose of [`SOBEL_X_5X5`].
pub const SOBEL_Y_5X5: Kernel5x5 = [
    [-1, -4, -6, -4, -1],
    [-2, -8, -12, -8, -2],
    [0, 0, 0, 0, 0],
    [2, 8, 12, 8, 2],
    [1, 4, 6, 4, 1],
];

#[inline]
pub fn clamp_to_i16(sum: i32) -> i16 {
    sum.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Convolves a grayscale grid with one kernel.
///
/// Positions outside the grid read as 0. The result has the input's
/// dimensions; an empty input gives an empty result.
pub fn convolve(image: &GrayGrid, kernel: &Kernel5x5) -> GradientGrid {
    let (width, height) = image.dimensions();
    let data = convolve_with(width, height, kernel, |x, y| image.get_safe(x, y, 0));
    GradientGrid::from_vec(data, width, height).unwrap_or_default()
}

/// Convolves `width x height` logical pixels stored with a row stride.
///
/// Bytes past `width` in each row are never read, so the result does not
/// depend on what the stride padding holds.
pub fn convolve_strided(
    buffer: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    kernel: &Kernel5x5,
) -> GradientGrid {
    debug_assert!(stride >= width && buffer.len() >= stride * height);
    let data = convolve_with(width, height, kernel, |x, y| {
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            0
        } else {
            buffer[y as usize * stride + x as usize]
        }
    });
    GradientGrid::from_vec(data, width, height).unwrap_or_default()
}

/// Horizontal and vertical gradients of a grayscale grid.
pub fn sobel_gradients(image: &GrayGrid) -> (GradientGrid, GradientGrid) {
    (convolve(image, &SOBEL_X_5X5), convolve(image, &SOBEL_Y_5X5))
}

fn convolve_with<F>(width: usize, height: usize, kernel: &Kernel5x5, sample: F) -> Vec<i16>
where
    F: Fn(isize, isize) -> u8 + Sync,
{
    let mut output = vec![0i16; width * height];
    if output.is_empty() {
        return output;
    }

    #[cfg(feature = "rayon")]
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| convolve_row(row, y as isize, kernel, &sample));

    #[cfg(not(feature = "rayon"))]
    output
        .chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| convolve_row(row, y as isize, kernel, &sample));

    output
}

fn convolve_row<F>(row: &mut [i16], y: isize, kernel: &Kernel5x5, sample: &F)
where
    F: Fn(isize, isize) -> u8,
{
    for (x, out) in row.iter_mut().enumerate() {
        let x = x as isize;
        let mut sum = 0i32;
        for ky in -KERNEL_RADIUS..=KERNEL_RADIUS {
            let weights = &kernel[(ky + KERNEL_RADIUS) as usize];
            for kx in -KERNEL_RADIUS..=KERNEL_RADIUS {
                let weight = weights[(kx + KERNEL_RADIUS) as usize];
                sum += weight * i32::from(sample(x + kx, y + ky));
            }
        }
        *out = clamp_to_i16(sum);
    }
}
