use crate::sobel::grid::{GrayGrid, RgbGrid};
use image::Rgb;

/// ITU-R BT.709 luma weights for (R, G, B).
pub const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Reduces one RGB pixel to its BT.709 luma, rounded to nearest.
#[inline]
pub fn rgb_to_gray(pixel: Rgb<u8>) -> u8 {
    let Rgb([red, green, blue]) = pixel;
    let gray = LUMA_WEIGHTS[0] * f64::from(red)
        + LUMA_WEIGHTS[1] * f64::from(green)
        + LUMA_WEIGHTS[2] * f64::from(blue);
    gray.clamp(0.0, 255.0).round() as u8
}

/// Converts every pixel of an RGB grid; the empty grid maps to the empty grid.
pub fn to_grayscale(input: &RgbGrid) -> GrayGrid {
    let data = input.as_slice().iter().map(|p| rgb_to_gray(*p)).collect();
    GrayGrid::from_vec(data, input.width(), input.height()).unwrap_or_default()
}

/// Writes luma values into a strided byte buffer.
///
/// Only the first `input.width()` bytes of each `stride`-wide row are written;
/// the rest of the row is left as it was.
pub fn to_grayscale_strided(input: &RgbGrid, output: &mut [u8], stride: usize) {
    debug_assert!(stride >= input.width());
    if input.is_empty() {
        return;
    }
    for (src_row, dst_row) in input
        .as_slice()
        .chunks_exact(input.width())
        .zip(output.chunks_exact_mut(stride))
    {
        for (dst, src) in dst_row.iter_mut().zip(src_row) {
            *dst = rgb_to_gray(*src);
        }
    }
}
