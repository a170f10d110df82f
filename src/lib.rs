pub mod analysis;
pub mod config;
mod error;
pub mod pattern;
pub mod raw_io;
mod sobel;
#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use config::{load_config, FilterSettings, OptimizationLevel, SobelConfig};
pub use error::{ConfigError, GridError, RawIoError};
pub use sobel::accelerated::{
    cpu_capabilities, resolve_level, AlignedSobelFilter, PerformanceMetrics,
};
pub use sobel::aligned::{padded_width, AlignedGrayBuffer, ROW_ALIGNMENT};
pub use sobel::convolution::{
    convolve, convolve_strided, sobel_gradients, GradientGrid, Kernel5x5, SOBEL_X_5X5,
    SOBEL_Y_5X5,
};
pub use sobel::edges::SobelEdges;
pub use sobel::filter::SobelFilter;
pub use sobel::grayscale::{rgb_to_gray, to_grayscale, LUMA_WEIGHTS};
pub use sobel::grid::{GrayGrid, GridPixel, PixelGrid, RgbGrid};
pub use sobel::magnitude::{gradient_magnitude, magnitude, MagnitudeGrid};
pub use sobel::quantize::quantize;

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
