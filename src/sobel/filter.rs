use crate::config::SobelConfig;
use crate::sobel::convolution::{
    convolve, GradientGrid, Kernel5x5, SOBEL_X_5X5, SOBEL_Y_5X5,
};
use crate::sobel::grayscale::to_grayscale;
use crate::sobel::grid::{GrayGrid, RgbGrid};
use crate::sobel::magnitude::gradient_magnitude;
use crate::sobel::quantize::quantize;
use log::debug;

/// Reference 5x5 Sobel edge filter.
///
/// Grayscale conversion, convolution with both kernels, magnitude and
/// quantization run in sequence over plain row-major grids. The filter holds
/// no state besides its configuration, so `apply` takes `&self`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SobelFilter {
    config: SobelConfig,
}

impl SobelFilter {
    pub fn new(config: SobelConfig) -> Self {
        Self { config }
    }

    /// Edge intensity of an RGB grid. The empty grid maps to the empty grid.
    pub fn apply(&self, input: &RgbGrid) -> GrayGrid {
        if input.is_empty() {
            return GrayGrid::default();
        }
        self.apply_gray(&to_grayscale(input))
    }

    /// Edge intensity of an already grayscale grid.
    pub fn apply_gray(&self, input: &GrayGrid) -> GrayGrid {
        if input.is_empty() {
            return GrayGrid::default();
        }
        debug!(
            "SobelFilter::apply_gray {}x{} with {:?}",
            input.width(),
            input.height(),
            self.config
        );
        let gx = convolve(input, &SOBEL_X_5X5);
        let gy = convolve(input, &SOBEL_Y_5X5);
        edges_from_gradients(&gx, &gy, &self.config)
    }

    pub fn config(&self) -> &SobelConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SobelConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: SobelConfig) {
        self.config = config;
    }

    pub const fn kernel_x() -> &'static Kernel5x5 {
        &SOBEL_X_5X5
    }

    pub const fn kernel_y() -> &'static Kernel5x5 {
        &SOBEL_Y_5X5
    }
}

/// Magnitude, quantization and packing shared by both filter forms.
pub(crate) fn edges_from_gradients(
    gx: &GradientGrid,
    gy: &GradientGrid,
    config: &SobelConfig,
) -> GrayGrid {
    let magnitudes = gradient_magnitude(gx, gy);
    let quantized = quantize(magnitudes.as_slice(), config);
    GrayGrid::from_vec(quantized, gx.width(), gx.height()).unwrap_or_default()
}
