use crate::config::SobelConfig;
use crate::error::GridError;
use crate::sobel::filter::SobelFilter;
use crate::sobel::grid::{GrayGrid, RgbGrid};
use image::{Luma, Rgb};
use imageproc::definitions::Image;

/// Trait providing 5x5 Sobel edge maps for `image` buffers
///
/// Runs the reference pipeline and returns a single-channel image of the
/// same dimensions, where brightness encodes gradient magnitude.
pub trait SobelEdges {
    /// Computes the edge map with the given quantization policy
    ///
    /// # Arguments
    ///
    /// * `config` - Quantization and normalization settings
    ///
    /// # Returns
    ///
    /// Edge intensity image; a `0x0` input yields a `0x0` output
    ///
    /// # Errors
    ///
    /// * `GridError::ExceedsImageLimits` - the edge map cannot be stored in an image buffer
    fn sobel_edges(&self, config: &SobelConfig) -> Result<Image<Luma<u8>>, GridError>;

    /// Computes the edge map with [`SobelConfig::default`]
    fn sobel_edges_default(&self) -> Result<Image<Luma<u8>>, GridError> {
        self.sobel_edges(&SobelConfig::default())
    }
}

impl SobelEdges for Image<Rgb<u8>> {
    fn sobel_edges(&self, config: &SobelConfig) -> Result<Image<Luma<u8>>, GridError> {
        SobelFilter::new(*config)
            .apply(&RgbGrid::from_image(self))
            .to_image()
    }
}

impl SobelEdges for Image<Luma<u8>> {
    fn sobel_edges(&self, config: &SobelConfig) -> Result<Image<Luma<u8>>, GridError> {
        SobelFilter::new(*config)
            .apply_gray(&GrayGrid::from_image(self))
            .to_image()
    }
}
