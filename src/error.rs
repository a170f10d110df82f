use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for pixel grid construction and access
///
/// All core failures are deterministic functions of the input, so callers
/// should surface them rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Zero width/height, or supplied data whose length is not `width * height`
    ///
    /// `len` is the number of elements that were supplied (or would have been
    /// allocated) for the requested dimensions.
    #[error("Invalid grid dimensions {width}x{height} for {len} elements")]
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },

    /// Pixel coordinates outside `[0, width) x [0, height)`
    #[error("Pixel ({x}, {y}) is out of range for a {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Grid dimensions that an `image` buffer cannot address
    #[error("Grid of {width}x{height} exceeds the u32 dimensions of an image buffer")]
    ExceedsImageLimits { width: usize, height: usize },
}

/// Error type for headerless raw image files
///
/// This is the closed set of failures the raw loader and saver report.
#[derive(Debug, Error)]
pub enum RawIoError {
    /// The input path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file length does not match `width * height * channels`
    #[error("Invalid file size for specified image dimensions: expected {expected} bytes, got {actual}")]
    InvalidFileSize { expected: u64, actual: u64 },

    /// Opening or reading the file failed
    #[error("Error reading from {}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating or writing the file failed
    #[error("Error writing to {}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Zero dimensions, or an empty grid handed to the saver
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

impl From<GridError> for RawIoError {
    fn from(error: GridError) -> Self {
        match error {
            GridError::InvalidDimensions { width, height, .. }
            | GridError::OutOfRange { width, height, .. }
            | GridError::ExceedsImageLimits { width, height } => {
                Self::InvalidDimensions { width, height }
            }
        }
    }
}

/// Error type for loading and validating filter configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for [`crate::SobelConfig`]
    #[error("Failed to parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Quantization is enabled with zero output levels
    #[error("Quantization levels must be in 1..=255 when quantization is enabled, got {0}")]
    InvalidLevels(u8),
}
