//! Headerless raw image files.
//!
//! RGB input is `width * height * 3` interleaved bytes; grayscale output is
//! `width * height` bytes. Neither format carries a header, so dimensions
//! always come from the caller.

use crate::error::RawIoError;
use crate::sobel::grid::{GrayGrid, RgbGrid};
use image::Rgb;
use log::debug;
use std::fs;
use std::path::Path;

const RGB_CHANNELS: usize = 3;

/// Decodes interleaved RGB bytes into a grid.
///
/// # Errors
///
/// * `RawIoError::InvalidDimensions` - either dimension is zero, or the byte
///   count overflows `usize`
/// * `RawIoError::InvalidFileSize` - `bytes.len() != width * height * 3`
pub fn rgb_grid_from_bytes(bytes: &[u8], width: usize, height: usize) -> Result<RgbGrid, RawIoError> {
    let expected = rgb_byte_count(width, height)?;
    if bytes.len() != expected {
        return Err(RawIoError::InvalidFileSize {
            expected: expected as u64,
            actual: bytes.len() as u64,
        });
    }
    let pixels = bytes
        .chunks_exact(RGB_CHANNELS)
        .map(|p| Rgb([p[0], p[1], p[2]]))
        .collect();
    Ok(RgbGrid::from_vec(pixels, width, height)?)
}

/// Byte length of a `width x height` RGB file.
fn rgb_byte_count(width: usize, height: usize) -> Result<usize, RawIoError> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(RGB_CHANNELS))
        .filter(|&bytes| bytes > 0)
        .ok_or(RawIoError::InvalidDimensions { width, height })
}

/// Row-major grayscale bytes of a grid.
pub fn gray_grid_to_bytes(grid: &GrayGrid) -> &[u8] {
    grid.as_slice()
}

/// Size of the file at `path` in bytes, or 0 if it cannot be queried.
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Whether the file at `path` holds exactly `width * height * 3` bytes.
///
/// Dimensions whose byte count overflows never validate.
pub fn validate_rgb_file_size(path: &Path, width: usize, height: usize) -> bool {
    rgb_byte_count(width, height).is_ok_and(|expected| file_size(path) == expected as u64)
}

/// Loads a raw RGB file of known dimensions.
///
/// # Errors
///
/// * `RawIoError::FileNotFound` - `path` does not exist
/// * `RawIoError::InvalidDimensions` - either dimension is zero, or the byte
///   count overflows `usize`
/// * `RawIoError::InvalidFileSize` - the file length does not match the dimensions
/// * `RawIoError::ReadError` - the file cannot be read
pub fn load_rgb_raw(path: &Path, width: usize, height: usize) -> Result<RgbGrid, RawIoError> {
    if !path.exists() {
        return Err(RawIoError::FileNotFound(path.to_path_buf()));
    }
    let expected = rgb_byte_count(width, height)? as u64;
    let actual = file_size(path);
    if actual != expected {
        return Err(RawIoError::InvalidFileSize { expected, actual });
    }

    let bytes = fs::read(path).map_err(|source| RawIoError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("load_rgb_raw {} ({width}x{height})", path.display());
    rgb_grid_from_bytes(&bytes, width, height)
}

/// Writes a grayscale grid as raw bytes, creating parent directories.
///
/// # Errors
///
/// * `RawIoError::InvalidDimensions` - the grid is empty
/// * `RawIoError::WriteError` - the directory or file cannot be written
pub fn save_gray_raw(grid: &GrayGrid, path: &Path) -> Result<(), RawIoError> {
    if grid.is_empty() {
        return Err(RawIoError::InvalidDimensions {
            width: grid.width(),
            height: grid.height(),
        });
    }

    let write_error = |source| RawIoError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, gray_grid_to_bytes(grid)).map_err(write_error)?;
    debug!(
        "save_gray_raw {} ({}x{})",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(())
}
