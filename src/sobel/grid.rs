use crate::error::GridError;
use image::{GrayImage, Luma, Rgb, RgbImage};

/// Element types a [`PixelGrid`] can hold.
///
/// `ZERO` is the value freshly allocated storage is filled with.
pub trait GridPixel: Copy + PartialEq + std::fmt::Debug {
    const ZERO: Self;
}

impl GridPixel for u8 {
    const ZERO: Self = 0;
}

impl GridPixel for i16 {
    const ZERO: Self = 0;
}

impl GridPixel for f64 {
    const ZERO: Self = 0.0;
}

impl GridPixel for Rgb<u8> {
    const ZERO: Self = Rgb([0, 0, 0]);
}

/// Dense row-major raster over a pixel type.
///
/// A non-empty grid always satisfies `data.len() == width * height` with both
/// dimensions positive; the empty grid is `0x0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Default for PixelGrid<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
        }
    }
}

/// RGB input raster.
pub type RgbGrid = PixelGrid<Rgb<u8>>;

/// Single-channel 8-bit raster.
pub type GrayGrid = PixelGrid<u8>;

impl<T: GridPixel> PixelGrid<T> {
    /// Allocates a zero-filled `width x height` grid.
    ///
    /// # Errors
    ///
    /// * `GridError::InvalidDimensions` - either dimension is zero, or the
    ///   pixel count does not fit in memory
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let len = element_count::<T>(width, height)?;
        Ok(Self {
            data: vec![T::ZERO; len],
            width,
            height,
        })
    }

    /// Wraps externally supplied row-major data.
    ///
    /// # Errors
    ///
    /// * `GridError::InvalidDimensions` - either dimension is zero, or
    ///   `data.len() != width * height`
    pub fn from_vec(data: Vec<T>, width: usize, height: usize) -> Result<Self, GridError> {
        if element_count::<T>(width, height)? != data.len() {
            return Err(GridError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, GridError>
    where
        F: FnMut(usize, usize) -> T,
    {
        element_count::<T>(width, height)?;
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Fills a new grid with a single value.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self, GridError> {
        let len = element_count::<T>(width, height)?;
        Ok(Self {
            data: vec![value; len],
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major pixel storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns row `y` as a slice of `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Bounds-checked shared access.
    ///
    /// # Errors
    ///
    /// * `GridError::OutOfRange` - `x >= width` or `y >= height`
    pub fn at(&self, x: usize, y: usize) -> Result<&T, GridError> {
        let index = self.index_of(x, y)?;
        Ok(&self.data[index])
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// * `GridError::OutOfRange` - `x >= width` or `y >= height`
    pub fn at_mut(&mut self, x: usize, y: usize) -> Result<&mut T, GridError> {
        let index = self.index_of(x, y)?;
        Ok(&mut self.data[index])
    }

    /// Returns the pixel at `(x, y)`, or `default` for any coordinate outside
    /// the grid, negative ones included.
    ///
    /// This is the zero-padding accessor used by convolution.
    #[inline]
    pub fn get_safe(&self, x: isize, y: isize, default: T) -> T {
        if x < 0 || y < 0 {
            return default;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return default;
        }
        self.data[y * self.width + x]
    }

    /// Overwrites the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// * `GridError::OutOfRange` - `x >= width` or `y >= height`
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), GridError> {
        *self.at_mut(x, y)? = value;
        Ok(())
    }

    /// Discards the current content and reallocates zero-filled storage.
    ///
    /// On error the grid is left untouched.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        let len = element_count::<T>(width, height)?;
        self.data.clear();
        self.data.resize(len, T::ZERO);
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Empties the grid to `0x0`.
    pub fn clear(&mut self) {
        self.data.clear();
        self.width = 0;
        self.height = 0;
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }
}

/// Pixel count of a `width x height` grid of `T`.
///
/// Rejects zero dimensions and counts whose byte size overflows `isize`.
fn element_count<T>(width: usize, height: usize) -> Result<usize, GridError> {
    width
        .checked_mul(height)
        .filter(|&len| len > 0)
        .filter(|&len| {
            len.checked_mul(std::mem::size_of::<T>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(GridError::InvalidDimensions {
            width,
            height,
            len: width.saturating_mul(height),
        })
}

/// `image` buffers address pixels with `u32` coordinates.
fn image_dimensions(width: usize, height: usize) -> Result<(u32, u32), GridError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(GridError::ExceedsImageLimits { width, height }),
    }
}

impl RgbGrid {
    /// Copies an `image` RGB buffer; a `0x0` buffer yields the empty grid.
    pub fn from_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Self::default();
        }
        Self {
            data: image.pixels().copied().collect(),
            width: width as usize,
            height: height as usize,
        }
    }

    /// Copies the grid into an `image` RGB buffer.
    ///
    /// # Errors
    ///
    /// * `GridError::ExceedsImageLimits` - a dimension does not fit in `u32`
    pub fn to_image(&self) -> Result<RgbImage, GridError> {
        let (width, height) = image_dimensions(self.width, self.height)?;
        Ok(RgbImage::from_fn(width, height, |x, y| {
            self.data[y as usize * self.width + x as usize]
        }))
    }
}

impl GrayGrid {
    /// Copies an `image` luma buffer; a `0x0` buffer yields the empty grid.
    pub fn from_image(image: &GrayImage) -> Self {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Self::default();
        }
        Self {
            data: image.pixels().map(|Luma([value])| *value).collect(),
            width: width as usize,
            height: height as usize,
        }
    }

    pub fn to_image(&self) -> Result<GrayImage, GridError> {
        let (width, height) = image_dimensions(self.width, self.height)?;
        Ok(GrayImage::from_fn(width, height, |x, y| {
            Luma([self.data[y as usize * self.width + x as usize]])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_with_zero_dimension_returns_invalid_dimensions() {
        assert!(matches!(
            GrayGrid::new(0, 3),
            Err(GridError::InvalidDimensions { width: 0, .. })
        ));
        assert!(matches!(
            RgbGrid::new(3, 0),
            Err(GridError::InvalidDimensions { height: 0, .. })
        ));
    }

    #[test]
    fn new_allocates_zeroed_storage() {
        let grid = RgbGrid::new(4, 3).unwrap();
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.len(), 12);
        assert!(grid.as_slice().iter().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn from_vec_with_length_mismatch_returns_invalid_dimensions() {
        let result = GrayGrid::from_vec(vec![1, 2, 3], 2, 2);
        assert_eq!(
            result,
            Err(GridError::InvalidDimensions {
                width: 2,
                height: 2,
                len: 3
            })
        );
    }

    #[test]
    fn at_and_set_are_bounds_checked() {
        let mut grid = GrayGrid::new(3, 2).unwrap();
        grid.set(2, 1, 42).unwrap();
        assert_eq!(*grid.at(2, 1).unwrap(), 42);
        assert_eq!(grid.as_slice()[5], 42);

        assert!(matches!(
            grid.at(3, 0),
            Err(GridError::OutOfRange { x: 3, y: 0, .. })
        ));
        assert!(matches!(
            grid.set(0, 2, 1),
            Err(GridError::OutOfRange { x: 0, y: 2, .. })
        ));
    }

    #[test]
    fn get_safe_returns_default_outside_grid() {
        let grid = GrayGrid::filled(2, 2, 9).unwrap();
        assert_eq!(grid.get_safe(1, 1, 0), 9);
        assert_eq!(grid.get_safe(-1, 0, 0), 0);
        assert_eq!(grid.get_safe(0, -3, 7), 7);
        assert_eq!(grid.get_safe(2, 0, 0), 0);
        assert_eq!(grid.get_safe(0, 2, 0), 0);
    }

    #[test]
    fn resize_discards_content_and_clear_empties() {
        let mut grid = GrayGrid::filled(2, 2, 5).unwrap();
        grid.resize(3, 1).unwrap();
        assert_eq!(grid.dimensions(), (3, 1));
        assert_eq!(grid.as_slice(), &[0, 0, 0]);

        assert!(grid.resize(0, 1).is_err());
        assert_eq!(grid.dimensions(), (3, 1));

        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.dimensions(), (0, 0));
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = PixelGrid::<i16>::from_fn(3, 2, |x, y| (y * 10 + x) as i16).unwrap();
        assert_eq!(grid.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid.row(1), &[10, 11, 12]);
    }

    #[test]
    fn overflowing_dimensions_return_invalid_dimensions() {
        assert!(matches!(
            GrayGrid::new(usize::MAX, 2),
            Err(GridError::InvalidDimensions { width: usize::MAX, height: 2, .. })
        ));
        // Fits in usize as a count but not as a byte size.
        assert!(RgbGrid::new(usize::MAX / 2, 1).is_err());
        assert!(GrayGrid::filled(2, usize::MAX, 1).is_err());
        assert!(PixelGrid::<f64>::from_fn(usize::MAX, usize::MAX, |_, _| 0.0).is_err());
        assert!(GrayGrid::from_vec(vec![0; 4], usize::MAX, 2).is_err());

        let mut grid = GrayGrid::filled(2, 2, 5).unwrap();
        assert!(grid.resize(usize::MAX, 3).is_err());
        assert_eq!(grid.dimensions(), (2, 2));
        assert_eq!(grid.as_slice(), &[5; 4]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn image_dimensions_reject_values_past_u32() {
        assert_eq!(image_dimensions(3, 2), Ok((3, 2)));
        assert_eq!(image_dimensions(0, 0), Ok((0, 0)));
        let too_wide = u32::MAX as usize + 1;
        assert_eq!(
            image_dimensions(too_wide, 1),
            Err(GridError::ExceedsImageLimits {
                width: too_wide,
                height: 1
            })
        );
        assert!(image_dimensions(1, too_wide).is_err());
    }

    #[test]
    fn image_round_trip_preserves_pixels() {
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 7]));
        let grid = RgbGrid::from_image(&image);
        assert_eq!(*grid.at(2, 1).unwrap(), Rgb([2, 1, 7]));
        assert_eq!(grid.to_image().unwrap(), image);

        let empty = GrayGrid::from_image(&GrayImage::new(0, 0));
        assert!(empty.is_empty());
    }
}
