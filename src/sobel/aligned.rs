//! Reusable, alignment-padded grayscale scratch buffer.
//!
//! Rows are `padded_width` bytes apart, where `padded_width` is the logical
//! width rounded up to a multiple of [`ROW_ALIGNMENT`]. Storage is built from
//! 32-byte aligned blocks, so every row starts on a 32-byte boundary. Padding
//! bytes are zeroed on allocation and never written afterwards.

use log::debug;

/// Row alignment in bytes, sized for 256-bit vector loads.
pub const ROW_ALIGNMENT: usize = 32;

#[derive(Clone, Copy)]
#[repr(C, align(32))]
struct AlignedBlock([u8; ROW_ALIGNMENT]);

const ZERO_BLOCK: AlignedBlock = AlignedBlock([0; ROW_ALIGNMENT]);

/// Rounds `width` up to the next multiple of [`ROW_ALIGNMENT`].
#[inline]
pub const fn padded_width(width: usize) -> usize {
    width.div_ceil(ROW_ALIGNMENT) * ROW_ALIGNMENT
}

/// Grayscale buffer cached across filter calls.
///
/// Reallocates only when asked for different dimensions.
#[derive(Default)]
pub struct AlignedGrayBuffer {
    blocks: Vec<AlignedBlock>,
    width: usize,
    height: usize,
    padded_width: usize,
}

impl AlignedGrayBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the buffer hold `width x height` logical pixels.
    ///
    /// Returns `true` when a new zero-filled allocation was made, `false` when
    /// the current buffer already matched.
    pub fn ensure(&mut self, width: usize, height: usize) -> bool {
        if self.is_allocated() && self.width == width && self.height == height {
            return false;
        }

        let padded_width = padded_width(width);
        let block_count = padded_width / ROW_ALIGNMENT * height;
        debug!(
            "AlignedGrayBuffer::ensure {}x{} -> {}x{} (padded width {padded_width})",
            self.width, self.height, width, height
        );
        self.blocks = vec![ZERO_BLOCK; block_count];
        self.width = width;
        self.height = height;
        self.padded_width = padded_width;
        true
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.blocks.is_empty()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in bytes.
    #[inline]
    pub fn padded_width(&self) -> usize {
        self.padded_width
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `AlignedBlock` is `repr(C)` around a byte array, so the
        // blocks are a contiguous run of initialized bytes with no padding.
        unsafe {
            std::slice::from_raw_parts(
                self.blocks.as_ptr().cast::<u8>(),
                self.blocks.len() * ROW_ALIGNMENT,
            )
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: see `as_slice`; the exclusive borrow of `self` covers the bytes.
        unsafe {
            std::slice::from_raw_parts_mut(
                self.blocks.as_mut_ptr().cast::<u8>(),
                self.blocks.len() * ROW_ALIGNMENT,
            )
        }
    }

    /// The `width` logical pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.padded_width;
        &self.as_slice()[start..start + self.width]
    }
}

impl std::fmt::Debug for AlignedGrayBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedGrayBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("padded_width", &self.padded_width)
            .field("bytes", &(self.blocks.len() * ROW_ALIGNMENT))
            .finish()
    }
}
