//! 8-bit images with interleaved channels.
//!
//! - `ImageU8` is a borrowed, read-only view (`stride` counts samples between
//!   rows, so a view can address a sub-region of a larger buffer).
//! - `ImageBufU8` owns its samples with `stride == w * channels`; resampled
//!   pyramid levels and decoded files are stored this way.
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub channels: usize,
    pub stride: usize, // samples between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// View over a tightly packed buffer (`stride == w * channels`).
    pub fn new(w: usize, h: usize, channels: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            channels,
            stride: w * channels,
            data,
        }
    }

    /// Single-channel view over a tightly packed buffer.
    pub fn gray(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self::new(w, h, 1, data)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[y * self.stride + x * self.channels + c]
    }

    /// All channel samples of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &'a [u8] {
        let start = y * self.stride + x * self.channels;
        &self.data[start..start + self.channels]
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Whether `data` is long enough to back every row the view claims.
    pub fn is_well_formed(&self) -> bool {
        if self.channels == 0 || self.stride < self.row_len() {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        let needed = (self.h - 1) * self.stride + self.row_len();
        self.data.len() >= needed
    }

    /// Zero-copy view of the `w × h` region whose top-left pixel is (x, y).
    ///
    /// # Panics
    /// Panics if the region extends beyond the view.
    pub fn sub_view(&self, x: usize, y: usize, w: usize, h: usize) -> ImageU8<'a> {
        assert!(
            x + w <= self.w && y + h <= self.h,
            "sub_view region ({x},{y},{w},{h}) exceeds image bounds ({},{})",
            self.w,
            self.h,
        );
        let start = y * self.stride + x * self.channels;
        let end = if h == 0 {
            start
        } else {
            (y + h - 1) * self.stride + (x + w) * self.channels
        };
        ImageU8 {
            w,
            h,
            channels: self.channels,
            stride: self.stride,
            data: &self.data[start..end],
        }
    }

    /// Copy the view into a tightly packed owned buffer.
    pub fn to_buffer(&self) -> ImageBufU8 {
        let mut out = ImageBufU8::new(self.w, self.h, self.channels);
        for y in 0..self.h {
            out.row_mut(y).copy_from_slice(self.row(y));
        }
        out
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.row_len()]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        let len = self.row_len();
        (self.stride == len).then_some(&self.data[..len * self.h])
    }
}

/// Owned 8-bit buffer in row-major layout (`stride == w * channels`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBufU8 {
    pub w: usize,
    pub h: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl ImageBufU8 {
    /// Construct a zero-initialized buffer of size `w × h × channels`.
    pub fn new(w: usize, h: usize, channels: usize) -> Self {
        Self {
            w,
            h,
            channels,
            data: vec![0; w * h * channels],
        }
    }

    /// Wrap existing samples; `None` if the length does not match the shape.
    pub fn from_raw(w: usize, h: usize, channels: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == w * h * channels).then_some(Self {
            w,
            h,
            channels,
            data,
        })
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8::new(self.w, self.h, self.channels, &self.data)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[(y * self.w + x) * self.channels + c]
    }
}

impl ImageView for ImageBufU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w * self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let len = self.row_len();
        let start = y * len;
        &self.data[start..start + len]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

impl ImageViewMut for ImageBufU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let len = self.row_len();
        let start = y * len;
        &mut self.data[start..start + len]
    }
}
