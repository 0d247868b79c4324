//! `PixelBuffer`: the in-memory image handed to and returned by the renderer.
//!
//! Storage is an `ndarray::Array3<u8>` shaped `(rows, cols, channels)`; the
//! pipeline stages work on `GrayImage` (`Array2<u8>`, shaped `(rows, cols)`).
use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::error::{Error, Result};
use crate::types::PixelLayout;

/// Single-channel working image, indexed `[(row, col)]`.
pub type GrayImage = Array2<u8>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
    layout: PixelLayout,
}

impl PixelBuffer {
    /// Build a buffer from interleaved row-major samples.
    pub fn from_raw(width: usize, height: usize, layout: PixelLayout, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_buffer(width, height, "zero-sized image"));
        }
        let channels = layout.channels();
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(Error::invalid_buffer(
                width,
                height,
                format!(
                    "expected {} samples for {} layout, got {}",
                    expected,
                    layout,
                    data.len()
                ),
            ));
        }
        let data = Array3::from_shape_vec((height, width, channels), data)
            .map_err(|e| Error::invalid_buffer(width, height, e.to_string()))?;
        Ok(Self { data, layout })
    }

    pub fn from_gray(gray: GrayImage) -> Result<Self> {
        let (rows, cols) = gray.dim();
        if rows == 0 || cols == 0 {
            return Err(Error::invalid_buffer(cols, rows, "zero-sized image"));
        }
        Ok(Self {
            data: gray.insert_axis(Axis(2)),
            layout: PixelLayout::Gray,
        })
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    /// Interleaved row-major samples, copied out in standard order.
    pub fn as_raw(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    /// Sample at `(x, y)` for channel `c`.
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[(y, x, c)]
    }

    /// View of a single-channel buffer as a 2D image; `None` for color buffers.
    pub fn gray_view(&self) -> Option<ArrayView2<'_, u8>> {
        match self.layout {
            PixelLayout::Gray => Some(self.data.index_axis(Axis(2), 0)),
            PixelLayout::Rgb | PixelLayout::Bgr => None,
        }
    }

    /// Red-green-blue interleaved samples, swapping channels for `Bgr` input.
    /// Gray buffers are returned as-is (one sample per pixel).
    pub fn to_rgb_raw(&self) -> Vec<u8> {
        match self.layout {
            PixelLayout::Gray | PixelLayout::Rgb => self.as_raw(),
            PixelLayout::Bgr => {
                let mut out = Vec::with_capacity(self.data.len());
                for px in self.data.lanes(Axis(2)) {
                    out.extend_from_slice(&[px[2], px[1], px[0]]);
                }
                out
            }
        }
    }
}
