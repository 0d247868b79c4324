use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use tracing::info;

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::types::PixelLayout;

/// Default long-side cap applied before rendering.
pub const DEFAULT_MAX_DIMENSION: usize = 1500;

/// Target size when the long side exceeds `max_dimension`, `None` when no
/// downscale is needed. Aspect ratio is kept; the long side lands exactly on
/// the cap and the short side is truncated (never below 1).
pub fn calculate_resize_dimensions(
    original_cols: usize,
    original_rows: usize,
    max_dimension: usize,
) -> Option<(usize, usize)> {
    let long_side = original_cols.max(original_rows);
    if max_dimension == 0 || long_side <= max_dimension {
        return None;
    }
    let new_cols = (original_cols * max_dimension / long_side).max(1);
    let new_rows = (original_rows * max_dimension / long_side).max(1);
    Some((new_cols, new_rows))
}

pub fn resize_u8_image(
    data: Vec<u8>,
    pixel_type: PixelType,
    original_cols: usize,
    original_rows: usize,
    target_cols: usize,
    target_rows: usize,
) -> Result<Vec<u8>> {
    // Box convolution averages every covered source pixel, like area resampling
    let resize_options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(original_cols as u32, original_rows as u32, data, pixel_type)
        .map_err(|e| Error::Resize(e.to_string()))?;
    let mut dst_image = Image::new(target_cols as u32, target_rows as u32, pixel_type);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(|e| Error::Resize(e.to_string()))?;

    Ok(dst_image.into_vec())
}

/// Downscale `image` so its long side does not exceed `max_dimension`.
/// Images already within the cap (or `None`) are returned untouched.
pub fn limit_dimensions(image: PixelBuffer, max_dimension: Option<usize>) -> Result<PixelBuffer> {
    let Some(cap) = max_dimension else {
        return Ok(image);
    };
    let (cols, rows) = (image.width(), image.height());
    let Some((new_cols, new_rows)) = calculate_resize_dimensions(cols, rows, cap) else {
        return Ok(image);
    };

    info!(
        "Original size: {}x{}, New size: {}x{}",
        cols, rows, new_cols, new_rows
    );

    let layout = image.layout();
    let pixel_type = match layout {
        PixelLayout::Gray => PixelType::U8,
        PixelLayout::Rgb | PixelLayout::Bgr => PixelType::U8x3,
    };
    let resized = resize_u8_image(image.as_raw(), pixel_type, cols, rows, new_cols, new_rows)?;
    PixelBuffer::from_raw(new_cols, new_rows, layout, resized)
}
