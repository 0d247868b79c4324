use std::fs;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::types::PixelLayout;

/// Encode into an in-memory PNG. Color buffers are written as RGB.
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>> {
    let color_type = match image.layout() {
        PixelLayout::Gray => ExtendedColorType::L8,
        PixelLayout::Rgb | PixelLayout::Bgr => ExtendedColorType::Rgb8,
    };
    let mut png_bytes: Vec<u8> = Vec::new();
    PngEncoder::new(&mut png_bytes)
        .write_image(
            &image.to_rgb_raw(),
            image.width() as u32,
            image.height() as u32,
            color_type,
        )
        .map_err(|e| Error::Encode(format!("PNG encoding failed: {e}")))?;
    Ok(png_bytes)
}

pub fn write_png(output: &Path, image: &PixelBuffer) -> Result<()> {
    fs::write(output, encode_png(image)?)?;
    Ok(())
}
