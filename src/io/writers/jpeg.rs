use jpeg_encoder::{ColorType, Encoder};

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::types::PixelLayout;

fn jpeg_dims(image: &PixelBuffer) -> Result<(u16, u16)> {
    let cols = u16::try_from(image.width())
        .map_err(|_| Error::Encode(format!("width {} exceeds JPEG limit", image.width())))?;
    let rows = u16::try_from(image.height())
        .map_err(|_| Error::Encode(format!("height {} exceeds JPEG limit", image.height())))?;
    Ok((cols, rows))
}

fn color_type(image: &PixelBuffer) -> ColorType {
    match image.layout() {
        PixelLayout::Gray => ColorType::Luma,
        PixelLayout::Rgb | PixelLayout::Bgr => ColorType::Rgb,
    }
}

/// Encode into an in-memory JPEG. Color buffers are written as RGB.
pub fn encode_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>> {
    let (cols, rows) = jpeg_dims(image)?;
    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, quality);
    encoder
        .encode(&image.to_rgb_raw(), cols, rows, color_type(image))
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn gray_and_color_buffers_encode() {
        let gray = PixelBuffer::from_gray(Array2::from_elem((8, 8), 120)).unwrap();
        let color = PixelBuffer::from_raw(8, 8, PixelLayout::Bgr, vec![10; 8 * 8 * 3]).unwrap();
        for image in [gray, color] {
            let bytes = encode_jpeg(&image, 90).unwrap();
            assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        }
    }
}
