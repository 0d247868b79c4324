use ndarray::{Array2, Axis};

use crate::core::buffer::{GrayImage, PixelBuffer};
use crate::core::processing::kernel::saturate_u8;
use crate::types::PixelLayout;

pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// Collapse a buffer to luma. Gray input is copied unchanged; color input is
/// weighted per its recorded channel order.
pub fn to_grayscale(image: &PixelBuffer) -> GrayImage {
    let data = image.data();
    let (wr, wg, wb) = match image.layout() {
        PixelLayout::Gray => return data.index_axis(Axis(2), 0).to_owned(),
        PixelLayout::Rgb => (0, 1, 2),
        PixelLayout::Bgr => (2, 1, 0),
    };
    let r = data.index_axis(Axis(2), wr);
    let g = data.index_axis(Axis(2), wg);
    let b = data.index_axis(Axis(2), wb);

    Array2::from_shape_fn((image.height(), image.width()), |idx| {
        saturate_u8(LUMA_R * r[idx] as f32 + LUMA_G * g[idx] as f32 + LUMA_B * b[idx] as f32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(layout: PixelLayout, px: [u8; 3]) -> u8 {
        let buf = PixelBuffer::from_raw(1, 1, layout, px.to_vec()).unwrap();
        to_grayscale(&buf)[(0, 0)]
    }

    #[test]
    fn pure_red_depends_on_channel_order() {
        // Red = 0.299 * 255 = 76.2, blue = 0.114 * 255 = 29.1
        assert_eq!(single(PixelLayout::Rgb, [255, 0, 0]), 76);
        assert_eq!(single(PixelLayout::Bgr, [0, 0, 255]), 76);
        // Same bytes read in the other order land on blue
        assert_eq!(single(PixelLayout::Bgr, [255, 0, 0]), 29);
    }

    #[test]
    fn pure_green_is_order_independent() {
        assert_eq!(single(PixelLayout::Rgb, [0, 255, 0]), 150);
        assert_eq!(single(PixelLayout::Bgr, [0, 255, 0]), 150);
    }

    #[test]
    fn white_stays_white() {
        assert_eq!(single(PixelLayout::Rgb, [255, 255, 255]), 255);
    }

    #[test]
    fn gray_input_is_returned_unchanged() {
        let buf = PixelBuffer::from_raw(2, 2, PixelLayout::Gray, vec![0, 64, 128, 255]).unwrap();
        let gray = to_grayscale(&buf);
        assert_eq!(gray.iter().copied().collect::<Vec<_>>(), vec![0, 64, 128, 255]);

        let again = to_grayscale(&PixelBuffer::from_gray(gray.clone()).unwrap());
        assert_eq!(again, gray);
    }
}
