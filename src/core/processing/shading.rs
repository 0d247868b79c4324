//! Directional shading: simulated hatching in three principal directions.
//!
//! Each direction smears the grayscale image with its own stroke kernel and
//! color-dodges the stroke against a wide blur of its inverse. The three dodge
//! maps are averaged into one shading map.
use ndarray::{Array2, Zip};

use crate::core::buffer::GrayImage;
use crate::core::processing::kernel::{Kernel, filter2d, gaussian_blur, saturate_u8};

pub const STROKE_SIGMA: f64 = 1.0;
pub const STROKE_LENGTH: usize = 9;
pub const STROKE_DISC: usize = 5;
/// Inverse blur size; sigma is derived from the size.
pub const DODGE_BLUR_KSIZE: usize = 21;
pub const DODGE_SCALE: f32 = 256.0;
/// Smallest dodge denominator.
pub const DODGE_EPSILON: f32 = 1e-3;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StrokeDirection {
    Horizontal,
    Vertical,
    Isotropic,
}

impl StrokeDirection {
    pub const ALL: [StrokeDirection; 3] = [
        StrokeDirection::Horizontal,
        StrokeDirection::Vertical,
        StrokeDirection::Isotropic,
    ];

    pub fn kernel(&self) -> Kernel {
        match self {
            StrokeDirection::Horizontal => Kernel::gaussian(1, STROKE_LENGTH, STROKE_SIGMA),
            StrokeDirection::Vertical => Kernel::gaussian(STROKE_LENGTH, 1, STROKE_SIGMA),
            StrokeDirection::Isotropic => Kernel::gaussian(STROKE_DISC, STROKE_DISC, STROKE_SIGMA),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrokeDirection::Horizontal => "horizontal",
            StrokeDirection::Vertical => "vertical",
            StrokeDirection::Isotropic => "isotropic",
        }
    }
}

impl std::fmt::Display for StrokeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// `clamp(base * 256 / (255 - blend), 0, 255)` with the denominator kept away from zero.
#[inline]
pub fn color_dodge(base: u8, blend: u8) -> u8 {
    let denom = (255.0 - blend as f32).max(DODGE_EPSILON);
    saturate_u8(base as f32 * DODGE_SCALE / denom)
}

/// Shading map for a single stroke direction.
pub fn directional_shading(gray: &GrayImage, direction: StrokeDirection) -> GrayImage {
    let stroke = filter2d(gray, &direction.kernel());
    let inverse = stroke.mapv(|v| 255 - v);
    let blurred_inverse = gaussian_blur(&inverse, DODGE_BLUR_KSIZE, 0.0);
    Zip::from(&stroke)
        .and(&blurred_inverse)
        .map_collect(|&s, &b| color_dodge(s, b))
}

/// Pixel-wise mean of the per-direction shading maps, truncated.
pub fn synthesize_shading(gray: &GrayImage) -> GrayImage {
    let mut sum = Array2::<u32>::zeros(gray.dim());
    for direction in StrokeDirection::ALL {
        let shading = directional_shading(gray, direction);
        Zip::from(&mut sum).and(&shading).for_each(|acc, &v| *acc += v as u32);
    }
    let n = StrokeDirection::ALL.len() as u32;
    sum.mapv(|acc| (acc / n) as u8)
}
