//! Multi-scale edge extraction.
//!
//! A band-pass Difference of Gaussians (fine blur minus coarse blur) is
//! normalized to [0,1] by its own range and pushed through a soft tanh knee,
//! giving continuous pencil-like edge strength instead of a binary mask.
//! Samples on the dark side of a transition (strongly negative DoG) come out
//! bright; flat regions, which sit at the middle of the band, come out near 0.
use ndarray::{Array2, Zip};

use crate::core::buffer::GrayImage;
use crate::core::processing::kernel::gaussian_blur;

pub const DOG_FINE_KSIZE: usize = 5;
pub const DOG_FINE_SIGMA: f64 = 1.0;
pub const DOG_COARSE_KSIZE: usize = 9;
pub const DOG_COARSE_SIGMA: f64 = 1.6;
/// Guard on the normalization denominator.
pub const DOG_EPSILON: f32 = 1e-6;
pub const EDGE_SOFTNESS: f32 = 10.0;
pub const EDGE_KNEE: f32 = 0.1;

/// `blur(5x5, 1.0) - blur(9x9, 1.6)` in floating point.
pub fn difference_of_gaussians(gray: &GrayImage) -> Array2<f32> {
    let fine = gaussian_blur(gray, DOG_FINE_KSIZE, DOG_FINE_SIGMA);
    let coarse = gaussian_blur(gray, DOG_COARSE_KSIZE, DOG_COARSE_SIGMA);
    Zip::from(&fine)
        .and(&coarse)
        .map_collect(|&f, &c| f as f32 - c as f32)
}

/// Rescale to [0,1] using the observed min/max.
///
/// A map without dynamic range (flat input) has every sample at the band
/// center and normalizes to a uniform 0.5.
pub fn normalize_band(dog: &Array2<f32>) -> Array2<f32> {
    let (min, max) = dog
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if range <= DOG_EPSILON {
        return Array2::from_elem(dog.dim(), 0.5);
    }
    dog.mapv(|v| (v - min) / (range + DOG_EPSILON))
}

/// `1 - tanh(10 * (n - 0.1))`, scaled by 255, saturated and truncated.
pub fn soft_threshold(normalized: &Array2<f32>) -> GrayImage {
    normalized.mapv(|n| {
        let response = 1.0 - (EDGE_SOFTNESS * (n - EDGE_KNEE)).tanh();
        (response * 255.0).clamp(0.0, 255.0) as u8
    })
}

pub fn extract_edges(gray: &GrayImage) -> GrayImage {
    let dog = difference_of_gaussians(gray);
    soft_threshold(&normalize_band(&dog))
}
