//! Paper grain: additive Gaussian noise followed by an edge-preserving
//! bilateral smoothing pass, so grain survives near edges and fades in flat areas.
use ndarray::{Array2, Zip};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::core::buffer::GrayImage;
use crate::core::processing::kernel::{reflect101, saturate_u8};

pub const GRAIN_SIGMA: f64 = 3.0;
pub const BILATERAL_DIAMETER: usize = 9;
pub const BILATERAL_SIGMA_COLOR: f32 = 50.0;
pub const BILATERAL_SIGMA_SPACE: f32 = 50.0;

/// Add zero-mean Gaussian noise to every sample, clamp to [0,255] and truncate.
/// Samples are drawn in row-major order, so a seeded generator is reproducible.
pub fn add_grain<R: Rng + ?Sized>(gray: &GrayImage, rng: &mut R) -> GrayImage {
    gray.mapv(|v| {
        let z: f64 = rng.sample(StandardNormal);
        (v as f64 + GRAIN_SIGMA * z).clamp(0.0, 255.0) as u8
    })
}

/// Bilateral filter over a circular window of the given diameter.
pub fn bilateral_filter(
    src: &GrayImage,
    diameter: usize,
    sigma_color: f32,
    sigma_space: f32,
) -> GrayImage {
    let (rows, cols) = src.dim();
    let radius = (diameter / 2) as isize;
    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let space_coeff = -0.5 / (sigma_space * sigma_space);

    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = (dy * dy + dx * dx) as f32;
            if d2.sqrt() > radius as f32 {
                continue;
            }
            offsets.push((dy, dx, (d2 * space_coeff).exp()));
        }
    }

    let mut out = Array2::<u8>::zeros((rows, cols));
    Zip::indexed(&mut out).par_for_each(|(r, c), o| {
        let center = src[(r, c)] as f32;
        let mut sum = 0.0f32;
        let mut weight_sum = 0.0f32;
        for &(dy, dx, space_w) in &offsets {
            let sr = reflect101(r as isize + dy, rows);
            let sc = reflect101(c as isize + dx, cols);
            let v = src[(sr, sc)] as f32;
            let diff = v - center;
            let w = space_w * (diff * diff * color_coeff).exp();
            sum += v * w;
            weight_sum += w;
        }
        *o = if weight_sum > 0.0 {
            saturate_u8(sum / weight_sum)
        } else {
            src[(r, c)]
        };
    });
    out
}

/// Grain texture for the compositor: noise, then bilateral smoothing.
pub fn synthesize_texture<R: Rng + ?Sized>(gray: &GrayImage, rng: &mut R) -> GrayImage {
    let grainy = add_grain(gray, rng);
    bilateral_filter(
        &grainy,
        BILATERAL_DIAMETER,
        BILATERAL_SIGMA_COLOR,
        BILATERAL_SIGMA_SPACE,
    )
}
