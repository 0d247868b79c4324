//! Tonal compositor: fan-in of the edge, shading and texture maps into the
//! final sketch, followed by contrast and tone shaping.
use ndarray::Zip;
use tracing::debug;

use crate::core::buffer::GrayImage;
use crate::core::processing::clahe::{CLAHE_CLIP_LIMIT, CLAHE_TILES, clahe};
use crate::core::processing::kernel::{gaussian_blur, saturate_u8};
use crate::core::processing::tone::{
    HIGHLIGHT_THRESHOLD, MIDTONE_OFFSET, SKETCH_GAMMA, ToneCurve, clamp_highlights,
    darken_midtones, linear_rescale,
};
use crate::error::{Error, Result};

pub const EDGE_WEIGHT: f32 = 0.4;
pub const SHADING_WEIGHT: f32 = 0.6;
pub const BASE_WEIGHT: f32 = 0.92;
pub const TEXTURE_WEIGHT: f32 = 0.08;
pub const RESCALE_ALPHA: f32 = 1.1;
pub const RESCALE_BETA: f32 = 5.0;
pub const SOFTEN_KSIZE: usize = 3;
pub const SOFTEN_SIGMA: f64 = 0.3;

/// `clamp(round(wa * a + wb * b))`; both inputs must share dimensions.
pub fn blend_weighted(a: &GrayImage, wa: f32, b: &GrayImage, wb: f32) -> Result<GrayImage> {
    if a.dim() != b.dim() {
        let (rows, cols) = a.dim();
        return Err(Error::invalid_buffer(
            cols,
            rows,
            format!("cannot blend with a {}x{} buffer", b.ncols(), b.nrows()),
        ));
    }
    Ok(Zip::from(a)
        .and(b)
        .map_collect(|&x, &y| saturate_u8(wa * x as f32 + wb * y as f32)))
}

pub fn compose_sketch(
    edges: &GrayImage,
    shading: &GrayImage,
    texture: &GrayImage,
) -> Result<GrayImage> {
    let sketch = blend_weighted(edges, EDGE_WEIGHT, shading, SHADING_WEIGHT)?;
    let sketch = blend_weighted(&sketch, BASE_WEIGHT, texture, TEXTURE_WEIGHT)?;

    let sketch = clahe(&sketch, CLAHE_TILES, CLAHE_TILES, CLAHE_CLIP_LIMIT);
    let sketch = linear_rescale(&sketch, RESCALE_ALPHA, RESCALE_BETA);
    let sketch = ToneCurve::gamma(SKETCH_GAMMA).apply(&sketch);
    let sketch = gaussian_blur(&sketch, SOFTEN_KSIZE, SOFTEN_SIGMA);

    let sketch = clamp_highlights(&sketch, HIGHLIGHT_THRESHOLD);
    let sketch = darken_midtones(&sketch, MIDTONE_OFFSET);
    debug!(
        "Composited sketch {}x{}",
        sketch.ncols(),
        sketch.nrows()
    );
    Ok(sketch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_rejects_mismatched_dimensions() {
        let a = GrayImage::zeros((4, 4));
        let b = GrayImage::zeros((4, 5));
        let err = blend_weighted(&a, 0.5, &b, 0.5).unwrap_err();
        assert!(matches!(err, Error::InvalidBuffer { width: 4, height: 4, .. }));
        assert!(compose_sketch(&a, &a, &b).is_err());
    }

    #[test]
    fn blend_weights_and_saturates() {
        let a = GrayImage::from_elem((1, 1), 200);
        let b = GrayImage::from_elem((1, 1), 100);
        assert_eq!(blend_weighted(&a, 0.4, &b, 0.6).unwrap()[(0, 0)], 140);
        assert_eq!(blend_weighted(&a, 1.0, &a, 1.0).unwrap()[(0, 0)], 255);
    }

    #[test]
    fn dark_edges_on_white_shading_stay_in_range() {
        let edges = GrayImage::from_shape_fn((32, 32), |(r, c)| if (r + c) % 7 == 0 { 255 } else { 0 });
        let shading = GrayImage::from_elem((32, 32), 255);
        let texture = GrayImage::from_elem((32, 32), 128);
        let out = compose_sketch(&edges, &shading, &texture).unwrap();
        assert_eq!(out.dim(), (32, 32));
        // Midtone darkening leaves nothing in (230, 240]
        assert!(out.iter().all(|&v| !(231..=240).contains(&v)));
    }
}
