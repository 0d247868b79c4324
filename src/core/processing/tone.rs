//! Tone shaping primitives: linear rescale, gamma tone curve, highlight clamp
//! and midtone darkening.
use crate::core::buffer::GrayImage;
use crate::core::processing::kernel::saturate_u8;

pub const SKETCH_GAMMA: f64 = 0.8;
pub const HIGHLIGHT_THRESHOLD: u8 = 250;
pub const DARK_BELOW: u8 = 180;
pub const LIGHT_ABOVE: u8 = 240;
pub const MIDTONE_OFFSET: u8 = 10;

/// Precomputed 256-entry gamma lookup: `255 * (i / 255)^(1 / gamma)`, truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCurve {
    table: [u8; 256],
}

impl ToneCurve {
    pub fn gamma(gamma: f64) -> Self {
        let inv_gamma = 1.0 / gamma;
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let v = (i as f64 / 255.0).powf(inv_gamma) * 255.0;
            *entry = v.clamp(0.0, 255.0) as u8;
        }
        Self { table }
    }

    #[inline]
    pub fn map(&self, v: u8) -> u8 {
        self.table[v as usize]
    }

    pub fn apply(&self, img: &GrayImage) -> GrayImage {
        img.mapv(|v| self.map(v))
    }
}

/// `clamp(|alpha * v + beta|, 0, 255)`, rounded.
pub fn linear_rescale(img: &GrayImage, alpha: f32, beta: f32) -> GrayImage {
    img.mapv(|v| saturate_u8((alpha * v as f32 + beta).abs()))
}

/// Force true highlights (`>= threshold`) to pure white. Computed as the pixel-wise
/// maximum against a binary highlight mask, so no sample ever gets darker.
pub fn clamp_highlights(img: &GrayImage, threshold: u8) -> GrayImage {
    img.mapv(|v| {
        let mask = if v >= threshold { 255 } else { 0 };
        v.max(mask)
    })
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ToneBand {
    Dark,
    Midtone,
    Light,
}

#[inline]
pub fn classify(v: u8) -> ToneBand {
    if v < DARK_BELOW {
        ToneBand::Dark
    } else if v > LIGHT_ABOVE {
        ToneBand::Light
    } else {
        ToneBand::Midtone
    }
}

/// Subtract a flat offset from midtone samples only, saturating at 0.
pub fn darken_midtones(img: &GrayImage, offset: u8) -> GrayImage {
    img.mapv(|v| match classify(v) {
        ToneBand::Midtone => v.saturating_sub(offset),
        ToneBand::Dark | ToneBand::Light => v,
    })
}
