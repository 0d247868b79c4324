//! Shared filtering primitives: Gaussian kernels, 2D correlation and separable
//! Gaussian blur over 8-bit images.
//!
//! All filters accumulate in `f32`, round and saturate back to `u8`, and extend
//! borders by reflection without repeating the edge sample (`dcb|abcd|cba`).
//! Reflection is periodic, so kernels wider than the image are handled too.
use ndarray::Array2;

use crate::core::buffer::GrayImage;

/// A small 2D weight matrix summing to 1.0, anchored at its center.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Array2<f32>,
}

impl Kernel {
    /// Outer product of a `rows`-tap and a `cols`-tap Gaussian with the same sigma,
    /// renormalized to unit sum.
    pub fn gaussian(rows: usize, cols: usize, sigma: f64) -> Self {
        let col_k = gaussian_1d(rows, sigma);
        let row_k = gaussian_1d(cols, sigma);
        let mut weights = Array2::from_shape_fn((rows, cols), |(i, j)| col_k[i] * row_k[j]);
        let sum = weights.sum();
        if sum > 0.0 {
            weights.mapv_inplace(|w| w / sum);
        }
        Self { weights }
    }

    pub fn rows(&self) -> usize {
        self.weights.nrows()
    }

    pub fn cols(&self) -> usize {
        self.weights.ncols()
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }
}

/// Sampled 1D Gaussian of `n` taps normalized to unit sum.
/// A non-positive sigma is derived from the size: `0.3 * ((n - 1) / 2 - 1) + 0.8`.
pub fn gaussian_1d(n: usize, sigma: f64) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((n as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let center = (n as f64 - 1.0) * 0.5;
    let scale = -0.5 / (sigma * sigma);
    let raw: Vec<f64> = (0..n)
        .map(|i| {
            let x = i as f64 - center;
            (scale * x * x).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|w| (w / sum) as f32).collect()
}

/// Border index for reflect-101 extension of a line of `n` samples.
#[inline]
pub(crate) fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let mut i = i.rem_euclid(period);
    if i >= n {
        i = period - i;
    }
    i as usize
}

#[inline]
pub(crate) fn saturate_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Correlate `src` with a full 2D kernel (no flipping; all kernels used here are symmetric).
pub fn filter2d(src: &GrayImage, kernel: &Kernel) -> GrayImage {
    let (rows, cols) = src.dim();
    let (kr, kc) = (kernel.rows(), kernel.cols());
    let (ar, ac) = ((kr / 2) as isize, (kc / 2) as isize);
    let weights = kernel.weights();

    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let mut acc = 0.0f32;
        for i in 0..kr {
            let sr = reflect101(r as isize + i as isize - ar, rows);
            for j in 0..kc {
                let sc = reflect101(c as isize + j as isize - ac, cols);
                acc += weights[(i, j)] * src[(sr, sc)] as f32;
            }
        }
        saturate_u8(acc)
    })
}

/// Apply a horizontal then a vertical 1D kernel, rounding only once at the end.
pub fn separable_filter(src: &GrayImage, row_kernel: &[f32], col_kernel: &[f32]) -> GrayImage {
    let (rows, cols) = src.dim();
    let hr = (row_kernel.len() / 2) as isize;
    let vr = (col_kernel.len() / 2) as isize;

    let horizontal = Array2::from_shape_fn((rows, cols), |(r, c)| {
        row_kernel
            .iter()
            .enumerate()
            .map(|(j, &w)| w * src[(r, reflect101(c as isize + j as isize - hr, cols))] as f32)
            .sum::<f32>()
    });

    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let acc = col_kernel
            .iter()
            .enumerate()
            .map(|(i, &w)| w * horizontal[(reflect101(r as isize + i as isize - vr, rows), c)])
            .sum::<f32>();
        saturate_u8(acc)
    })
}

/// Square `ksize`×`ksize` Gaussian blur. `sigma <= 0` derives sigma from `ksize`.
pub fn gaussian_blur(src: &GrayImage, ksize: usize, sigma: f64) -> GrayImage {
    let k = gaussian_1d(ksize, sigma);
    separable_filter(src, &k, &k)
}
