//! Contrast Limited Adaptive Histogram Equalization.
//!
//! Design
//! - The image is split into a `tiles_x` × `tiles_y` grid. When the size is not a
//!   multiple of the grid, tiles are sized for the image padded (reflect-101) to
//!   the next multiple, so every tile has the same area.
//! - Each tile histogram is clipped at `max(clip_limit * area / 256, 1)`; the
//!   clipped excess is spread evenly over all 256 bins, which bounds the slope of
//!   the tile's mapping (and therefore noise amplification) to `clip_limit`.
//! - The equalization LUT is the scaled CDF of the clipped histogram.
//! - Output pixels bilinearly interpolate the LUTs of the four nearest tile
//!   centers; pixels outside the outermost centers clamp to the edge tiles.
use ndarray::Zip;

use crate::core::buffer::GrayImage;
use crate::core::processing::kernel::{reflect101, saturate_u8};

pub const CLAHE_TILES: usize = 8;
pub const CLAHE_CLIP_LIMIT: f32 = 3.5;

const BINS: usize = 256;

struct TileGrid {
    tiles_x: usize,
    tiles_y: usize,
    tile_w: usize,
    tile_h: usize,
}

impl TileGrid {
    fn new(rows: usize, cols: usize, tiles_x: usize, tiles_y: usize) -> Self {
        let tiles_x = tiles_x.max(1);
        let tiles_y = tiles_y.max(1);
        Self {
            tiles_x,
            tiles_y,
            tile_w: cols.div_ceil(tiles_x),
            tile_h: rows.div_ceil(tiles_y),
        }
    }

    fn area(&self) -> usize {
        self.tile_w * self.tile_h
    }
}

/// Equalization LUT of one tile after clipping.
fn tile_lut(src: &GrayImage, grid: &TileGrid, tx: usize, ty: usize, clip: f32) -> [u8; BINS] {
    let (rows, cols) = src.dim();
    let mut hist = [0.0f32; BINS];
    for r in ty * grid.tile_h..(ty + 1) * grid.tile_h {
        let sr = reflect101(r as isize, rows);
        for c in tx * grid.tile_w..(tx + 1) * grid.tile_w {
            let sc = reflect101(c as isize, cols);
            hist[src[(sr, sc)] as usize] += 1.0;
        }
    }

    let mut excess = 0.0f32;
    for h in hist.iter_mut() {
        if *h > clip {
            excess += *h - clip;
            *h = clip;
        }
    }
    let redistributed = excess / BINS as f32;

    let scale = 255.0 / grid.area() as f32;
    let mut lut = [0u8; BINS];
    let mut cdf = 0.0f32;
    for (bin, h) in hist.iter().enumerate() {
        cdf += h + redistributed;
        lut[bin] = saturate_u8(cdf * scale);
    }
    lut
}

/// Tile index pair and the weight of the second tile along one axis.
#[inline]
fn interpolation_axis(pos: usize, tile_size: usize, tiles: usize) -> (usize, usize, f32) {
    let f = pos as f32 / tile_size as f32 - 0.5;
    let t1 = f.floor();
    let weight = f - t1;
    let t1 = t1 as isize;
    let lo = t1.max(0) as usize;
    let hi = ((t1 + 1).max(0) as usize).min(tiles - 1);
    (lo.min(tiles - 1), hi, weight)
}

pub fn clahe(src: &GrayImage, tiles_x: usize, tiles_y: usize, clip_limit: f32) -> GrayImage {
    let (rows, cols) = src.dim();
    let grid = TileGrid::new(rows, cols, tiles_x, tiles_y);
    let clip = (clip_limit * grid.area() as f32 / BINS as f32).max(1.0);

    let mut luts = Vec::with_capacity(grid.tiles_x * grid.tiles_y);
    for ty in 0..grid.tiles_y {
        for tx in 0..grid.tiles_x {
            luts.push(tile_lut(src, &grid, tx, ty, clip));
        }
    }

    let mut out = GrayImage::zeros((rows, cols));
    Zip::indexed(&mut out)
        .and(src)
        .par_for_each(|(r, c), o, &v| {
            let (x1, x2, xa) = interpolation_axis(c, grid.tile_w, grid.tiles_x);
            let (y1, y2, ya) = interpolation_axis(r, grid.tile_h, grid.tiles_y);
            let lut = |ty: usize, tx: usize| luts[ty * grid.tiles_x + tx][v as usize] as f32;
            let top = lut(y1, x1) * (1.0 - xa) + lut(y1, x2) * xa;
            let bottom = lut(y2, x1) * (1.0 - xa) + lut(y2, x2) * xa;
            *o = saturate_u8(top * (1.0 - ya) + bottom * ya);
        });
    out
}
