// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detail / tone enhancement ("HDR-style").
//
// Two branches computed from the same source and blended:
//
// 1. Luma branch: split into L*a*b*, run contrast-limited adaptive histogram
//    equalisation (CLAHE) on L only, recombine.
// 2. Detail branch: smooth L with an edge-preserving domain-transform filter,
//    amplify the residual (L minus smoothed L), recombine.
//
// The result is `luma_weight * luma + (1 - luma_weight) * detail`.

use image::{GrayImage, Luma, Rgb, RgbImage};
use lichtwerk_core::config::DetailSettings;
use tracing::debug;

use crate::color::{Lab, lab_to_srgb8, srgb8_to_lab, to_u8};

/// Domain-transform iterations.
const DT_ITERATIONS: u32 = 3;

/// Smallest range sigma the domain filter accepts; tiny values would turn
/// the edge-stopping weights into NaN.
const MIN_SIGMA_RANGE: f32 = 1e-4;

/// Run the full luma + detail enhancement at the given intensity.
///
/// The CLAHE clip limit and the filter's range sigma both scale with
/// `intensity`.
pub fn tone_enhance(image: &RgbImage, intensity: f32, settings: &DetailSettings) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let lab: Vec<Lab> = image.pixels().map(|&px| srgb8_to_lab(px)).collect();

    // -- Luma branch ----------------------------------------------------------
    let lightness = GrayImage::from_fn(width, height, |x, y| {
        let l = lab[(y * width + x) as usize].l;
        Luma([to_u8(l * 255.0 / 100.0)])
    });
    let clip_limit = settings.clip_limit * intensity;
    let equalised = clahe(&lightness, clip_limit, settings.tile_grid);
    debug!(clip_limit, tile_grid = settings.tile_grid, "CLAHE applied to lightness");

    // -- Detail branch --------------------------------------------------------
    let l_norm: Vec<f32> = lab.iter().map(|p| p.l / 100.0).collect();
    let sigma_range = (settings.sigma_range * intensity).max(MIN_SIGMA_RANGE);
    let base = domain_transform(&l_norm, width, height, settings.sigma_spatial, sigma_range);
    debug!(sigma_spatial = settings.sigma_spatial, sigma_range, "Domain filter applied");

    // -- Recombine and blend --------------------------------------------------
    let weight = settings.luma_weight;
    let mut output = RgbImage::new(width, height);
    for (i, dst) in output.pixels_mut().enumerate() {
        let src = lab[i];
        let x = i as u32 % width;
        let y = i as u32 / width;

        let luma_px = lab_to_srgb8(Lab {
            l: equalised.get_pixel(x, y).0[0] as f32 * 100.0 / 255.0,
            ..src
        });

        let detail = l_norm[i] - base[i];
        let boosted = (base[i] + settings.detail_boost * detail) * 100.0;
        let detail_px = lab_to_srgb8(Lab {
            l: boosted.clamp(0.0, 100.0),
            ..src
        });

        let mut px = [0u8; 3];
        for c in 0..3 {
            px[c] = to_u8(
                luma_px.0[c] as f32 * weight + detail_px.0[c] as f32 * (1.0 - weight),
            );
        }
        *dst = Rgb(px);
    }
    output
}

// -- CLAHE --------------------------------------------------------------------

/// Contrast-limited adaptive histogram equalisation.
///
/// The image is split into `grid x grid` tiles (fewer if the image is smaller
/// than the grid). Each tile's histogram is clipped at
/// `clip_limit * tile_area / 256` counts, the excess redistributed evenly,
/// and the resulting lookup tables are bilinearly interpolated between tile
/// centres. A non-positive `clip_limit` disables clipping (plain adaptive
/// equalisation).
pub fn clahe(gray: &GrayImage, clip_limit: f32, grid: u32) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }

    let grid = grid.max(1);
    let tile_w = width.div_ceil(grid.min(width));
    let tile_h = height.div_ceil(grid.min(height));
    let tiles_x = width.div_ceil(tile_w);
    let tiles_y = height.div_ceil(tile_h);

    let mut luts: Vec<[u8; 256]> = Vec::with_capacity((tiles_x * tiles_y) as usize);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = (x0 + tile_w).min(width);
            let y1 = (y0 + tile_h).min(height);

            let mut histogram = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    histogram[gray.get_pixel(x, y).0[0] as usize] += 1;
                }
            }
            let area = (x1 - x0) * (y1 - y0);
            luts.push(tile_lut(&mut histogram, area, clip_limit));
        }
    }

    let lut_at = |tx: u32, ty: u32| &luts[(ty * tiles_x + tx) as usize];

    let mut output = GrayImage::new(width, height);
    for y in 0..height {
        let (ty0, ty1, ay) = neighbours(y, tile_h, tiles_y);
        for x in 0..width {
            let (tx0, tx1, ax) = neighbours(x, tile_w, tiles_x);
            let v = gray.get_pixel(x, y).0[0] as usize;

            let top = lut_at(tx0, ty0)[v] as f32 * (1.0 - ax) + lut_at(tx1, ty0)[v] as f32 * ax;
            let bottom = lut_at(tx0, ty1)[v] as f32 * (1.0 - ax) + lut_at(tx1, ty1)[v] as f32 * ax;
            output.put_pixel(x, y, Luma([to_u8(top * (1.0 - ay) + bottom * ay)]));
        }
    }
    output
}

/// Clip a tile histogram, redistribute the excess and build its lookup table.
fn tile_lut(histogram: &mut [u32; 256], area: u32, clip_limit: f32) -> [u8; 256] {
    if clip_limit > 0.0 {
        let clip = ((clip_limit * area as f32 / 256.0) as u32).max(1);
        let mut excess = 0u32;
        for count in histogram.iter_mut() {
            if *count > clip {
                excess += *count - clip;
                *count = clip;
            }
        }

        let bonus = excess / 256;
        let residual = (excess % 256) as usize;
        for count in histogram.iter_mut() {
            *count += bonus;
        }
        if residual > 0 {
            let step = (256 / residual).max(1);
            for i in (0..256).step_by(step).take(residual) {
                histogram[i] += 1;
            }
        }
    }

    let scale = 255.0 / area.max(1) as f32;
    let mut lut = [0u8; 256];
    let mut cumulative = 0u32;
    for (i, &count) in histogram.iter().enumerate() {
        cumulative += count;
        lut[i] = to_u8(cumulative as f32 * scale);
    }
    lut
}

/// Neighbouring tile indices and the interpolation weight towards the second
/// one, for a coordinate along one axis.
fn neighbours(pos: u32, tile: u32, tiles: u32) -> (u32, u32, f32) {
    let f = (pos as f32 + 0.5) / tile as f32 - 0.5;
    let first = (f.floor().max(0.0) as u32).min(tiles - 1);
    let second = (first + 1).min(tiles - 1);
    let weight = if first == second {
        0.0
    } else {
        (f - first as f32).clamp(0.0, 1.0)
    };
    (first, second, weight)
}

// -- Domain transform ---------------------------------------------------------

/// Edge-preserving smoothing of a single channel (recursive domain-transform
/// filter, Gastal & Oliveira 2011).
///
/// `channel` is row-major `width x height` in roughly [0,1]. Larger
/// `sigma_spatial` smooths wider; smaller `sigma_range` stops harder at edges.
pub fn domain_transform(
    channel: &[f32],
    width: u32,
    height: u32,
    sigma_spatial: f32,
    sigma_range: f32,
) -> Vec<f32> {
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(channel.len(), w * h);
    let ratio = sigma_spatial / sigma_range;

    // Domain-transform derivatives: 1 + (σs/σr)·|I'|.
    let mut dx = vec![1.0f32; w * h];
    let mut dy = vec![1.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            if x > 0 {
                dx[i] = 1.0 + ratio * (channel[i] - channel[i - 1]).abs();
            }
            if y > 0 {
                dy[i] = 1.0 + ratio * (channel[i] - channel[i - w]).abs();
            }
        }
    }

    let mut out = channel.to_vec();
    let n = DT_ITERATIONS as i32;
    let denom = (4.0f32.powi(n) - 1.0).sqrt();
    for i in 0..n {
        let sigma_h = sigma_spatial * 3.0f32.sqrt() * 2.0f32.powi(n - i - 1) / denom;
        let a = (-(2.0f32.sqrt()) / sigma_h).exp();

        // Horizontal pass, left-to-right then right-to-left.
        for y in 0..h {
            let row = y * w;
            for x in 1..w {
                let v = a.powf(dx[row + x]);
                out[row + x] += v * (out[row + x - 1] - out[row + x]);
            }
            for x in (0..w.saturating_sub(1)).rev() {
                let v = a.powf(dx[row + x + 1]);
                out[row + x] += v * (out[row + x + 1] - out[row + x]);
            }
        }

        // Vertical pass, top-to-bottom then bottom-to-top.
        for x in 0..w {
            for y in 1..h {
                let i = y * w + x;
                let v = a.powf(dy[i]);
                out[i] += v * (out[i - w] - out[i]);
            }
            for y in (0..h.saturating_sub(1)).rev() {
                let i = y * w + x;
                let v = a.powf(dy[i + w]);
                out[i] += v * (out[i + w] - out[i]);
            }
        }
    }
    out
}
