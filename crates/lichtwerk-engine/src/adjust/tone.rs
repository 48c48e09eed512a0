// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global tone primitives — brightness, contrast, saturation.
//
// Each one interpolates between the image and a "degenerate" version of it:
// black for brightness, the mean grey for contrast, per-pixel grey for
// saturation. A factor of 1.0 is a no-op; results are clamped to 8 bits.

use image::{Rgb, RgbImage};

use crate::color::{luma, map_pixels};

/// Scale every channel by `factor` (blend towards black below 1.0).
pub fn brightness(image: &RgbImage, factor: f32) -> RgbImage {
    map_pixels(image, |[r, g, b]| [r * factor, g * factor, b * factor])
}

/// Push channels away from (or towards) the image's mean grey level.
pub fn contrast(image: &RgbImage, factor: f32) -> RgbImage {
    let mean = mean_luma(image).round();
    map_pixels(image, |[r, g, b]| {
        [
            mean + factor * (r - mean),
            mean + factor * (g - mean),
            mean + factor * (b - mean),
        ]
    })
}

/// Push channels away from (or towards) each pixel's own grey value.
pub fn saturation(image: &RgbImage, factor: f32) -> RgbImage {
    map_pixels(image, |[r, g, b]| {
        let grey = luma(r, g, b);
        [
            grey + factor * (r - grey),
            grey + factor * (g - grey),
            grey + factor * (b - grey),
        ]
    })
}

/// Mean Rec. 601 luma of the image, 0.0-255.0. Empty images report 0.
pub fn mean_luma(image: &RgbImage) -> f32 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let sum: f64 = image
        .pixels()
        .map(|&Rgb([r, g, b])| luma(r as f32, g as f32, b as f32) as f64)
        .sum();
    (sum / count as f64) as f32
}
