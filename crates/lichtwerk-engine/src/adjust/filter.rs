// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Neighbourhood primitives — smoothing, sharpness, soft glow.

use image::{Rgb, Rgb32FImage, RgbImage};
use imageproc::filter::{filter3x3, gaussian_blur_f32};

use crate::color::to_u8;

/// 3x3 smoothing kernel, row-major (centre-weighted, sums to 13).
const SMOOTH_KERNEL: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];
const SMOOTH_WEIGHT: f32 = 13.0;

/// Blur radius of the glow layer.
pub const GLOW_SIGMA: f32 = 10.0;

/// Light 3x3 centre-weighted smoothing.
///
/// Border pixels are smoothed too: taps that fall outside the frame reuse the
/// nearest edge pixel.
pub fn smooth(image: &RgbImage) -> RgbImage {
    if image.width() == 0 || image.height() == 0 {
        return image.clone();
    }

    // Integer weights keep the sums exact; normalise and round afterwards.
    let sums: Rgb32FImage = filter3x3::<_, f32, f32>(image, &SMOOTH_KERNEL);
    let mut output = RgbImage::new(image.width(), image.height());
    for (src, dst) in sums.pixels().zip(output.pixels_mut()) {
        *dst = Rgb(src.0.map(|c| to_u8(c / SMOOTH_WEIGHT)));
    }
    output
}

/// Linear blend `a * (1 - weight) + b * weight`, clamped to 8 bits.
///
/// Both images must share dimensions; `weight` outside [0,1] extrapolates.
pub fn blend(a: &RgbImage, b: &RgbImage, weight: f32) -> RgbImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    let mut output = RgbImage::new(a.width(), a.height());
    for ((pa, pb), dst) in a.pixels().zip(b.pixels()).zip(output.pixels_mut()) {
        let mut px = [0u8; 3];
        for c in 0..3 {
            px[c] = to_u8(pa.0[c] as f32 * (1.0 - weight) + pb.0[c] as f32 * weight);
        }
        *dst = Rgb(px);
    }
    output
}

/// Sharpness enhancement: extrapolate away from the smoothed image.
///
/// 1.0 is a no-op, above 1.0 sharpens, below 1.0 softens.
pub fn sharpness(image: &RgbImage, factor: f32) -> RgbImage {
    let smoothed = smooth(image);
    blend(&smoothed, image, factor)
}

/// Soft glow: blend a heavy Gaussian blur over the image with `weight`.
pub fn soft_glow(image: &RgbImage, weight: f32) -> RgbImage {
    if image.width() == 0 || image.height() == 0 {
        return image.clone();
    }
    let blurred = gaussian_blur_f32(image, GLOW_SIGMA);
    blend(image, &blurred, weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(size: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 { Rgb([200; 3]) } else { Rgb([60; 3]) }
        })
    }

    #[test]
    fn smooth_keeps_flat_regions() {
        let img = RgbImage::from_pixel(6, 6, Rgb([90, 140, 30]));
        assert_eq!(smooth(&img), img);
    }

    /// A corner pixel sees its out-of-frame neighbours as copies of the
    /// nearest edge pixels, so only the diagonal neighbour contributes.
    #[test]
    fn smooth_replicates_edge_pixels() {
        let img = RgbImage::from_fn(3, 3, |x, y| if (x, y) == (1, 1) { Rgb([130; 3]) } else { Rgb([0; 3]) });
        let out = smooth(&img);
        assert_eq!(out.get_pixel(0, 0).0, [10; 3]);
        assert_eq!(out.get_pixel(2, 2).0, [10; 3]);
        assert_eq!(out.get_pixel(1, 1).0, [50; 3]);
    }

    #[test]
    fn smooth_reduces_checkerboard_amplitude() {
        let img = checker(6);
        let out = smooth(&img);
        let centre = out.get_pixel(2, 2).0[0];
        assert!(centre < 200 && centre > 60);
    }

    #[test]
    fn sharpness_unit_factor_is_identity() {
        let img = checker(5);
        assert_eq!(sharpness(&img, 1.0), img);
    }

    #[test]
    fn sharpness_boost_increases_local_contrast() {
        let img = RgbImage::from_fn(9, 9, |x, _| if x < 4 { Rgb([100; 3]) } else { Rgb([150; 3]) });
        let out = sharpness(&img, 2.0);
        assert!(out.get_pixel(3, 4).0[0] < 100);
        assert!(out.get_pixel(4, 4).0[0] > 150);
    }

    #[test]
    fn blend_endpoints() {
        let a = RgbImage::from_pixel(2, 2, Rgb([0; 3]));
        let b = RgbImage::from_pixel(2, 2, Rgb([200; 3]));
        assert_eq!(blend(&a, &b, 0.0), a);
        assert_eq!(blend(&a, &b, 1.0), b);
        assert_eq!(blend(&a, &b, 0.25).get_pixel(0, 0).0, [50; 3]);
    }

    #[test]
    fn zero_glow_is_identity() {
        let img = checker(12);
        assert_eq!(soft_glow(&img, 0.0), img);
    }

    #[test]
    fn glow_pulls_towards_local_average() {
        let img = checker(24);
        let out = soft_glow(&img, 0.3);
        let bright = out.get_pixel(12, 12).0[0];
        assert!(bright < 200 && bright > 130, "got {bright}");
        assert_eq!(out.dimensions(), img.dimensions());
    }
}
