// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gradient sky compositing and in-place sky enhancement, both blended through
// a soft `SkyMask`.

use image::{Rgb, RgbImage};
use lichtwerk_core::SkyStyle;
use tracing::{debug, instrument};

use super::SkyMask;
use crate::color::{hsv_to_rgb, rgb_to_hsv, to_u8};

/// Saturation gain at full mask weight and intensity 1.0 (`enhance_sky`).
pub const DRAMATIC_SATURATION: f32 = 0.6;
/// Value reduction at full mask weight and intensity 1.0 (`enhance_sky`).
pub const DRAMATIC_DARKEN: f32 = 0.15;

/// Top and bottom RGB anchors of a style's gradient at `intensity`.
///
/// Each anchor is scaled by a style-specific, intensity-dependent factor and
/// clamped to 0..=255.
pub fn sky_anchors(style: SkyStyle, intensity: f32) -> ([f32; 3], [f32; 3]) {
    let (top, top_scale, bottom, bottom_scale) = match style {
        SkyStyle::Blue => (
            [135.0, 206.0, 235.0],
            0.8 + 0.2 * intensity,
            [200.0, 230.0, 255.0],
            0.8 + 0.2 * intensity,
        ),
        SkyStyle::Sunset => (
            [255.0, 140.0, 100.0],
            0.7 + 0.3 * intensity,
            [255.0, 200.0, 150.0],
            0.8 + 0.2 * intensity,
        ),
        SkyStyle::Dramatic => (
            [100.0, 120.0, 150.0],
            0.6 + 0.4 * intensity,
            [180.0, 190.0, 210.0],
            0.8 + 0.2 * intensity,
        ),
    };
    let scale = |anchor: [f32; 3], factor: f32| anchor.map(|c| (c * factor).clamp(0.0, 255.0));
    (scale(top, top_scale), scale(bottom, bottom_scale))
}

/// Interpolation ratio for `row` of a frame `height` rows tall:
/// `(row / height) ^ (1 / intensity)`.
///
/// Intensity reshapes the curve rather than just the colours. Intensity 0
/// is not rejected; it yields ratio 0 for every row above the last.
pub fn gradient_ratio(row: u32, height: u32, intensity: f32) -> f32 {
    if height == 0 {
        return 0.0;
    }
    (row as f32 / height as f32).powf(1.0 / intensity)
}

/// Paint a vertical gradient for `style` into the masked region.
///
/// Per channel: `gradient * mask + original * (1 - mask)`, rounded to 8 bits.
/// Where the mask is 0 the original pixel is returned untouched.
#[instrument(skip(image, mask), fields(width = image.width(), height = image.height()))]
pub fn replace_sky(image: &RgbImage, mask: &SkyMask, style: SkyStyle, intensity: f32) -> RgbImage {
    let height = image.height();
    let (top, bottom) = sky_anchors(style, intensity);
    debug!(?top, ?bottom, "Sky gradient anchors");

    let rows: Vec<[f32; 3]> = (0..height)
        .map(|y| {
            let ratio = gradient_ratio(y, height, intensity);
            [0, 1, 2].map(|c| top[c] * (1.0 - ratio) + bottom[c] * ratio)
        })
        .collect();

    let mut output = image.clone();
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let weight = mask.weight(x, y);
        if weight <= 0.0 {
            continue;
        }
        let gradient = rows[y as usize];
        let Rgb(src) = *pixel;
        *pixel = Rgb([0, 1, 2].map(|c| {
            to_u8(gradient[c] * weight + src[c] as f32 * (1.0 - weight))
        }));
    }
    output
}

/// Deepen an existing sky instead of replacing it: within the mask raise
/// saturation by `mask * saturation_gain` and lower value by
/// `mask * darken`, then blend the result back through the mask.
pub fn enhance_sky(image: &RgbImage, mask: &SkyMask, saturation_gain: f32, darken: f32) -> RgbImage {
    let mut output = image.clone();
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let weight = mask.weight(x, y);
        if weight <= 0.0 {
            continue;
        }
        let Rgb([r, g, b]) = *pixel;
        let mut hsv = rgb_to_hsv(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        hsv.s = (hsv.s * (1.0 + weight * saturation_gain)).clamp(0.0, 1.0);
        hsv.v = (hsv.v * (1.0 - weight * darken)).clamp(0.0, 1.0);
        let (er, eg, eb) = hsv_to_rgb(hsv);
        let enhanced = [er * 255.0, eg * 255.0, eb * 255.0];
        let src = [r as f32, g as f32, b as f32];
        *pixel = Rgb([0, 1, 2].map(|c| to_u8(enhanced[c] * weight + src[c] * (1.0 - weight))));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([40, 50, 60]))
    }

    #[test]
    fn empty_mask_is_identity() {
        let img = RgbImage::from_fn(30, 20, |x, y| Rgb([(x * 8) as u8, (y * 12) as u8, 77]));
        let mask = SkyMask::empty(30, 20);
        for style in SkyStyle::ALL {
            assert_eq!(replace_sky(&img, &mask, style, 1.0), img);
        }
    }

    #[test]
    fn ratio_endpoints_at_unit_intensity() {
        assert_eq!(gradient_ratio(0, 100, 1.0), 0.0);
        assert!((gradient_ratio(99, 100, 1.0) - 0.99).abs() < 1e-6);
    }

    #[test]
    fn higher_intensity_bends_curve_upwards() {
        let linear = gradient_ratio(25, 100, 1.0);
        let strong = gradient_ratio(25, 100, 2.0);
        let weak = gradient_ratio(25, 100, 0.5);
        assert!(strong > linear && linear > weak);
    }

    #[test]
    fn zero_intensity_does_not_panic() {
        assert_eq!(gradient_ratio(10, 100, 0.0), 0.0);
        let img = dark(8, 8);
        let out = replace_sky(&img, &SkyMask::filled(8, 8, 1.0), SkyStyle::Blue, 0.0);
        assert_eq!(out.dimensions(), (8, 8));
    }

    /// With a full mask the first row is the top anchor and the last row is
    /// within one gradient step of the bottom anchor.
    #[test]
    fn full_mask_matches_anchors_at_edges() {
        let (w, h) = (16u32, 100u32);
        let img = dark(w, h);
        let out = replace_sky(&img, &SkyMask::filled(w, h, 1.0), SkyStyle::Blue, 1.0);
        let (top, bottom) = sky_anchors(SkyStyle::Blue, 1.0);

        let first = out.get_pixel(3, 0).0;
        let last = out.get_pixel(3, h - 1).0;
        for c in 0..3 {
            assert_eq!(first[c], top[c].round() as u8);
            let step = (bottom[c] - top[c]).abs() / h as f32;
            assert!((last[c] as f32 - bottom[c]).abs() <= step + 1.0, "channel {c}: {last:?}");
        }
    }

    #[test]
    fn half_mask_blends_halfway() {
        let img = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let out = replace_sky(&img, &SkyMask::filled(4, 4, 0.5), SkyStyle::Sunset, 1.0);
        let (top, _) = sky_anchors(SkyStyle::Sunset, 1.0);
        assert_eq!(out.get_pixel(0, 0).0[0], to_u8(top[0] * 0.5));
    }

    #[test]
    fn anchors_are_clamped() {
        let (top, bottom) = sky_anchors(SkyStyle::Sunset, 3.0);
        assert!(top.iter().chain(bottom.iter()).all(|&c| (0.0..=255.0).contains(&c)));
        assert_eq!(top[0], 255.0);
    }

    #[test]
    fn blue_anchors_at_unit_intensity() {
        let (top, bottom) = sky_anchors(SkyStyle::Blue, 1.0);
        let expected = [[135.0, 206.0, 235.0], [200.0, 230.0, 255.0]];
        for (got, want) in [top, bottom].iter().zip(expected.iter()) {
            for c in 0..3 {
                assert!((got[c] - want[c]).abs() < 1e-3, "{got:?} vs {want:?}");
            }
        }
    }

    #[test]
    fn enhance_sky_saturates_and_darkens_under_mask() {
        let img = RgbImage::from_pixel(4, 4, Rgb([120, 150, 200]));
        let out = enhance_sky(&img, &SkyMask::filled(4, 4, 1.0), DRAMATIC_SATURATION, DRAMATIC_DARKEN);
        let Rgb([r, _, b]) = *out.get_pixel(1, 1);
        assert!(b < 200, "value should drop, got blue {b}");
        assert!((b as i32 - r as i32) > 80, "spread should widen: {r} {b}");
    }

    #[test]
    fn enhance_sky_outside_mask_is_identity() {
        let img = RgbImage::from_pixel(4, 4, Rgb([120, 150, 200]));
        assert_eq!(enhance_sky(&img, &SkyMask::empty(4, 4), 0.6, 0.15), img);
    }
}
