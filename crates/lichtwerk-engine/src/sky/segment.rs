// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Heuristic sky segmentation.
//
// No single threshold separates sky from walls and rooflines under listing
// lighting, so two cheap candidate masks are unioned and then cleaned up:
//
// 1. Search only the rows above the horizon (top half by default).
// 2. Brightness candidate: HSV value at or above a floor.
// 3. Hue candidate: hue inside a blue band with saturation and value floors.
// 4. Union, embedded into a full-frame mask (rows below the horizon are 0).
// 5. Morphological closing (merge nearby fragments) then opening (drop
//    isolated speckle) with a square structuring element.
// 6. Gaussian feathering, normalised to [0, 1].

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{close, open};
use lichtwerk_core::config::SkyDetection;
use tracing::{debug, instrument};

use super::SkyMask;
use crate::color::rgb_to_hsv;

/// Detect sky-like pixels and return a feathered soft mask.
///
/// Deterministic and pure. Images without sky-like pixels above the horizon
/// produce an all-zero mask.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn detect_sky(image: &RgbImage, params: &SkyDetection) -> SkyMask {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return SkyMask::empty(width, height);
    }

    // Steps 1-4: candidate union over the upper region.
    let horizon = horizon_row(height, params.horizon);
    let mut candidates = GrayImage::new(width, height);
    let mut hits = 0u64;
    for y in 0..horizon {
        for x in 0..width {
            if is_sky_candidate(*image.get_pixel(x, y), params) {
                candidates.put_pixel(x, y, Luma([255]));
                hits += 1;
            }
        }
    }
    debug!(horizon, hits, "Sky candidates collected");

    // Step 5: closing first, then opening.
    let cleaned = if params.morph_radius > 0 {
        let closed = close(&candidates, Norm::LInf, params.morph_radius);
        open(&closed, Norm::LInf, params.morph_radius)
    } else {
        candidates
    };

    // Step 6: feather.
    let feathered = if params.feather_sigma > 0.0 {
        gaussian_blur_f32(&cleaned, params.feather_sigma)
    } else {
        cleaned
    };

    let mask = SkyMask::from_gray(&feathered);
    debug!(coverage = mask.coverage(), "Sky mask ready");
    mask
}

/// Number of rows (from the top) searched for sky.
fn horizon_row(height: u32, fraction: f32) -> u32 {
    ((height as f32 * fraction) as u32).min(height)
}

/// Union of the brightness and blue-hue tests for one pixel.
fn is_sky_candidate(pixel: Rgb<u8>, params: &SkyDetection) -> bool {
    let Rgb([r, g, b]) = pixel;
    let value = r.max(g).max(b);
    if value >= params.brightness_floor {
        return true;
    }

    let hsv = rgb_to_hsv(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let hue = hsv.hue_byte();
    let saturation = (hsv.s * 255.0).round();
    hue >= params.hue_min as f32
        && hue <= params.hue_max as f32
        && saturation >= params.saturation_floor as f32
        && value >= params.value_floor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_image(width: u32, height: u32, top: Rgb<u8>, bottom: Rgb<u8>) -> RgbImage {
        RgbImage::from_fn(width, height, |_, y| if y < height / 2 { top } else { bottom })
    }

    #[test]
    fn bright_top_half_is_sky() {
        let img = split_image(80, 80, Rgb([230, 230, 235]), Rgb([40, 40, 40]));
        let mask = detect_sky(&img, &SkyDetection::default());
        assert_eq!(mask.dimensions(), (80, 80));
        assert!(mask.weight(40, 0) > 0.99, "top weight {}", mask.weight(40, 0));
        assert!(mask.weight(40, 79) < 0.01);
    }

    #[test]
    fn dark_blue_sky_is_found_by_hue() {
        // Value 90 is below the brightness floor; only the hue test can hit.
        let img = split_image(80, 80, Rgb([30, 50, 90]), Rgb([40, 40, 40]));
        let mask = detect_sky(&img, &SkyDetection::default());
        assert!(mask.weight(40, 5) > 0.9);
    }

    #[test]
    fn lower_half_is_never_sky() {
        let img = RgbImage::from_pixel(60, 60, Rgb([240, 240, 250]));
        let mask = detect_sky(&img, &SkyDetection::default());
        assert!(mask.weight(30, 59) < 0.01);
        assert!(mask.weight(30, 0) > 0.99);
    }

    #[test]
    fn dark_image_gives_empty_mask() {
        let img = RgbImage::from_pixel(50, 50, Rgb([30, 25, 20]));
        let mask = detect_sky(&img, &SkyDetection::default());
        assert!(mask.weights().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn isolated_speckle_is_removed() {
        let mut img = RgbImage::from_pixel(60, 60, Rgb([20, 20, 20]));
        img.put_pixel(30, 10, Rgb([255, 255, 255]));
        let mask = detect_sky(&img, &SkyDetection::default());
        assert!(mask.weights().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn weights_stay_normalised() {
        let img = RgbImage::from_fn(64, 64, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 { Rgb([200, 210, 240]) } else { Rgb([10, 10, 10]) }
        });
        let mask = detect_sky(&img, &SkyDetection::default());
        assert!(mask.weights().iter().all(|&w| (0.0..=1.0).contains(&w)));
    }

    #[test]
    fn candidate_tests() {
        let params = SkyDetection::default();
        assert!(is_sky_candidate(Rgb([100, 100, 100]), &params));
        assert!(!is_sky_candidate(Rgb([99, 99, 99]), &params));
        // Saturated mid blue, value 80.
        assert!(is_sky_candidate(Rgb([20, 40, 80]), &params));
        // Saturated red, value 80.
        assert!(!is_sky_candidate(Rgb([80, 20, 20]), &params));
    }

    #[test]
    fn horizon_rounds_down() {
        assert_eq!(horizon_row(101, 0.5), 50);
        assert_eq!(horizon_row(10, 1.0), 10);
    }
}
