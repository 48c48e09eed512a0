// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Colour model — colour-temperature shift, per-channel gain, and the HSV / CIE
// L*a*b* conversions used by the sky detector and the detail enhancer.

use image::{Rgb, RgbImage};

// -- Pixel helpers ------------------------------------------------------------

/// Round and clamp a float channel value into the 8-bit range.
#[inline]
pub(crate) fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Build a new image by mapping every pixel through `f`. Channels are handed
/// over as floats in 0..=255 and rounded back with saturation.
pub(crate) fn map_pixels<F>(image: &RgbImage, f: F) -> RgbImage
where
    F: Fn([f32; 3]) -> [f32; 3],
{
    let mut output = RgbImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(output.pixels_mut()) {
        let Rgb([r, g, b]) = *src;
        let [r, g, b] = f([r as f32, g as f32, b as f32]);
        *dst = Rgb([to_u8(r), to_u8(g), to_u8(b)]);
    }
    output
}

/// Rec. 601 luma, the same weighting the tone primitives use for grey.
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

// -- Colour temperature -------------------------------------------------------

/// Per-channel multipliers `[red, green, blue]` for a temperature shift.
///
/// Positive shifts warm the image (red up, green up by half, blue down by a
/// fifth); negative shifts cool it (blue up, green up by 0.3, red down by a
/// fifth). The magnitude is a percentage: 10 means a 10% red gain.
pub fn temperature_gains(shift: f32) -> [f32; 3] {
    let factor = shift.abs() / 100.0;
    if shift > 0.0 {
        [1.0 + factor, 1.0 + factor * 0.5, 1.0 - factor * 0.2]
    } else {
        [1.0 - factor * 0.2, 1.0 + factor * 0.3, 1.0 + factor]
    }
}

/// Warm (`shift > 0`) or cool (`shift < 0`) an image.
///
/// Works in normalised [0,1] intensity: each channel is scaled, clamped to
/// [0,1], then rescaled to 8 bits. Large shifts simply saturate channels.
pub fn temperature_shift(image: &RgbImage, shift: f32) -> RgbImage {
    let gains = temperature_gains(shift);
    map_pixels(image, |px| {
        let mut out = [0.0f32; 3];
        for c in 0..3 {
            out[c] = ((px[c] / 255.0) * gains[c]).clamp(0.0, 1.0) * 255.0;
        }
        out
    })
}

/// Multiply each channel by its own gain, clamping to the 8-bit range.
pub fn channel_gain(image: &RgbImage, gains: [f32; 3]) -> RgbImage {
    map_pixels(image, |[r, g, b]| [r * gains[0], g * gains[1], b * gains[2]])
}

// -- HSV ----------------------------------------------------------------------

/// HSV colour.
/// - h: 0.0-360.0 degrees
/// - s, v: 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Hue on the half-degree 8-bit scale (0..180) the sky thresholds use.
    pub fn hue_byte(&self) -> f32 {
        (self.h / 2.0).round()
    }
}

/// Convert RGB in 0.0-1.0 to HSV.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };
    if delta < 1e-6 {
        return Hsv { h: 0.0, s, v: max };
    }

    let h = if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    Hsv { h, s, v: max }
}

/// Convert HSV back to RGB in 0.0-1.0.
pub fn hsv_to_rgb(hsv: Hsv) -> (f32, f32, f32) {
    let Hsv { h, s, v } = hsv;
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    if s < 1e-6 {
        return (v, v, v);
    }

    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

// -- CIE L*a*b* ---------------------------------------------------------------

/// LAB colour (CIE L*a*b*, D65).
/// - l: 0.0-100.0
/// - a, b: roughly -128 to +128
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

const D65_X: f32 = 0.95047;
const D65_Y: f32 = 1.00000;
const D65_Z: f32 = 1.08883;

const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.119_192, 0.9503041],
];

const XYZ_TO_SRGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.969_266, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// sRGB EOTF: perceptual [0,1] -> linear light [0,1].
#[inline]
fn srgb_to_linear(x: f32) -> f32 {
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse sRGB EOTF: linear light [0,1] -> perceptual [0,1].
#[inline]
fn linear_to_srgb(x: f32) -> f32 {
    if x <= 0.0031308 {
        12.92 * x
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    const DELTA_CUBED: f32 = DELTA * DELTA * DELTA;
    if t > DELTA_CUBED {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn lab_f_inv(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// Convert an 8-bit sRGB pixel to LAB.
pub fn srgb8_to_lab(pixel: Rgb<u8>) -> Lab {
    let Rgb([r, g, b]) = pixel;
    let r = srgb_to_linear(r as f32 / 255.0);
    let g = srgb_to_linear(g as f32 / 255.0);
    let b = srgb_to_linear(b as f32 / 255.0);

    let m = &SRGB_TO_XYZ;
    let x = m[0][0] * r + m[0][1] * g + m[0][2] * b;
    let y = m[1][0] * r + m[1][1] * g + m[1][2] * b;
    let z = m[2][0] * r + m[2][1] * g + m[2][2] * b;

    let fx = lab_f(x / D65_X);
    let fy = lab_f(y / D65_Y);
    let fz = lab_f(z / D65_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert LAB back to 8-bit sRGB, clamping out-of-gamut results.
pub fn lab_to_srgb8(lab: Lab) -> Rgb<u8> {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;

    let x = lab_f_inv(fx) * D65_X;
    let y = lab_f_inv(fy) * D65_Y;
    let z = lab_f_inv(fz) * D65_Z;

    let m = &XYZ_TO_SRGB;
    let r = m[0][0] * x + m[0][1] * y + m[0][2] * z;
    let g = m[1][0] * x + m[1][1] * y + m[1][2] * z;
    let b = m[2][0] * x + m[2][1] * y + m[2][2] * z;

    let encode = |c: f32| to_u8(linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0);
    Rgb([encode(r), encode(g), encode(b)])
}
