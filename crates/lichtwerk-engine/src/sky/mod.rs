// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sky module — heuristic sky segmentation and gradient sky compositing.

pub mod composite;
pub mod segment;

use image::{GrayImage, Luma};

pub use composite::{enhance_sky, gradient_ratio, replace_sky, sky_anchors};
pub use segment::detect_sky;

/// Soft per-pixel "sky-ness" weight, same size as the image it was derived
/// from. Every weight is within [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct SkyMask {
    width: u32,
    height: u32,
    weights: Vec<f32>,
}

impl SkyMask {
    /// A mask with every weight set to `value` (clamped to [0, 1]).
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            weights: vec![value.clamp(0.0, 1.0); width as usize * height as usize],
        }
    }

    /// An all-zero mask: compositing through it leaves the image unchanged.
    pub fn empty(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Build a mask from an 8-bit map, 255 meaning full sky.
    pub fn from_gray(gray: &GrayImage) -> Self {
        Self {
            width: gray.width(),
            height: gray.height(),
            weights: gray.pixels().map(|p| p.0[0] as f32 / 255.0).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Weight at (x, y). Coordinates outside the mask read as 0.
    pub fn weight(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.weights[y as usize * self.width as usize + x as usize]
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Mean weight over the whole frame, 0.0-1.0.
    pub fn coverage(&self) -> f32 {
        if self.weights.is_empty() {
            return 0.0;
        }
        self.weights.iter().sum::<f32>() / self.weights.len() as f32
    }

    /// Render the mask as an 8-bit greyscale image (255 = full sky).
    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([(self.weight(x, y) * 255.0).round() as u8])
        })
    }
}
