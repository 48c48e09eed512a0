// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration. The defaults are the tuned constants the recipes were
// built against; a JSON file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LichtwerkError, Result};
use crate::types::Intensity;

/// Tunables for the whole engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sky segmentation thresholds.
    pub sky: SkyDetection,
    /// Local contrast / detail enhancement ("HDR") settings.
    pub detail: DetailSettings,
    /// Encoding and default-parameter settings.
    pub output: OutputSettings,
}

/// Heuristic sky detector thresholds. Hue, saturation and value use the
/// 8-bit HSV scale: hue 0..180, saturation and value 0..=255.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyDetection {
    /// Fraction of the frame height (from the top) searched for sky.
    pub horizon: f32,
    /// Minimum value for the brightness candidate mask.
    pub brightness_floor: u8,
    /// Inclusive hue band for the blue candidate mask.
    pub hue_min: u8,
    pub hue_max: u8,
    /// Minimum saturation for the blue candidate mask.
    pub saturation_floor: u8,
    /// Minimum value for the blue candidate mask.
    pub value_floor: u8,
    /// Radius of the square structuring element (3 gives a 7x7 square).
    pub morph_radius: u8,
    /// Gaussian sigma used to feather mask edges.
    pub feather_sigma: f32,
}

impl Default for SkyDetection {
    fn default() -> Self {
        Self {
            horizon: 0.5,
            brightness_floor: 100,
            hue_min: 90,
            hue_max: 130,
            saturation_floor: 30,
            value_floor: 50,
            morph_radius: 3,
            feather_sigma: 5.0,
        }
    }
}

/// Settings for the luma CLAHE + edge-preserving detail blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSettings {
    /// CLAHE tiles per axis.
    pub tile_grid: u32,
    /// CLAHE clip limit at intensity 1.0.
    pub clip_limit: f32,
    /// Spatial sigma of the domain-transform filter, in pixels.
    pub sigma_spatial: f32,
    /// Range sigma of the domain-transform filter at intensity 1.0.
    pub sigma_range: f32,
    /// Gain applied to the extracted detail layer.
    pub detail_boost: f32,
    /// Weight of the CLAHE result in the final blend (rest is the detail layer).
    pub luma_weight: f32,
}

impl Default for DetailSettings {
    fn default() -> Self {
        Self {
            tile_grid: 8,
            clip_limit: 2.5,
            sigma_spatial: 10.0,
            sigma_range: 0.15,
            detail_boost: 3.0,
            luma_weight: 0.7,
        }
    }
}

/// Output encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Intensity used when a caller omits one.
    pub default_intensity: Intensity,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: 100,
            default_intensity: Intensity::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Missing fields keep their
    /// defaults; the result is validated before it is returned.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let sky = &self.sky;
        if !(sky.horizon > 0.0 && sky.horizon <= 1.0) {
            return Err(LichtwerkError::Config(format!(
                "sky.horizon must be in (0, 1], got {}",
                sky.horizon
            )));
        }
        if sky.hue_min > sky.hue_max || sky.hue_max > 180 {
            return Err(LichtwerkError::Config(format!(
                "sky hue band {}..={} is not within 0..=180",
                sky.hue_min, sky.hue_max
            )));
        }
        if !(sky.feather_sigma >= 0.0) {
            return Err(LichtwerkError::Config(format!(
                "sky.feather_sigma must be non-negative, got {}",
                sky.feather_sigma
            )));
        }

        let detail = &self.detail;
        if detail.tile_grid == 0 {
            return Err(LichtwerkError::Config("detail.tile_grid must be at least 1".into()));
        }
        if !(detail.sigma_spatial > 0.0) || !(detail.sigma_range > 0.0) {
            return Err(LichtwerkError::Config(format!(
                "detail sigmas must be positive, got spatial {} range {}",
                detail.sigma_spatial, detail.sigma_range
            )));
        }
        if !(0.0..=1.0).contains(&detail.luma_weight) {
            return Err(LichtwerkError::Config(format!(
                "detail.luma_weight must be in [0, 1], got {}",
                detail.luma_weight
            )));
        }

        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(LichtwerkError::Config(format!(
                "output.jpeg_quality must be 1-100, got {}",
                self.output.jpeg_quality
            )));
        }
        Ok(())
    }
}
