// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Lichtwerk photo engine.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LichtwerkError;

/// Strength multiplier applied to every step of a recipe.
///
/// Nominal range is roughly 0.1–3.0 with 1.0 as the neutral default. Values
/// are never clamped: anything outside 0.5–2.0 tends to look degenerate, and
/// values at or below ~0.1 bend the sky gradient curve to extremes (0.0
/// collapses it to the top colour).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intensity(pub f32);

impl Intensity {
    /// Band inside which results are expected to look good.
    pub const RECOMMENDED: (f32, f32) = (0.5, 2.0);
    /// Band outside of which callers should be warned.
    pub const ACCEPTED: (f32, f32) = (0.1, 3.0);

    pub fn new(value: f32) -> Self {
        Self(value)
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Whether the value lies in the recommended 0.5–2.0 band.
    pub fn is_recommended(self) -> bool {
        (Self::RECOMMENDED.0..=Self::RECOMMENDED.1).contains(&self.0)
    }

    /// Whether the value lies in the accepted 0.1–3.0 band.
    pub fn is_accepted(self) -> bool {
        (Self::ACCEPTED.0..=Self::ACCEPTED.1).contains(&self.0)
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(1.0)
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Gradient style painted into a detected sky region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkyStyle {
    /// Light blue at the top fading to a paler blue.
    Blue,
    /// Warm orange at the top fading to soft peach.
    Sunset,
    /// Desaturated slate at the top fading to lighter slate.
    Dramatic,
}

impl SkyStyle {
    pub const ALL: [SkyStyle; 3] = [Self::Blue, Self::Sunset, Self::Dramatic];

    /// Keyword used on the command line and in configuration files.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Sunset => "sunset",
            Self::Dramatic => "dramatic",
        }
    }
}

impl FromStr for SkyStyle {
    type Err = LichtwerkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blue" => Ok(Self::Blue),
            "sunset" => Ok(Self::Sunset),
            "dramatic" => Ok(Self::Dramatic),
            other => Err(LichtwerkError::UnknownSkyStyle(other.to_string())),
        }
    }
}

/// Grouping used when presenting the recipe catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeCategory {
    /// General quality enhancement (HDR, luxury, editorial).
    Quality,
    /// Colour and atmosphere grading.
    Atmosphere,
    /// Brightness and clarity.
    Clarity,
    /// Sky enhancement and replacement.
    Sky,
}

impl RecipeCategory {
    pub const ALL: [RecipeCategory; 4] =
        [Self::Quality, Self::Atmosphere, Self::Clarity, Self::Sky];

    /// Heading shown in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quality => "Quality Enhancement",
            Self::Atmosphere => "Color & Atmosphere",
            Self::Clarity => "Brightness & Clarity",
            Self::Sky => "Sky Enhancement",
        }
    }
}

/// Encoded output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Baseline JPEG, 4:4:4 sampling, quality from configuration.
    Jpeg,
    /// Lossless WebP.
    WebP,
    /// PNG (fallback for every other extension).
    Png,
}

impl OutputFormat {
    /// MIME type string for the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Png => "image/png",
        }
    }

    /// Infer the output format from a file extension. Unknown extensions fall
    /// back to PNG.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "webp" => Self::WebP,
            _ => Self::Png,
        }
    }

    /// Infer the output format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_defaults_to_one() {
        assert_eq!(Intensity::default().get(), 1.0);
    }

    #[test]
    fn intensity_bands() {
        assert!(Intensity(1.0).is_recommended());
        assert!(!Intensity(2.5).is_recommended());
        assert!(Intensity(2.5).is_accepted());
        assert!(!Intensity(0.05).is_accepted());
        assert!(!Intensity(3.5).is_accepted());
    }

    #[test]
    fn sky_style_parses_keywords() {
        for style in SkyStyle::ALL {
            assert_eq!(style.keyword().parse::<SkyStyle>().unwrap(), style);
        }
        assert_eq!("SUNSET".parse::<SkyStyle>().unwrap(), SkyStyle::Sunset);
    }

    #[test]
    fn unknown_sky_style_is_rejected() {
        let err = "aurora".parse::<SkyStyle>().unwrap_err();
        assert!(matches!(err, LichtwerkError::UnknownSkyStyle(ref s) if s == "aurora"));
    }

    #[test]
    fn output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.JPG")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("b.jpeg")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("b.webp")), OutputFormat::WebP);
        assert_eq!(OutputFormat::from_path(Path::new("b.tiff")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), OutputFormat::Png);
    }
}
