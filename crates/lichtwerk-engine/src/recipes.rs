// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recipe catalogue — the 20 named looks, each a fixed, ordered list of typed
// steps over the adjustment primitives, the colour model and the sky
// compositor. Step order is part of the look and is never rearranged.

use image::RgbImage;
use lichtwerk_core::error::{LichtwerkError, Result};
use lichtwerk_core::{EngineConfig, RecipeCategory, SkyStyle};
use tracing::{debug, instrument};

use crate::adjust;
use crate::color::{channel_gain, temperature_shift};
use crate::sky::{detect_sky, enhance_sky, replace_sky};

// ---------------------------------------------------------------------------
// Step descriptors
// ---------------------------------------------------------------------------

/// How a step parameter responds to the caller's intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Ignores intensity.
    Fixed(f32),
    /// `base * intensity`.
    Linear(f32),
    /// `1 + delta * intensity`, for gains centred on 1.0.
    Offset(f32),
}

impl Scale {
    /// Resolve the parameter for one invocation.
    pub fn resolve(self, intensity: f32) -> f32 {
        match self {
            Self::Fixed(value) => value,
            Self::Linear(base) => base * intensity,
            Self::Offset(delta) => 1.0 + delta * intensity,
        }
    }
}

/// One pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Colour temperature shift (positive warms, negative cools).
    Temperature(Scale),
    Brightness(Scale),
    Contrast(Scale),
    Saturation(Scale),
    Sharpness(Scale),
    /// Fixed 3x3 smoothing pass.
    Smooth,
    /// Blurred copy blended back over the original with the resolved weight.
    SoftGlow(Scale),
    /// Independent per-channel gains.
    ChannelGain { red: Scale, green: Scale, blue: Scale },
    /// CLAHE + domain-filter detail enhancement at the resolved strength.
    Detail(Scale),
    /// Detect the sky and paint a gradient of the given style into it.
    SkyReplace(SkyStyle),
    /// Detect the sky and deepen it in place.
    SkyEnhance { saturation: Scale, darken: Scale },
}

impl Step {
    /// Short tag used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Temperature(_) => "temperature",
            Self::Brightness(_) => "brightness",
            Self::Contrast(_) => "contrast",
            Self::Saturation(_) => "saturation",
            Self::Sharpness(_) => "sharpness",
            Self::Smooth => "smooth",
            Self::SoftGlow(_) => "soft-glow",
            Self::ChannelGain { .. } => "channel-gain",
            Self::Detail(_) => "detail",
            Self::SkyReplace(_) => "sky-replace",
            Self::SkyEnhance { .. } => "sky-enhance",
        }
    }

    /// Whether the step needs a sky mask.
    pub fn uses_sky(&self) -> bool {
        matches!(self, Self::SkyReplace(_) | Self::SkyEnhance { .. })
    }

    fn run(&self, image: &RgbImage, intensity: f32, config: &EngineConfig) -> RgbImage {
        match *self {
            Self::Temperature(s) => temperature_shift(image, s.resolve(intensity)),
            Self::Brightness(s) => adjust::brightness(image, s.resolve(intensity)),
            Self::Contrast(s) => adjust::contrast(image, s.resolve(intensity)),
            Self::Saturation(s) => adjust::saturation(image, s.resolve(intensity)),
            Self::Sharpness(s) => adjust::sharpness(image, s.resolve(intensity)),
            Self::Smooth => adjust::smooth(image),
            Self::SoftGlow(s) => adjust::soft_glow(image, s.resolve(intensity)),
            Self::ChannelGain { red, green, blue } => channel_gain(
                image,
                [red.resolve(intensity), green.resolve(intensity), blue.resolve(intensity)],
            ),
            Self::Detail(s) => adjust::tone_enhance(image, s.resolve(intensity), &config.detail),
            Self::SkyReplace(style) => {
                let mask = detect_sky(image, &config.sky);
                replace_sky(image, &mask, style, intensity)
            }
            Self::SkyEnhance { saturation, darken } => {
                let mask = detect_sky(image, &config.sky);
                enhance_sky(image, &mask, saturation.resolve(intensity), darken.resolve(intensity))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

/// An immutable named look.
#[derive(Debug)]
pub struct Recipe {
    /// Catalogue key, e.g. `"warm-sunset"`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    pub category: RecipeCategory,
    /// One-line hint for when to use it.
    pub best_for: &'static str,
    /// Ordered pipeline.
    pub steps: &'static [Step],
}

impl Recipe {
    /// Whether any step runs sky detection.
    pub fn uses_sky(&self) -> bool {
        self.steps.iter().any(Step::uses_sky)
    }
}

use Scale::{Fixed, Linear, Offset};

/// The full catalogue in presentation order.
pub static CATALOGUE: [Recipe; 20] = [
    // -- Quality ----------------------------------------------------------------
    Recipe {
        id: "hdr-pro",
        name: "HDR Pro",
        category: RecipeCategory::Quality,
        best_for: "High-contrast interiors with bright windows",
        steps: &[Step::Detail(Linear(1.0))],
    },
    Recipe {
        id: "luxury",
        name: "Luxury",
        category: RecipeCategory::Quality,
        best_for: "High-end listings and premium finishes",
        steps: &[
            Step::Temperature(Linear(15.0)),
            Step::Contrast(Linear(1.15)),
            Step::Sharpness(Linear(1.3)),
            Step::Saturation(Linear(1.1)),
            Step::Brightness(Fixed(1.08)),
        ],
    },
    Recipe {
        id: "modern",
        name: "Modern",
        category: RecipeCategory::Quality,
        best_for: "Contemporary interiors with clean lines",
        steps: &[
            Step::Temperature(Linear(-20.0)),
            Step::Saturation(Fixed(0.92)),
            Step::Brightness(Linear(1.12)),
            Step::Contrast(Linear(1.08)),
        ],
    },
    Recipe {
        id: "balanced",
        name: "Balanced",
        category: RecipeCategory::Quality,
        best_for: "All-purpose listing photos",
        steps: &[
            Step::Detail(Linear(0.8)),
            Step::Brightness(Linear(1.1)),
            Step::Contrast(Linear(1.12)),
            Step::Saturation(Linear(1.08)),
            Step::Sharpness(Linear(1.2)),
        ],
    },
    Recipe {
        id: "magazine",
        name: "Magazine",
        category: RecipeCategory::Quality,
        best_for: "Editorial and marketing hero shots",
        steps: &[
            Step::Detail(Linear(1.0)),
            Step::Saturation(Linear(1.3)),
            Step::Sharpness(Linear(1.45)),
            Step::Contrast(Linear(1.28)),
        ],
    },
    Recipe {
        id: "architectural",
        name: "Architectural",
        category: RecipeCategory::Quality,
        best_for: "Exteriors and structural detail",
        steps: &[
            Step::Sharpness(Linear(1.6)),
            Step::Contrast(Linear(1.3)),
            Step::Saturation(Fixed(0.98)),
        ],
    },
    // -- Atmosphere -------------------------------------------------------------
    Recipe {
        id: "golden-hour",
        name: "Golden Hour",
        category: RecipeCategory::Atmosphere,
        best_for: "Exteriors that need evening warmth",
        steps: &[
            Step::Temperature(Linear(35.0)),
            Step::Brightness(Linear(1.2)),
            Step::Saturation(Linear(1.25)),
            Step::SoftGlow(Linear(0.3)),
        ],
    },
    Recipe {
        id: "warm-natural",
        name: "Warm Natural",
        category: RecipeCategory::Atmosphere,
        best_for: "Cosy living spaces and wood tones",
        steps: &[
            Step::Temperature(Linear(22.0)),
            Step::Brightness(Linear(1.15)),
            Step::Saturation(Linear(1.15)),
        ],
    },
    Recipe {
        id: "cinematic",
        name: "Cinematic",
        category: RecipeCategory::Atmosphere,
        best_for: "Dramatic teal-and-orange grading",
        steps: &[
            Step::ChannelGain { red: Offset(0.15), green: Offset(0.05), blue: Offset(-0.1) },
            Step::Contrast(Linear(1.2)),
        ],
    },
    Recipe {
        id: "moody",
        name: "Moody",
        category: RecipeCategory::Atmosphere,
        best_for: "Dark, atmospheric interiors",
        steps: &[
            Step::Brightness(Fixed(0.92)),
            Step::Contrast(Linear(1.35)),
            Step::Saturation(Linear(1.25)),
            Step::Temperature(Linear(-15.0)),
        ],
    },
    Recipe {
        id: "twilight",
        name: "Twilight",
        category: RecipeCategory::Atmosphere,
        best_for: "Dusk exteriors with lit windows",
        steps: &[
            Step::Temperature(Linear(-35.0)),
            Step::Saturation(Linear(1.3)),
            Step::Brightness(Fixed(1.05)),
        ],
    },
    // -- Clarity ----------------------------------------------------------------
    Recipe {
        id: "crisp-clean",
        name: "Crisp & Clean",
        category: RecipeCategory::Clarity,
        best_for: "Kitchens and bathrooms",
        steps: &[
            Step::Sharpness(Linear(1.5)),
            Step::Brightness(Linear(1.18)),
            Step::Contrast(Linear(1.12)),
            Step::Temperature(Linear(-10.0)),
        ],
    },
    Recipe {
        id: "bright-airy",
        name: "Bright & Airy",
        category: RecipeCategory::Clarity,
        best_for: "Small or dim rooms",
        steps: &[
            Step::Brightness(Linear(1.25)),
            Step::Saturation(Fixed(0.95)),
            Step::Contrast(Linear(1.05)),
            Step::Temperature(Linear(-8.0)),
        ],
    },
    Recipe {
        id: "fresh-bright",
        name: "Fresh & Bright",
        category: RecipeCategory::Clarity,
        best_for: "Spring listings and gardens",
        steps: &[
            Step::Brightness(Linear(1.22)),
            Step::Saturation(Linear(1.2)),
            Step::Temperature(Linear(-12.0)),
        ],
    },
    Recipe {
        id: "vibrant",
        name: "Vibrant",
        category: RecipeCategory::Clarity,
        best_for: "Colourful decor and landscaping",
        steps: &[
            Step::Saturation(Linear(1.4)),
            Step::Contrast(Linear(1.25)),
            Step::Sharpness(Linear(1.35)),
        ],
    },
    Recipe {
        id: "soft-elegant",
        name: "Soft & Elegant",
        category: RecipeCategory::Clarity,
        best_for: "Bedrooms and refined interiors",
        steps: &[
            Step::Temperature(Linear(12.0)),
            Step::Smooth,
            Step::Brightness(Linear(1.1)),
            Step::Contrast(Linear(1.08)),
        ],
    },
    // -- Sky ------------------------------------------------------------------
    Recipe {
        id: "sky-dramatic",
        name: "Dramatic Sky",
        category: RecipeCategory::Sky,
        best_for: "Flat or washed-out skies",
        steps: &[Step::SkyEnhance { saturation: Linear(0.6), darken: Linear(0.15) }],
    },
    Recipe {
        id: "sky-blue",
        name: "Blue Sky",
        category: RecipeCategory::Sky,
        best_for: "Overcast exteriors",
        steps: &[Step::SkyReplace(SkyStyle::Blue)],
    },
    Recipe {
        id: "sky-sunset",
        name: "Sunset Sky",
        category: RecipeCategory::Sky,
        best_for: "Evening exteriors",
        steps: &[Step::SkyReplace(SkyStyle::Sunset)],
    },
    Recipe {
        id: "warm-sunset",
        name: "Warm Sunset",
        category: RecipeCategory::Sky,
        best_for: "Exteriors that need a complete sunset mood",
        steps: &[
            Step::SkyReplace(SkyStyle::Sunset),
            Step::Temperature(Linear(30.0)),
            Step::Brightness(Linear(1.15)),
        ],
    },
];

/// Look up a recipe by id. Unknown ids never fall back to another recipe.
pub fn recipe(id: &str) -> Result<&'static Recipe> {
    CATALOGUE
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| LichtwerkError::UnknownRecipe(id.to_string()))
}

/// Recipes of one category, in catalogue order.
pub fn by_category(category: RecipeCategory) -> impl Iterator<Item = &'static Recipe> {
    CATALOGUE.iter().filter(move |r| r.category == category)
}

/// Run every step of `recipe` in order. Each step borrows the previous
/// result and allocates a new image; `image` itself is never touched.
#[instrument(skip_all, fields(recipe = recipe.id, intensity = intensity, width = image.width(), height = image.height()))]
pub fn apply_recipe(
    recipe: &Recipe,
    image: &RgbImage,
    intensity: f32,
    config: &EngineConfig,
) -> RgbImage {
    let mut current = image.clone();
    for (index, step) in recipe.steps.iter().enumerate() {
        debug!(index, step = step.name(), intensity, "Running step");
        current = step.run(&current, intensity, config);
    }
    current
}
