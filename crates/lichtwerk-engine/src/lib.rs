// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lichtwerk-engine — Enhancement and sky-replacement engine for real-estate
// photography.
//
// Provides the colour model (temperature shift, HSV, L*a*b*), adjustment
// primitives, heuristic sky segmentation with gradient compositing, the
// 20-entry recipe catalogue, and the `Engine` facade that ties them to a
// decoded source image.

pub mod adjust;
pub mod color;
pub mod engine;
pub mod recipes;
pub mod sky;

// Re-export the primary entry points so callers can use `lichtwerk_engine::Engine` etc.
pub use color::temperature_shift;
pub use engine::Engine;
pub use recipes::{CATALOGUE, Recipe, Step, apply_recipe, recipe};
pub use sky::{SkyMask, detect_sky, replace_sky};
