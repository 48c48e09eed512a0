// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adjustment primitives — brightness, contrast, saturation, sharpness,
// smoothing, soft glow, and luma/detail ("HDR-style") enhancement. Every
// primitive borrows its input and returns a new image of the same size.

pub mod detail;
pub mod filter;
pub mod tone;

pub use detail::{clahe, domain_transform, tone_enhance};
pub use filter::{blend, sharpness, smooth, soft_glow};
pub use tone::{brightness, contrast, mean_luma, saturation};
