// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Lichtwerk.
//
// Out-of-range pixel values, empty sky masks and odd intensities are not
// errors: every adjustment clamps. Only the failures below abort a recipe.

use thiserror::Error;

/// Top-level error type for all Lichtwerk operations.
#[derive(Debug, Error)]
pub enum LichtwerkError {
    // -- Input errors --
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    #[error("unknown sky style: {0}")]
    UnknownSkyStyle(String),

    // -- Output errors --
    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LichtwerkError>;
