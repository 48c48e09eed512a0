// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine facade — decodes one source image and runs catalogue recipes
// against it. The source pixels are owned by the engine and never mutated,
// so one instance can serve any number of `apply` calls, including from
// several threads through a shared reference.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageError, ImageFormat, RgbImage};
use lichtwerk_core::config::OutputSettings;
use lichtwerk_core::error::{LichtwerkError, Result};
use lichtwerk_core::{EngineConfig, Intensity, OutputFormat, SkyStyle};
use tracing::{debug, info, instrument, warn};

use crate::recipes::{self, apply_recipe};
use crate::sky::{self, SkyMask};

/// A loaded source image plus the tuning it is processed with.
///
/// ```ignore
/// let engine = Engine::open("listing.jpg")?;
/// let warm = engine.apply("warm-sunset", 1.2)?;
/// let blue = engine.apply("sky-blue", 1.0)?;
/// Engine::save(&blue, "listing_sky-blue.jpg", &engine.config().output)?;
/// ```
pub struct Engine {
    source: RgbImage,
    config: EngineConfig,
}

impl Engine {
    // -- Construction ---------------------------------------------------------

    /// Decode an image file. A file that cannot be read at all is an `Io`
    /// error; one that reads but does not decode is `Decode`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| match err {
            ImageError::IoError(io_err) => LichtwerkError::Io(io_err),
            other => LichtwerkError::Decode(format!("{}: {}", path.as_ref().display(), other)),
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self::from_dynamic(img))
    }

    /// Decode raw encoded bytes (JPEG, PNG, BMP, ...).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| LichtwerkError::Decode(err.to_string()))?;
        debug!(width = img.width(), height = img.height(), "Image decoded from bytes");
        Ok(Self::from_dynamic(img))
    }

    /// Wrap an already-decoded image. Alpha is dropped.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::from_rgb(image.to_rgb8())
    }

    /// Wrap an 8-bit RGB buffer.
    pub fn from_rgb(source: RgbImage) -> Self {
        Self { source, config: EngineConfig::default() }
    }

    /// Replace the tuning used by subsequent calls.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.source.width()
    }

    pub fn height(&self) -> u32 {
        self.source.height()
    }

    /// Borrow the decoded source pixels.
    pub fn source(&self) -> &RgbImage {
        &self.source
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -- Operations -----------------------------------------------------------

    /// Run the recipe `id` at `intensity` and return a new image of the same
    /// size.
    ///
    /// Intensities outside the recommended band are logged, not rejected.
    #[instrument(skip(self))]
    pub fn apply(&self, id: &str, intensity: f32) -> Result<RgbImage> {
        let intensity = Intensity::new(intensity);
        let recipe = recipes::recipe(id)?;
        if !intensity.is_recommended() {
            warn!(
                %intensity,
                "Intensity outside {:?} may produce degenerate output",
                Intensity::RECOMMENDED
            );
        }
        info!(recipe = recipe.id, %intensity, "Applying recipe");
        let output = apply_recipe(recipe, &self.source, intensity.get(), &self.config);
        debug!(width = output.width(), height = output.height(), "Recipe complete");
        Ok(output)
    }

    /// Run `id` at the configured default intensity.
    pub fn apply_default(&self, id: &str) -> Result<RgbImage> {
        self.apply(id, self.config.output.default_intensity.get())
    }

    /// Soft sky mask for the source image.
    pub fn detect_sky(&self) -> SkyMask {
        sky::detect_sky(&self.source, &self.config.sky)
    }

    /// Detect the sky and paint a gradient of `style` into it.
    pub fn replace_sky(&self, style: SkyStyle, intensity: f32) -> RgbImage {
        let mask = self.detect_sky();
        sky::replace_sky(&self.source, &mask, style, intensity)
    }

    // -- Output ---------------------------------------------------------------

    /// Encode `image` in `format`.
    ///
    /// JPEG uses the configured quality (4:4:4 sampling), WebP is lossless.
    pub fn encode(image: &RgbImage, format: OutputFormat, settings: &OutputSettings) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match format {
            OutputFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut buffer, settings.jpeg_quality);
                image
                    .write_with_encoder(encoder)
                    .map_err(|err| LichtwerkError::Encode(format!("JPEG: {err}")))?;
            }
            OutputFormat::WebP => {
                let encoder = WebPEncoder::new_lossless(&mut buffer);
                image
                    .write_with_encoder(encoder)
                    .map_err(|err| LichtwerkError::Encode(format!("WebP: {err}")))?;
            }
            OutputFormat::Png => {
                image
                    .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
                    .map_err(|err| LichtwerkError::Encode(format!("PNG: {err}")))?;
            }
        }
        debug!(format = format.mime_type(), bytes = buffer.len(), "Image encoded");
        Ok(buffer)
    }

    /// Encode `image` for the extension of `path` and write it out.
    #[instrument(skip(image, settings), fields(path = %path.as_ref().display()))]
    pub fn save(image: &RgbImage, path: impl AsRef<Path>, settings: &OutputSettings) -> Result<()> {
        let format = OutputFormat::from_path(path.as_ref());
        let bytes = Self::encode(image, format, settings)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(bytes = bytes.len(), format = format.mime_type(), "Image saved");
        Ok(())
    }
}
