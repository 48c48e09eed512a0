// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lichtwerk — real-estate photo looks from the command line.
//
// Entry point. Initialises logging, parses arguments, and dispatches to the
// `apply`, `list`, `replace-sky` and `sky-mask` subcommands.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lichtwerk_core::human_errors::humanize_error;
use lichtwerk_core::{EngineConfig, Intensity, LichtwerkError, RecipeCategory, SkyStyle};
use lichtwerk_engine::Engine;
use lichtwerk_engine::recipes::by_category;
use tracing::{info, warn};

/// Apply real-estate photo looks, sky replacement and HDR-style detail.
#[derive(Parser, Debug)]
#[command(name = "lichtwerk")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one recipe on a photo and save the result.
    Apply {
        /// Input image path.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Recipe id (see `lichtwerk list`).
        #[arg(short, long, value_name = "ID")]
        recipe: String,

        /// Strength of every step. 0.5-2.0 is the useful range.
        #[arg(short, long, value_name = "FLOAT")]
        intensity: Option<f32>,

        /// Output path. Defaults to `<input stem>_<recipe>.<input ext>`.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// JSON tuning file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List every recipe, grouped by category.
    List,

    /// Paint a gradient sky of one style into the detected sky region.
    ReplaceSky {
        /// Input image path.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Gradient style: blue, sunset or dramatic.
        #[arg(short, long, value_name = "STYLE", default_value = "blue")]
        style: String,

        /// Curve of the gradient. Higher values push the transition upwards.
        #[arg(short, long, value_name = "FLOAT", default_value_t = 1.0)]
        intensity: f32,

        /// Output path. Defaults to `<input stem>_sky-<style>.<input ext>`.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// JSON tuning file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Write the detected sky mask as a greyscale PNG.
    SkyMask {
        /// Input image path.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output path. Defaults to `<input stem>_sky_mask.png`.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// JSON tuning file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Apply { input, recipe, intensity, output, config } => {
            apply(&input, &recipe, intensity, output, config.as_deref())
        }
        Command::List => {
            print!("{}", catalogue_listing());
            Ok(())
        }
        Command::ReplaceSky { input, style, intensity, output, config } => {
            replace_sky(&input, &style, intensity, output, config.as_deref())
        }
        Command::SkyMask { input, output, config } => sky_mask(&input, output, config.as_deref()),
    }
}

// -- Subcommands ----------------------------------------------------------------

fn apply(
    input: &Path,
    recipe: &str,
    intensity: Option<f32>,
    output: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<()> {
    // Resolve the recipe before decoding so typos fail fast.
    let recipe = lichtwerk_engine::recipe(recipe)?;
    let config = load_config(config)?;
    warn_if_unusual(intensity.map(Intensity::new).unwrap_or(config.output.default_intensity));

    let engine = Engine::open(input)?.with_config(config);
    info!(
        recipe = recipe.id,
        width = engine.width(),
        height = engine.height(),
        "Processing"
    );
    let result = match intensity {
        Some(intensity) => engine.apply(recipe.id, intensity)?,
        None => engine.apply_default(recipe.id)?,
    };

    let output = output.unwrap_or_else(|| default_output(input, recipe.id, None));
    Engine::save(&result, &output, &engine.config().output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} ({}) -> {} ({}) [{}]",
        input.display(),
        format_megabytes(file_size(input)),
        output.display(),
        format_megabytes(file_size(&output)),
        recipe.name
    );
    Ok(())
}

fn replace_sky(
    input: &Path,
    style: &str,
    intensity: f32,
    output: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<()> {
    let style: SkyStyle = style.parse()?;
    let config = load_config(config)?;
    warn_if_unusual(Intensity::new(intensity));

    let engine = Engine::open(input)?.with_config(config);
    info!(style = style.keyword(), %intensity, "Replacing sky");
    let result = engine.replace_sky(style, intensity);

    let suffix = format!("sky-{}", style.keyword());
    let output = output.unwrap_or_else(|| default_output(input, &suffix, None));
    Engine::save(&result, &output, &engine.config().output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "{} -> {} ({})",
        input.display(),
        output.display(),
        format_megabytes(file_size(&output))
    );
    Ok(())
}

fn sky_mask(input: &Path, output: Option<PathBuf>, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let engine = Engine::open(input)?.with_config(config);
    let mask = engine.detect_sky();
    info!(coverage = mask.coverage(), "Sky mask computed");

    let output = output.unwrap_or_else(|| default_output(input, "sky_mask", Some("png")));
    mask.to_gray()
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "{} -> {} (sky coverage {:.1}%)",
        input.display(),
        output.display(),
        mask.coverage() * 100.0
    );
    Ok(())
}

// -- Helpers ----------------------------------------------------------------

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => Ok(EngineConfig::from_json_file(path)?),
        None => Ok(EngineConfig::default()),
    }
}

/// `<dir>/<stem>_<suffix>.<ext>`, where `ext` defaults to the input's
/// extension (or `jpg` when it has none).
fn default_output(input: &Path, suffix: &str, ext: Option<&str>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = ext
        .or_else(|| input.extension().and_then(|e| e.to_str()))
        .unwrap_or("jpg");
    input.with_file_name(format!("{stem}_{suffix}.{ext}"))
}

fn warn_if_unusual(intensity: Intensity) {
    if !intensity.is_accepted() {
        warn!(%intensity, "Intensity outside accepted band");
        eprintln!(
            "warning: intensity {intensity} is outside {:.1}-{:.1}; the result may look degenerate",
            Intensity::ACCEPTED.0,
            Intensity::ACCEPTED.1
        );
    }
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

fn catalogue_listing() -> String {
    let mut out = String::new();
    for category in RecipeCategory::ALL {
        out.push_str(category.label());
        out.push('\n');
        for recipe in by_category(category) {
            out.push_str(&format!("  {:<14} {:<16} {}\n", recipe.id, recipe.name, recipe.best_for));
        }
        out.push('\n');
    }
    out
}

/// Print an error for a person, not a log parser.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<LichtwerkError>() {
        Some(lichtwerk_err) => {
            let human = humanize_error(lichtwerk_err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            tracing::debug!("{err:#}");
        }
        None => eprintln!("error: {err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use image::{Rgb, RgbImage};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_apply() {
        let cli = Cli::try_parse_from([
            "lichtwerk", "apply", "house.jpg", "--recipe", "sky-blue", "--intensity", "1.5",
        ])
        .unwrap();
        match cli.command {
            Command::Apply { input, recipe, intensity, output, config } => {
                assert_eq!(input, PathBuf::from("house.jpg"));
                assert_eq!(recipe, "sky-blue");
                assert_eq!(intensity, Some(1.5));
                assert!(output.is_none() && config.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_replace_sky_with_defaults() {
        let cli = Cli::try_parse_from(["lichtwerk", "replace-sky", "house.jpg", "--style", "dramatic"])
            .unwrap();
        match cli.command {
            Command::ReplaceSky { style, intensity, output, .. } => {
                assert_eq!(style, "dramatic");
                assert_eq!(intensity, 1.0);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_sky_style_is_reported_before_decoding() {
        let err = replace_sky(Path::new("missing.jpg"), "aurora", 1.0, None, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LichtwerkError>(),
            Some(LichtwerkError::UnknownSkyStyle(name)) if name == "aurora"
        ));
    }

    #[test]
    fn replace_sky_writes_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("house.png");
        let img = RgbImage::from_fn(40, 40, |_, y| if y < 20 { Rgb([230; 3]) } else { Rgb([40; 3]) });
        img.save(&input).unwrap();

        replace_sky(&input, "Sunset", 1.0, None, None).unwrap();

        let written = dir.path().join("house_sky-sunset.png");
        let out = image::open(&written).unwrap().to_rgb8();
        assert_eq!(out.dimensions(), (40, 40));
        assert_ne!(out.get_pixel(20, 0), img.get_pixel(20, 0));
        assert_eq!(out.get_pixel(20, 39), img.get_pixel(20, 39));
    }

    #[test]
    fn apply_without_intensity_uses_configured_default() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("room.png");
        let img = RgbImage::from_fn(24, 16, |x, y| Rgb([(x * 9) as u8, (y * 12) as u8, 90]));
        img.save(&input).unwrap();
        let config = dir.path().join("tuning.json");
        std::fs::write(&config, r#"{ "output": { "default_intensity": 1.5 } }"#).unwrap();

        apply(&input, "vibrant", None, None, Some(&config)).unwrap();

        let written = image::open(dir.path().join("room_vibrant.png")).unwrap().to_rgb8();
        let mut tuning = EngineConfig::default();
        tuning.output.default_intensity = Intensity::new(1.5);
        let expected = Engine::from_rgb(img).with_config(tuning).apply("vibrant", 1.5).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn missing_input_maps_to_not_found() {
        let err = apply(Path::new("/no/such/listing.jpg"), "luxury", Some(1.0), None, None).unwrap_err();
        match err.downcast_ref::<LichtwerkError>() {
            Some(LichtwerkError::Io(io)) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io(NotFound), got {other:?}"),
        }
    }

    #[test]
    fn apply_requires_recipe() {
        assert!(Cli::try_parse_from(["lichtwerk", "apply", "house.jpg"]).is_err());
    }

    #[test]
    fn default_output_keeps_directory_and_extension() {
        assert_eq!(
            default_output(Path::new("shots/house.png"), "warm-sunset", None),
            PathBuf::from("shots/house_warm-sunset.png")
        );
        assert_eq!(
            default_output(Path::new("house.jpg"), "sky_mask", Some("png")),
            PathBuf::from("house_sky_mask.png")
        );
        assert_eq!(
            default_output(Path::new("house"), "moody", None),
            PathBuf::from("house_moody.jpg")
        );
    }

    #[test]
    fn listing_mentions_every_recipe() {
        let listing = catalogue_listing();
        for recipe in &lichtwerk_engine::CATALOGUE {
            assert!(listing.contains(recipe.id), "missing {}", recipe.id);
        }
        assert!(listing.contains("Sky Enhancement"));
    }

    #[test]
    fn megabytes_format() {
        assert_eq!(format_megabytes(0), "0.00 MB");
        assert_eq!(format_megabytes(3 * 1024 * 1024 / 2), "1.50 MB");
    }
}
