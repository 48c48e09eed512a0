// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the lichtwerk-engine crate. Covers sky detection
// and two representative recipes on a synthetic 640x480 listing photo.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};

use lichtwerk_core::config::SkyDetection;
use lichtwerk_engine::{Engine, detect_sky};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Pale sky over a textured dark facade.
fn synthetic_listing() -> RgbImage {
    let (width, height) = (640u32, 480u32);
    RgbImage::from_fn(width, height, |x, y| {
        if y < height / 2 {
            Rgb([190, 210, (230 + y % 20) as u8])
        } else {
            let shade = 40 + ((x / 16 + y / 16) % 2) as u8 * 30;
            Rgb([shade, shade - 5, shade - 10])
        }
    })
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_detect_sky(c: &mut Criterion) {
    let img = synthetic_listing();
    let params = SkyDetection::default();
    c.bench_function("detect_sky (640x480)", |b| {
        b.iter(|| black_box(detect_sky(black_box(&img), &params)));
    });
}

/// Pure tone pipeline versus the detail (CLAHE + domain filter) pipeline.
fn bench_recipes(c: &mut Criterion) {
    let engine = Engine::from_rgb(synthetic_listing());
    let mut group = c.benchmark_group("recipes (640x480)");
    for id in ["luxury", "hdr-pro", "warm-sunset"] {
        group.bench_function(id, |b| {
            b.iter(|| black_box(engine.apply(black_box(id), 1.0)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_detect_sky, bench_recipes);
criterion_main!(benches);
