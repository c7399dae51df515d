//! Benchmarks for identifier extraction and duration normalization.
//!
//! Run with: `cargo bench --bench parse_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ytdetails::{extract_video_id, format_duration};

// ---------------------------------------------------------------------------
// Datasets
// ---------------------------------------------------------------------------

const VIDEO_URLS: &[&str] = &[
    "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
    "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=30s&list=PL123",
    "https://youtu.be/dQw4w9WgXcQ",
    "https://youtu.be/dQw4w9WgXcQ?si=abcdef",
    "https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
];

/// URLs without any identifier marker.
const NON_MATCHING_URLS: &[&str] = &[
    "https://example.com/page",
    "https://www.youtube.com/",
    "https://www.youtube.com/channel/UCxyz",
    "https://en.wikipedia.org/wiki/Rust_(programming_language)",
    "https://docs.rs/tokio/latest/tokio/",
];

const DURATIONS: &[&str] = &["PT45S", "PT10M5S", "PT1H2M3S", "P1DT2H", "P0D", "PT59.999S"];

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_video_id");

    group.bench_function("hit", |b| {
        b.iter(|| {
            for url in VIDEO_URLS {
                black_box(extract_video_id(black_box(url)));
            }
        });
    });

    group.bench_function("miss", |b| {
        b.iter(|| {
            for url in NON_MATCHING_URLS {
                black_box(extract_video_id(black_box(url)));
            }
        });
    });

    group.finish();
}

fn bench_duration(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_duration");

    group.bench_function("valid", |b| {
        b.iter(|| {
            for d in DURATIONS {
                black_box(format_duration(black_box(d)).ok());
            }
        });
    });

    group.bench_function("invalid", |b| {
        b.iter(|| black_box(format_duration(black_box("ten minutes")).ok()));
    });

    group.finish();
}

criterion_group!(benches, bench_extract, bench_duration);
criterion_main!(benches);
