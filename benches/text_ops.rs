//! Benchmarks for text mesh construction.

use criterion::{criterion_group, criterion_main, Criterion};
use textrude::prelude::*;

const PANGRAM: &str = "The quick brown fox jumps over the lazy dog 0123456789";

fn bench_layout_and_extrude(c: &mut Criterion) {
    let font = BlockFont::new();
    let params = SpacingParams::default().with_letter_spacing(0.5);

    c.bench_function("layout_pangram", |b| {
        b.iter(|| layout(PANGRAM, &font, &params).unwrap())
    });

    let spans = layout(PANGRAM, &font, &params).unwrap();

    c.bench_function("extrude_pangram_parallel", |b| {
        let options = ExtrudeOptions::default();
        b.iter(|| extrude(&spans, params.depth, &options).unwrap())
    });

    c.bench_function("extrude_pangram_sequential", |b| {
        let options = ExtrudeOptions::default().sequential();
        b.iter(|| extrude(&spans, params.depth, &options).unwrap())
    });

    c.bench_function("outline_pangram", |b| {
        let options = ExtrudeOptions::default();
        b.iter(|| build_outline(&spans, params.depth, 0.5, 7.0, &options).unwrap())
    });
}

fn bench_classify(c: &mut Criterion) {
    let font = BlockFont::new();
    let params = SpacingParams::default();
    let spans = layout(PANGRAM, &font, &params).unwrap();
    let mesh = extrude(&spans, params.depth, &ExtrudeOptions::default()).unwrap();

    c.bench_function("classify_pangram_parallel", |b| {
        let options = ClassifyOptions::default();
        b.iter(|| {
            let mut m = mesh.clone();
            classify(&mut m, &options);
            m
        })
    });

    c.bench_function("classify_pangram_sequential", |b| {
        let options = ClassifyOptions::default().sequential();
        b.iter(|| {
            let mut m = mesh.clone();
            classify(&mut m, &options);
            m
        })
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let font = BlockFont::new();
    let options = TextOptions::default().with_outline_width(0.5);

    c.bench_function("build_text_geometry_pangram", |b| {
        b.iter(|| build_text_geometry(PANGRAM, &font, &options).unwrap())
    });
}

criterion_group!(benches, bench_layout_and_extrude, bench_classify, bench_pipeline);
criterion_main!(benches);
