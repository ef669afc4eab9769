//! Criterion benchmarks for the encoder hot path.
//!
//! The encoder runs once per name row at index time and once per query
//! token at search time, so both short and rewrite-heavy names matter.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use kaundula_search_core::{classify, encode, tokenize};

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode_short_name", |b| {
        b.iter(|| black_box(encode(black_box("Banda"))));
    });

    c.bench_function("encode_rewrite_heavy_name", |b| {
        // Hits the silent-cluster, phoneme, and glide rewrites at once.
        b.iter(|| black_box(encode(black_box("Dzanjalimodzi"))));
    });

    c.bench_function("encode_letterless_input", |b| {
        b.iter(|| black_box(encode(black_box("12-34"))));
    });
}

fn bench_query_pipeline(c: &mut Criterion) {
    c.bench_function("classify_marked_query", |b| {
        b.iter(|| black_box(classify(black_box("s: Mary Banda"), Some(":s"))));
    });

    c.bench_function("tokenize_two_terms", |b| {
        b.iter(|| black_box(tokenize(black_box(" Mary,  Banda "))));
    });
}

criterion_group!(benches, bench_encode, bench_query_pipeline);
criterion_main!(benches);
