//! Document transport benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use entidoc_bench::utils::nested_document;
use entidoc_document::{from_cbor, from_json, to_cbor, to_json};

/// Benchmark JSON encoding and decoding.
fn bench_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("json");
    let value = nested_document(3, 5);
    let text = to_json(&value).unwrap();

    group.bench_function("encode_depth3_width5", |b| {
        b.iter(|| {
            let result = to_json(black_box(&value)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("decode_depth3_width5", |b| {
        b.iter(|| {
            let result = from_json(black_box(&text)).unwrap();
            black_box(result);
        });
    });

    group.finish();
}

/// Benchmark CBOR encoding and decoding.
fn bench_cbor(c: &mut Criterion) {
    let mut group = c.benchmark_group("cbor");
    let value = nested_document(3, 5);
    let bytes = to_cbor(&value).unwrap();

    group.bench_function("encode_depth3_width5", |b| {
        b.iter(|| {
            let result = to_cbor(black_box(&value)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("decode_depth3_width5", |b| {
        b.iter(|| {
            let result = from_cbor(black_box(&bytes)).unwrap();
            black_box(result);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_json, bench_cbor);

criterion_main!(benches);
