//! Entity codec benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use entidoc_bench::utils::{loaded_order, people_with_documents};
use entidoc_core::{CodecConfig, EntityCodec, SchemaCache};
use entidoc_testkit::{scenarios, Account, Person};
use std::sync::Arc;

/// Benchmark the write path.
fn bench_write(c: &mut Criterion) {
    let cache = SchemaCache::new();
    let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);
    let mut group = c.benchmark_group("write");

    group.bench_function("person_json", |b| {
        let person = Person::new(7, "Ann", 33);
        b.iter(|| {
            let result = codec.to_json(black_box(&person)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("account_json", |b| {
        let account = Account::new(1, "acc-1", "Ann");
        b.iter(|| {
            let result = codec.to_json(black_box(&account)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("person_cbor", |b| {
        let person = Person::new(7, "Ann", 33);
        b.iter(|| {
            let result = codec.to_cbor(black_box(&person)).unwrap();
            black_box(result);
        });
    });

    for lines in [1usize, 10, 100] {
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::new("order_lines", lines), &lines, |b, &lines| {
            let order = loaded_order(1, lines);
            b.iter(|| {
                let result = codec.to_document(black_box(&order)).unwrap();
                black_box(result);
            });
        });
    }

    group.finish();
}

/// Benchmark the read path.
fn bench_read(c: &mut Criterion) {
    let cache = SchemaCache::new();
    let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);
    let mut group = c.benchmark_group("read");

    let (store, documents) = people_with_documents(100);
    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("person_json_100", |b| {
        b.iter(|| {
            for text in &documents {
                let found: Option<Arc<Person>> =
                    codec.from_json(black_box(text), &store).unwrap();
                black_box(found);
            }
        });
    });

    let accounts = scenarios::account_store();
    group.throughput(Throughput::Elements(1));
    group.bench_function("account_missing", |b| {
        let text = r#"{"externalId":"acc-404","owner":"Nobody"}"#;
        b.iter(|| {
            let found: Option<Arc<Account>> = codec.from_json(black_box(text), &accounts).unwrap();
            black_box(found);
        });
    });

    group.finish();
}

/// Benchmark schema lookup on a warm cache.
fn bench_schema(c: &mut Criterion) {
    let cache = SchemaCache::new();
    let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);
    let _ = codec.schema::<Person>();

    c.bench_function("schema_cached", |b| {
        b.iter(|| {
            let schema = codec.schema::<Person>().unwrap();
            black_box(schema);
        });
    });
}

criterion_group!(benches, bench_write, bench_read, bench_schema);

criterion_main!(benches);
