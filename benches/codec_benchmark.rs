use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wikidex::core::types::DocId;
use wikidex::index::posting::{decode_all, Posting};
use wikidex::index::shard::shard_of;
use wikidex::core::types::Term;

fn bench_posting_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("posting_codec");

    group.bench_function("encode_single", |b| {
        let posting = Posting::new(DocId(305_419_896), 42);
        b.iter(|| black_box(posting.encode()));
    });

    for size in [100usize, 10_000, 100_000] {
        let bytes: Vec<u8> = (0..size as u32)
            .flat_map(|i| Posting::new(DocId(i), (i % 1000) as u16).encode())
            .collect();

        group.bench_with_input(BenchmarkId::new("decode_all", size), &bytes, |b, bytes| {
            b.iter(|| black_box(decode_all(bytes)));
        });
    }

    group.finish();
}

fn bench_shard_router(c: &mut Criterion) {
    let mut group = c.benchmark_group("shard_router");
    let terms: Vec<Term> = (0..10_000).map(|i| Term::new(format!("term-{i}"))).collect();

    group.bench_function("shard_of_10k_terms", |b| {
        b.iter(|| {
            for term in &terms {
                black_box(shard_of(term, 124));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_posting_codec, bench_shard_router);
criterion_main!(benches);
