#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use splicebuf::{Buffer, BufferOptions, GrowthPolicy};

/// Deterministically create `len` bytes of printable text.
fn make_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}

/// Sets every prefix of `payload` in turn, the worst case for exact growth.
fn run_growing_sets(growth: GrowthPolicy, payload: &[u8]) -> usize {
    let mut buffer = Buffer::with_options(BufferOptions {
        growth,
        ..Default::default()
    })
    .unwrap();
    for length in 1..=payload.len() {
        buffer.set(payload, length).unwrap();
    }
    buffer.capacity()
}

fn bench_set_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_growth");
    for len in [256usize, 4096] {
        let payload = make_payload(len);
        for growth in [GrowthPolicy::Exact, GrowthPolicy::Doubling] {
            group.bench_with_input(
                BenchmarkId::new(format!("{growth:?}"), len),
                &payload,
                |b, payload| b.iter(|| run_growing_sets(growth, black_box(payload))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_set_growth);
criterion_main!(benches);
