//! This bench builds the full set of indexes over a large snapshot of
//! service requests and runs each query against it.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use srindex::{Category, Priority, RequestIndex, RequestRecord};

const SNAPSHOT_SIZE: usize = 5_000;

/// Generates records with random identifiers spread over a few hundred
/// locations and all priority levels.
fn snapshot() -> Vec<RequestRecord> {
    (0..SNAPSHOT_SIZE)
        .map(|i| {
            let priority = Priority::new(u8::try_from(i % 5).unwrap() + 1).unwrap();
            let location = format!("Ward {} Street {}", i % 17, i % 300);
            RequestRecord::new(&location, Category::ALL[i % 5], priority, "bench")
        })
        .collect()
}

fn build_index(c: &mut Criterion) {
    let records = snapshot();

    c.bench_function("build index", |b| {
        b.iter(|| RequestIndex::new(&records));
    });
}

fn queries(c: &mut Criterion) {
    let records = snapshot();
    let index = RequestIndex::new(&records);
    let reference = records[SNAPSHOT_SIZE / 2].reference_code();

    c.bench_function("ordered listing", |b| {
        b.iter(|| index.ordered_by_id().count());
    });
    c.bench_function("top 10 priority", |b| {
        b.iter_batched(|| 10, |n| index.top_priority(n).count(), BatchSize::SmallInput);
    });
    c.bench_function("inspection route", |b| {
        b.iter(|| index.inspection_route().count());
    });
    c.bench_function("find by reference", |b| {
        b.iter(|| index.find_by_reference(&reference));
    });
}

criterion_group!(benches, build_index, queries);
criterion_main!(benches);
