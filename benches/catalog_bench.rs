//! Catalog construction cost for sheet sizes close to a live dataset.
//!
//! Run with: `cargo bench --bench catalogs`

use std::fmt::Write as _;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reference_data::{ReferenceData, SheetStore};

const CATEGORIES: u32 = 110;

fn synthetic_store(item_count: u32) -> SheetStore {
    let mut items = String::from("#,Name,ItemUICategory\n");
    for id in 1..=item_count {
        let _ = writeln!(items, "{id},Item \u{ad}{:05},{}", item_count - id, id % CATEGORIES);
    }
    let mut categories = String::from("#,Name\n");
    for id in 0..CATEGORIES {
        let _ = writeln!(categories, "{id},Category {:03}", CATEGORIES - id);
    }
    let mut content = String::from("#,Name,ContentType,TerritoryType,HighEndDuty\n");
    for id in 1..=1_000u32 {
        let _ = writeln!(content, "{id},Duty {:04},{},{},False", 1_000 - id, id % 30, id);
    }

    SheetStore::default()
        .with_csv("Item", &items)
        .and_then(|s| s.with_csv("ItemUICategory", &categories))
        .and_then(|s| s.with_csv("ContentFinderCondition", &content))
        .expect("synthetic sheets parse")
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_data_build");
    group.sample_size(20);

    for item_count in [5_000u32, 40_000] {
        let store = synthetic_store(item_count);
        group.throughput(Throughput::Elements(u64::from(item_count)));
        group.bench_with_input(
            BenchmarkId::from_parameter(item_count),
            &store,
            |b, store| b.iter(|| black_box(ReferenceData::new(store))),
        );
    }

    group.finish();
}

fn bench_point_lookups(c: &mut Criterion) {
    let store = synthetic_store(40_000);
    let data = ReferenceData::new(&store);

    c.bench_function("content_name", |b| {
        b.iter(|| black_box(data.content_name(black_box(512))))
    });
    c.bench_function("content_id_by_territory", |b| {
        b.iter(|| black_box(data.content_id(black_box(999))))
    });
}

criterion_group!(benches, bench_build, bench_point_lookups);
criterion_main!(benches);
