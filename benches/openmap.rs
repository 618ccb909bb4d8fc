#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{criterion_group, criterion_main, Criterion};
use openmap::OpenHashMap;
use proptest::{
    prelude::{any, Strategy},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = any::<[(String, String); ITEMS_AMOUNT]>()
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut open_map = OpenHashMap::new();
    let mut rust_map = HashMap::new();
    group.bench_function("openmap insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                open_map.insert(key, value);
            }
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }
        });
    });
    group.bench_function("openmap get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = open_map.get(key);
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = rust_map.get(key);
            }
        });
    });
    group.bench_function("openmap churn", |b| {
        b.iter(|| {
            let mut map = OpenHashMap::new();
            for (key, value) in items.iter().cloned() {
                map.insert(key, value);
            }
            for (key, _) in items.iter().step_by(2) {
                map.remove(key);
            }
            for (key, value) in items.iter().step_by(2).cloned() {
                map.insert(key, value);
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches);

criterion_main!(benches);
