//! Pattern store benchmark: observe (including the global decay sweep)
//! and anomaly queries.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hearth_agent::config::PatternConfig;
use hearth_agent::PatternStore;

fn populated_store(activity_types: usize) -> PatternStore {
    let mut store = PatternStore::new(PatternConfig { decay_factor: 0.999 });
    for i in 0..activity_types {
        let activity = format!("activity_{}", i);
        for _ in 0..10 {
            store
                .observe(&activity, (i % 24) as f64, 30.0, "kitchen", 1.0)
                .unwrap();
        }
    }
    store
}

fn bench_observe_with_decay_sweep(c: &mut Criterion) {
    let mut store = populated_store(50);

    c.bench_function("observe_50_patterns", |b| {
        b.iter(|| {
            store
                .observe(
                    black_box("activity_0"),
                    black_box(7.5),
                    black_box(25.0),
                    black_box("kitchen"),
                    black_box(1.2),
                )
                .unwrap()
        })
    });
}

fn bench_detect_anomaly(c: &mut Criterion) {
    let store = populated_store(50);

    c.bench_function("detect_anomaly", |b| {
        b.iter(|| black_box(store.detect_anomaly(black_box("activity_10"), 3.0, 120.0)))
    });
}

fn bench_summarize(c: &mut Criterion) {
    let store = populated_store(50);

    c.bench_function("summarize_50_patterns", |b| {
        b.iter(|| black_box(store.summarize()))
    });
}

criterion_group!(
    benches,
    bench_observe_with_decay_sweep,
    bench_detect_anomaly,
    bench_summarize
);
criterion_main!(benches);
