//! Registry benchmark: detect against a populated profile set
//! (low-power device target).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hearth_agent::config::IdentityConfig;
use hearth_agent::{BehavioralFeatures, EntityRegistry, MovementPattern, TimeOfDay, Zone};

fn make_features(i: usize) -> BehavioralFeatures {
    // Spread speed and height far enough apart that every record seeds a
    // distinct profile under the default threshold.
    BehavioralFeatures {
        movement_speed: 0.5 + i as f64 * 0.9,
        height_estimate: 1.4 + i as f64 * 0.5,
        time_of_day: TimeOfDay::Morning,
        zone: Zone::Kitchen,
        movement_pattern: MovementPattern::Steady,
    }
}

fn populated_registry(n: usize) -> EntityRegistry {
    let mut registry = EntityRegistry::new(IdentityConfig::default());
    for i in 0..n {
        registry.detect(&make_features(i));
    }
    registry
}

fn bench_detect_match(c: &mut Criterion) {
    let mut registry = populated_registry(100);
    let features = make_features(50);

    c.bench_function("detect_match_100_profiles", |b| {
        b.iter(|| black_box(registry.detect(black_box(&features))))
    });
}

fn bench_detect_similarity_scan(c: &mut Criterion) {
    let a = make_features(0);
    let b_features = make_features(1);

    c.bench_function("similarity_pair", |b| {
        b.iter(|| black_box(hearth_agent::similarity(black_box(&a), black_box(&b_features))))
    });
}

fn bench_cleanup(c: &mut Criterion) {
    c.bench_function("cleanup_expired_100_profiles", |b| {
        b.iter_with_setup(
            || populated_registry(100),
            |mut registry| black_box(registry.cleanup_expired()),
        )
    });
}

criterion_group!(
    benches,
    bench_detect_match,
    bench_detect_similarity_scan,
    bench_cleanup
);
criterion_main!(benches);
