//! Snapshot round-trip: restart continuity for both stores.

use chrono::{Duration, TimeZone, Utc};
use hearth_agent::config::{IdentityConfig, PatternConfig};
use hearth_agent::{
    AgentSnapshot, BehavioralFeatures, EntityRegistry, ManualClock, MovementPattern, PatternStore,
    TimeOfDay, Zone,
};

fn resident() -> BehavioralFeatures {
    BehavioralFeatures {
        movement_speed: 1.2,
        height_estimate: 1.75,
        time_of_day: TimeOfDay::Morning,
        zone: Zone::Kitchen,
        movement_pattern: MovementPattern::Steady,
    }
}

#[test]
fn snapshot_roundtrip_preserves_state() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap());
    let mut registry =
        EntityRegistry::with_clock(IdentityConfig::default(), Box::new(clock.clone()));
    let mut store =
        PatternStore::with_clock(PatternConfig { decay_factor: 0.98 }, Box::new(clock.clone()));

    let (entity_id, _) = registry.detect(&resident());
    registry.detect(&resident());
    for _ in 0..5 {
        store.observe("breakfast", 7.5, 25.0, "kitchen", 1.2).unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agent.snapshot.json");
    AgentSnapshot::capture(&registry, &store)
        .write_to(&path)
        .unwrap();

    let (restored_registry, restored_store) = AgentSnapshot::read_from(&path)
        .unwrap()
        .restore_with_clocks(
            IdentityConfig::default(),
            PatternConfig { decay_factor: 0.98 },
            Box::new(clock.clone()),
            Box::new(clock.clone()),
        );

    let profile = restored_registry.get_profile(&entity_id).unwrap();
    assert_eq!(profile.observation_count, 2.0);
    assert!((profile.confidence - 0.2).abs() < 1e-12);

    let temporal = &restored_store.get_pattern("breakfast").unwrap().temporal;
    assert_eq!(temporal.active_hours.mean(), 7.5);
    assert_eq!(restored_store.total_observations(), 5);
}

#[test]
fn restored_registry_still_matches_and_expires() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap());
    let mut registry =
        EntityRegistry::with_clock(IdentityConfig::default(), Box::new(clock.clone()));
    let (entity_id, _) = registry.detect(&resident());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agent.snapshot.json");
    AgentSnapshot::capture(
        &registry,
        &PatternStore::new(PatternConfig::default()),
    )
    .write_to(&path)
    .unwrap();

    let (mut restored, _) = AgentSnapshot::read_from(&path).unwrap().restore_with_clocks(
        IdentityConfig::default(),
        PatternConfig::default(),
        Box::new(clock.clone()),
        Box::new(clock.clone()),
    );

    // Same entity is re-identified after restart.
    let (matched_id, is_new) = restored.detect(&resident());
    assert!(!is_new);
    assert_eq!(matched_id, entity_id);

    // Expiry keeps working against the restored last_seen.
    clock.advance(Duration::days(31));
    assert_eq!(restored.cleanup_expired(), 1);
}

#[test]
fn restored_store_keeps_decaying() {
    let mut store = PatternStore::new(PatternConfig { decay_factor: 0.95 });
    store.observe("breakfast", 7.5, 25.0, "kitchen", 1.2).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agent.snapshot.json");
    AgentSnapshot::capture(&EntityRegistry::new(IdentityConfig::default()), &store)
        .write_to(&path)
        .unwrap();

    let (_, mut restored) = AgentSnapshot::read_from(&path)
        .unwrap()
        .restore(IdentityConfig::default(), PatternConfig { decay_factor: 0.95 });

    restored.observe("reading", 14.0, 60.0, "living_room", 0.3).unwrap();
    let count = restored
        .get_pattern("breakfast")
        .unwrap()
        .temporal
        .observation_count;
    assert!((count - 0.95f64.powi(2)).abs() < 1e-12);
}
