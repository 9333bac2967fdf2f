//! Decaying pattern memory: per-activity statistical summaries.
//!
//! Patterns store WHAT typically happens (means, stds, zone frequencies),
//! never individual events or their timestamps. Individual observations
//! cannot be reconstructed from this state.

mod store;

pub use store::{ActivitySummary, PatternStore};

use crate::stats::EmaStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Learning rate for temporal and spatial EMA updates.
const PATTERN_ALPHA: f64 = 0.2;

/// Observations needed for full pattern stability.
const FULL_STABILITY_OBSERVATIONS: f64 = 20.0;

/// When an activity typically occurs and for how long. No specific
/// timestamps of individual events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalPattern {
    /// Hour-of-day statistics (mean and std).
    pub active_hours: EmaStats,
    /// Duration statistics in minutes.
    pub typical_duration: EmaStats,
    /// Consistency of the pattern, in [0, 1]. Decayed.
    pub pattern_stability: f64,
    /// Decayed observation weight (multiplied by the decay factor on every
    /// store-wide observation).
    pub observation_count: f64,
    pub last_updated: DateTime<Utc>,
}

impl TemporalPattern {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            active_hours: EmaStats::new(PATTERN_ALPHA),
            typical_duration: EmaStats::new(PATTERN_ALPHA),
            pattern_stability: 0.0,
            observation_count: 0.0,
            last_updated: now,
        }
    }

    fn record(&mut self, hour: f64, duration_minutes: f64, now: DateTime<Utc>) {
        self.observation_count += 1.0;
        self.active_hours.update(hour);
        self.typical_duration.update(duration_minutes);
        self.pattern_stability = (self.observation_count / FULL_STABILITY_OBSERVATIONS).min(1.0);
        self.last_updated = now;
    }
}

/// Where an activity occurs and how the resident moves during it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialPattern {
    /// Per-zone weights, renormalized on every record and decayed between
    /// records. Between decay sweeps the raw sum drifts below 1, so reads
    /// go through [`SpatialPattern::zone_frequencies`], which renormalizes.
    zone_weights: HashMap<String, f64>,
    pub movement_speed: EmaStats,
}

impl SpatialPattern {
    fn new() -> Self {
        Self {
            zone_weights: HashMap::new(),
            movement_speed: EmaStats::new(PATTERN_ALPHA),
        }
    }

    fn record(&mut self, zone: &str, speed: f64) {
        *self.zone_weights.entry(zone.to_string()).or_insert(0.0) += 1.0;

        // Renormalize every entry; the insert above guarantees a non-zero
        // total, so the division is safe.
        let total: f64 = self.zone_weights.values().sum();
        for weight in self.zone_weights.values_mut() {
            *weight /= total;
        }

        self.movement_speed.update(speed);
    }

    fn decay(&mut self, factor: f64) {
        for weight in self.zone_weights.values_mut() {
            *weight *= factor;
        }
    }

    /// Zone probabilities, normalized to sum 1. Non-empty whenever the
    /// pattern exists: the first record always inserts an entry.
    pub fn zone_frequencies(&self) -> HashMap<String, f64> {
        let total: f64 = self.zone_weights.values().sum();
        if total <= 0.0 {
            return self.zone_weights.clone();
        }
        self.zone_weights
            .iter()
            .map(|(zone, weight)| (zone.clone(), weight / total))
            .collect()
    }
}

/// Statistical summary learned for one activity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPattern {
    pub activity_type: String,
    pub temporal: TemporalPattern,
    pub spatial: SpatialPattern,
}

impl ActivityPattern {
    fn new(activity_type: &str, now: DateTime<Utc>) -> Self {
        Self {
            activity_type: activity_type.to_string(),
            temporal: TemporalPattern::new(now),
            spatial: SpatialPattern::new(),
        }
    }

    fn record(
        &mut self,
        hour: f64,
        duration_minutes: f64,
        zone: &str,
        speed: f64,
        now: DateTime<Utc>,
    ) {
        self.temporal.record(hour, duration_minutes, now);
        self.spatial.record(zone, speed);
    }

    fn decay(&mut self, factor: f64) {
        self.temporal.observation_count *= factor;
        self.temporal.pattern_stability *= factor;
        self.spatial.decay(factor);
    }
}
