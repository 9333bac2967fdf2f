//! Pattern store: online learning, per-call decay, and anomaly queries.

use super::ActivityPattern;
use crate::clock::{Clock, SystemClock};
use crate::config::PatternConfig;
use crate::error::{AgentError, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Decayed observation weight required before anomaly queries answer.
const MIN_OBSERVATIONS: f64 = 3.0;

/// Deviation (in standard deviations) above which behavior is anomalous.
const ANOMALY_THRESHOLD: f64 = 2.0;

/// Patterns whose decayed observation weight falls below this are evicted
/// during the decay sweep, keeping the map bounded over long runtime.
const EVICTION_EPSILON: f64 = 1e-3;

/// Read-only projection of one learned pattern, zones sorted by
/// descending frequency.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ActivitySummary {
    pub activity_type: String,
    pub active_hours_mean: f64,
    pub active_hours_std: f64,
    pub typical_duration_mean: f64,
    pub typical_duration_std: f64,
    pub pattern_stability: f64,
    pub observation_count: f64,
    pub zones: Vec<(String, f64)>,
    pub movement_speed_mean: f64,
    pub movement_speed_std: f64,
}

/// Owns all activity patterns. Mutating operations take `&mut self`: the
/// global decay in `observe` must apply exactly once per logical
/// observation, so writers must be serialized (one exclusive lock when
/// shared across threads).
pub struct PatternStore {
    config: PatternConfig,
    patterns: BTreeMap<String, ActivityPattern>,
    /// Global counter, never decayed.
    total_observations: u64,
    clock: Box<dyn Clock>,
}

impl PatternStore {
    pub fn new(config: PatternConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: PatternConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            patterns: BTreeMap::new(),
            total_observations: 0,
            clock,
        }
    }

    /// Rebuild a store from previously exported state (snapshot restore).
    pub(crate) fn from_parts(
        config: PatternConfig,
        patterns: BTreeMap<String, ActivityPattern>,
        total_observations: u64,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config,
            patterns,
            total_observations,
            clock,
        }
    }

    /// Fold one activity observation into its pattern, then apply the
    /// global decay sweep across every stored pattern (including the one
    /// just touched). Decay cadence is per observation call, not
    /// wall-clock.
    ///
    /// Rejects out-of-contract inputs instead of corrupting the running
    /// statistics: hour must be in [0, 24), duration and speed
    /// non-negative.
    pub fn observe(
        &mut self,
        activity_type: &str,
        hour: f64,
        duration_minutes: f64,
        zone: &str,
        movement_speed: f64,
    ) -> Result<()> {
        if !hour.is_finite() || !(0.0..24.0).contains(&hour) {
            return Err(AgentError::InvalidObservation {
                field: "hour",
                value: hour,
            });
        }
        if !duration_minutes.is_finite() || duration_minutes < 0.0 {
            return Err(AgentError::InvalidObservation {
                field: "duration_minutes",
                value: duration_minutes,
            });
        }
        if !movement_speed.is_finite() || movement_speed < 0.0 {
            return Err(AgentError::InvalidObservation {
                field: "movement_speed",
                value: movement_speed,
            });
        }

        let now = self.clock.now();
        self.patterns
            .entry(activity_type.to_string())
            .or_insert_with(|| ActivityPattern::new(activity_type, now))
            .record(hour, duration_minutes, zone, movement_speed, now);

        self.apply_decay();
        self.total_observations += 1;
        debug!(
            activity = activity_type,
            zone,
            total = self.total_observations,
            "activity observed"
        );
        Ok(())
    }

    /// Forgetting mechanism: multiply every pattern's observation weight,
    /// stability, and zone weights by the decay factor, then evict
    /// patterns that have decayed to nothing.
    fn apply_decay(&mut self) {
        let decay = self.config.decay_factor;
        for pattern in self.patterns.values_mut() {
            pattern.decay(decay);
        }

        let before = self.patterns.len();
        self.patterns
            .retain(|_, p| p.temporal.observation_count >= EVICTION_EPSILON);
        let evicted = before - self.patterns.len();
        if evicted > 0 {
            debug!(evicted, remaining = self.patterns.len(), "fully-decayed patterns evicted");
        }
    }

    pub fn get_pattern(&self, activity_type: &str) -> Option<&ActivityPattern> {
        self.patterns.get(activity_type)
    }

    /// Compare current behavior against the learned pattern.
    ///
    /// Returns `(is_anomaly, deviation)` where deviation is the larger of
    /// the hour and duration z-scores. A missing pattern or one with fewer
    /// than three decayed observations yields the insufficient-data
    /// sentinel `(false, 0.0)`, a normal answer rather than an error.
    ///
    /// A collapsed standard deviation forces that dimension's z-score to
    /// zero regardless of the actual gap; perfectly regular histories are
    /// blind on that axis.
    pub fn detect_anomaly(
        &self,
        activity_type: &str,
        current_hour: f64,
        current_duration: f64,
    ) -> (bool, f64) {
        let Some(pattern) = self.patterns.get(activity_type) else {
            return (false, 0.0);
        };
        let temporal = &pattern.temporal;
        if temporal.observation_count < MIN_OBSERVATIONS {
            return (false, 0.0);
        }

        let hour_zscore = if temporal.active_hours.std() > 0.0 {
            ((current_hour - temporal.active_hours.mean()) / temporal.active_hours.std()).abs()
        } else {
            0.0
        };
        let duration_zscore = if temporal.typical_duration.std() > 0.0 {
            ((current_duration - temporal.typical_duration.mean())
                / temporal.typical_duration.std())
            .abs()
        } else {
            0.0
        };

        let deviation = hour_zscore.max(duration_zscore);
        let is_anomaly = deviation > ANOMALY_THRESHOLD;
        if is_anomaly {
            warn!(
                activity = activity_type,
                deviation,
                hour = current_hour,
                duration_minutes = current_duration,
                "behavioral anomaly"
            );
        }
        (is_anomaly, deviation)
    }

    /// Read-only snapshot of every learned pattern. Pure projection,
    /// no state mutation.
    pub fn summarize(&self) -> Vec<ActivitySummary> {
        self.patterns
            .values()
            .map(|pattern| {
                let mut zones: Vec<(String, f64)> =
                    pattern.spatial.zone_frequencies().into_iter().collect();
                zones.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

                ActivitySummary {
                    activity_type: pattern.activity_type.clone(),
                    active_hours_mean: pattern.temporal.active_hours.mean(),
                    active_hours_std: pattern.temporal.active_hours.std(),
                    typical_duration_mean: pattern.temporal.typical_duration.mean(),
                    typical_duration_std: pattern.temporal.typical_duration.std(),
                    pattern_stability: pattern.temporal.pattern_stability,
                    observation_count: pattern.temporal.observation_count,
                    zones,
                    movement_speed_mean: pattern.spatial.movement_speed.mean(),
                    movement_speed_std: pattern.spatial.movement_speed.std(),
                }
            })
            .collect()
    }

    /// All stored patterns keyed by activity type (read-only).
    pub fn patterns(&self) -> &BTreeMap<String, ActivityPattern> {
        &self.patterns
    }

    pub fn total_observations(&self) -> u64 {
        self.total_observations
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }
}
