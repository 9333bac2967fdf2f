//! Ephemeral identity: entity profiles and their opaque ids.
//!
//! Entity ids are cryptographically random and carry no link to any
//! real-world identity. Profiles hold only behavioral summaries and expire
//! after a configured period of inactivity.

mod registry;

pub use registry::EntityRegistry;

use crate::features::BehavioralFeatures;
use crate::stats::EmaStats;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

/// Learning rate for the EMA update of a profile's typical features.
const PROFILE_ALPHA: f64 = 0.3;

/// Observations needed for full confidence in a profile.
const FULL_CONFIDENCE_OBSERVATIONS: f64 = 10.0;

/// Opaque entity token. Random, non-sequential, non-linkable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate an entity id from 128 bits of OS-sourced CSPRNG entropy.
/// Collision probability is treated as negligible, not checked.
///
/// The secure source is a hard privacy invariant: a guessable or
/// sequential id would let an observer link entities across sessions.
pub fn generate_entity_id() -> EntityId {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    let mut token = String::with_capacity(7 + bytes.len() * 2);
    token.push_str("entity_");
    for b in bytes {
        let _ = write!(token, "{b:02x}");
    }
    EntityId(token)
}

/// Behavioral profile for one tracked entity. No personal identifiable
/// information is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityProfile {
    id: EntityId,
    pub first_observed: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    /// Monotonic, never decayed.
    pub observation_count: f64,
    pub confidence: f64,
    typical: BehavioralFeatures,
    speed_stats: EmaStats,
    height_stats: EmaStats,
}

impl EntityProfile {
    pub(crate) fn new(id: EntityId, features: &BehavioralFeatures, now: DateTime<Utc>) -> Self {
        let mut speed_stats = EmaStats::new(PROFILE_ALPHA);
        let mut height_stats = EmaStats::new(PROFILE_ALPHA);
        speed_stats.update(features.movement_speed);
        height_stats.update(features.height_estimate);
        Self {
            id,
            first_observed: now,
            last_seen: now,
            observation_count: 1.0,
            confidence: 1.0 / FULL_CONFIDENCE_OBSERVATIONS,
            typical: *features,
            speed_stats,
            height_stats,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// EMA summary of the entity's observed features. Categorical fields
    /// keep the values from the first observation; only the numeric
    /// dimensions are blended.
    pub fn typical_features(&self) -> &BehavioralFeatures {
        &self.typical
    }

    /// Fold a matched observation into the profile.
    pub(crate) fn record_observation(&mut self, features: &BehavioralFeatures, now: DateTime<Utc>) {
        self.last_seen = now;
        self.observation_count += 1.0;
        self.confidence = (self.observation_count / FULL_CONFIDENCE_OBSERVATIONS).min(1.0);
        self.speed_stats.update(features.movement_speed);
        self.height_stats.update(features.height_estimate);
        self.typical.movement_speed = self.speed_stats.mean();
        self.typical.height_estimate = self.height_stats.mean();
    }

    /// Day-floor expiry: exactly `expiry_days` since `last_seen` is still
    /// active; one full day beyond is expired.
    pub fn is_expired(&self, now: DateTime<Utc>, expiry_days: i64) -> bool {
        (now - self.last_seen).num_days() > expiry_days
    }
}
